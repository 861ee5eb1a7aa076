use serde::{Deserialize, Serialize};

/// Body of the account registration request.
///
/// Fields are passed through as entered; the server is responsible for
/// validating them (matching passwords, unique email, ...).
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Default,
)]
pub struct SignUpUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub re_password: String,
}

/// Body of the account activation request. Both values come from the
/// link in the activation email.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Default,
)]
pub struct ActivateUser {
    pub uid: String,
    pub token: String,
}

/// Answer to a successful activation. Activating an account twice is
/// answered the same way, only with a different message.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Default,
)]
pub struct ActivationMessage {
    pub message: String,
}
