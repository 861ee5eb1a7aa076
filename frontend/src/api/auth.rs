use std::fmt::Debug;

use reqwest::StatusCode;
use serde_json::Value;
use shared::models::user::{ActivateUser, ActivationMessage, SignUpUser};

use crate::api::action::{perform, Outcome, RequestAction};
use crate::handler::transport::Transport;
use crate::store::auth::AuthAction;
use crate::store::Dispatch;

impl RequestAction for SignUpUser {
    type Payload = Value;

    const NAME: &'static str = "sign up";
    const PATH: &'static str = "/api/auth/users/";
    const SUCCESS: StatusCode = StatusCode::CREATED;
}

impl RequestAction for ActivateUser {
    type Payload = ActivationMessage;

    const NAME: &'static str = "account activation";
    const PATH: &'static str = "/api/users/activate/";
    const SUCCESS: StatusCode = StatusCode::OK;
}

/// Registers a new account and dispatches exactly one of
/// [`AuthAction::SignupSuccess`] or [`AuthAction::SignupFail`].
pub async fn sign_up<T, A>(
    transport: &T,
    dispatch: &Dispatch<A>,
    sign_up_user: SignUpUser,
) where
    T: Transport + ?Sized,
    A: From<AuthAction> + Debug,
{
    tracing::debug!("Processing sign up event...");

    let action = match perform(transport, sign_up_user).await {
        Outcome::Success(payload) => {
            tracing::debug!("Signed up successfully. Server responded: {payload}");
            AuthAction::SignupSuccess(payload)
        }
        Outcome::Failure(err) => AuthAction::SignupFail(err),
    };

    dispatch.dispatch(action);
}

/// Activates an account with the uid and token from the activation email.
pub async fn activate<T, A>(
    transport: &T,
    dispatch: &Dispatch<A>,
    activate_user: ActivateUser,
) where
    T: Transport + ?Sized,
    A: From<AuthAction> + Debug,
{
    tracing::debug!("Processing account activation event...");

    let action = match perform(transport, activate_user).await {
        Outcome::Success(activation) => {
            tracing::debug!("Server responded: {}", activation.message);
            AuthAction::ActivationSuccess(activation)
        }
        Outcome::Failure(err) => AuthAction::ActivationFail(err),
    };

    dispatch.dispatch(action);
}
