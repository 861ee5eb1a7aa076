use serde_json::Value;
use shared::models::user::ActivationMessage;

use crate::error::Error;
use crate::store::Reducer;

#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    SignupSuccess(Value),
    SignupFail(Error),
    ActivationSuccess(ActivationMessage),
    ActivationFail(Error),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SignUpStatus {
    #[default]
    Idle,
    /// Holds whatever the server answered with.
    Registered(Value),
    Failed(Error),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ActivationStatus {
    #[default]
    Idle,
    /// Holds the server's confirmation message.
    Activated(ActivationMessage),
    Failed(Error),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthState {
    pub sign_up: SignUpStatus,
    pub activation: ActivationStatus,
}

impl AuthState {
    /// The error of whichever auth step failed last, if any is failed now.
    pub fn failure(&self) -> Option<&Error> {
        match (&self.activation, &self.sign_up) {
            (ActivationStatus::Failed(err), _) => Some(err),
            (_, SignUpStatus::Failed(err)) => Some(err),
            _ => None,
        }
    }
}

impl Reducer for AuthState {
    type Action = AuthAction;

    fn reduce(&mut self, action: AuthAction) {
        match action {
            AuthAction::SignupSuccess(payload) => {
                self.sign_up = SignUpStatus::Registered(payload);
            }
            AuthAction::SignupFail(err) => {
                self.sign_up = SignUpStatus::Failed(err);
            }
            AuthAction::ActivationSuccess(activation) => {
                self.activation = ActivationStatus::Activated(activation);
            }
            AuthAction::ActivationFail(err) => {
                self.activation = ActivationStatus::Failed(err);
            }
        }
    }
}
