use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::store::auth::AuthAction;

/// How long a toast stays up unless dismissed earlier.
pub const AUTO_CLOSE: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
    pub created_at: Instant,
}

#[derive(Debug, Clone)]
pub struct ToastState {
    toasts: VecDeque<Toast>,
    next_id: u64,
    auto_close: Duration,
}

impl Default for ToastState {
    fn default() -> Self {
        Self::with_auto_close(AUTO_CLOSE)
    }
}

impl ToastState {
    pub fn with_auto_close(auto_close: Duration) -> Self {
        Self { toasts: VecDeque::new(), next_id: 0, auto_close }
    }

    pub fn push(
        &mut self,
        level: ToastLevel,
        message: impl Into<String>,
        now: Instant,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push_back(Toast {
            id,
            level,
            message: message.into(),
            created_at: now,
        });
        id
    }

    /// Shows the user facing message for an auth action. Error details are
    /// never part of the message.
    pub fn notify(&mut self, action: &AuthAction, now: Instant) {
        let (level, message) = match action {
            AuthAction::SignupSuccess(_) => (
                ToastLevel::Success,
                "Account created. Check your email to activate it.",
            ),
            AuthAction::SignupFail(_) => (
                ToastLevel::Error,
                "Sign up failed. Please check your details and try again.",
            ),
            AuthAction::ActivationSuccess(_) => {
                (ToastLevel::Success, "Account activated. You can now sign in.")
            }
            AuthAction::ActivationFail(_) => (
                ToastLevel::Error,
                "Account activation failed. The link may have expired.",
            ),
        };

        self.push(level, message, now);
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != id);
        self.toasts.len() != before
    }

    /// Drops toasts that have been visible for the auto close duration.
    pub fn prune(&mut self, now: Instant) -> usize {
        let before = self.toasts.len();
        let auto_close = self.auto_close;
        self.toasts.retain(|toast| {
            now.saturating_duration_since(toast.created_at) < auto_close
        });
        before - self.toasts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
