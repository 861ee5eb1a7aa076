use std::fmt::Debug;
use std::time::Instant;

use tokio::sync::{mpsc, watch};

pub mod auth;
pub mod toast;

use auth::{AuthAction, AuthState};
use toast::ToastState;

/// State that knows how to apply its own actions.
pub trait Reducer {
    type Action: Debug;

    fn reduce(&mut self, action: Self::Action);
}

/// Owns the application state. Actions arrive through [`Dispatch`] handles
/// and are applied in the order they were sent.
pub struct Store<S: Reducer> {
    state: watch::Sender<S>,
    receiver: mpsc::UnboundedReceiver<S::Action>,
}

impl<S: Reducer> Store<S> {
    pub fn new(state: S) -> (Self, Dispatch<S::Action>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let (state, _) = watch::channel(state);

        (Self { state, receiver }, Dispatch { sender })
    }

    pub fn apply(&mut self, action: S::Action) {
        tracing::debug!("Applying {:?}", action);
        self.state.send_modify(|state| state.reduce(action));
    }

    /// Applies every action queued so far and returns how many there were.
    pub fn process_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(action) = self.receiver.try_recv() {
            self.apply(action);
            applied += 1;
        }
        applied
    }

    /// Waits for the next action and applies it. Returns `false` once every
    /// dispatch handle is gone and the queue is empty.
    pub async fn next(&mut self) -> bool {
        match self.receiver.recv().await {
            Some(action) => {
                self.apply(action);
                true
            }
            None => false,
        }
    }

    pub fn state(&self) -> watch::Ref<'_, S> {
        self.state.borrow()
    }

    /// Observers are woken after every applied action.
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.state.subscribe()
    }
}

/// Write only handle into a [`Store`].
#[derive(Debug)]
pub struct Dispatch<A> {
    sender: mpsc::UnboundedSender<A>,
}

impl<A> Clone for Dispatch<A> {
    fn clone(&self) -> Self {
        Self { sender: self.sender.clone() }
    }
}

impl<A: Debug> Dispatch<A> {
    pub fn dispatch(&self, action: impl Into<A>) {
        if let Err(err) = self.sender.send(action.into()) {
            tracing::warn!("Store is gone, dropping {:?}", err.0);
        }
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::From)]
pub enum AppAction {
    Auth(AuthAction),
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub auth: AuthState,
    pub toasts: ToastState,
}

impl Reducer for AppState {
    type Action = AppAction;

    fn reduce(&mut self, action: AppAction) {
        match action {
            AppAction::Auth(action) => {
                self.toasts.notify(&action, Instant::now());
                self.auth.reduce(action);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tracing_test::traced_test;

    use super::auth::SignUpStatus;
    use super::*;

    #[derive(Debug, Default)]
    struct Counter(i64);

    impl Reducer for Counter {
        type Action = i64;

        fn reduce(&mut self, action: i64) {
            self.0 += action;
        }
    }

    #[test]
    fn applies_queued_actions_in_order() {
        let (mut store, dispatch) = Store::new(Counter::default());

        dispatch.dispatch(2_i64);
        dispatch.clone().dispatch(-5_i64);

        assert_eq!(store.state().0, 0);
        assert_eq!(store.process_pending(), 2);
        assert_eq!(store.state().0, -3);
        assert_eq!(store.process_pending(), 0);
    }

    #[tokio::test]
    async fn next_stops_when_dispatchers_are_gone() {
        let (mut store, dispatch) = Store::new(Counter::default());

        dispatch.dispatch(1_i64);
        drop(dispatch);

        assert!(store.next().await);
        assert!(!store.next().await);
        assert_eq!(store.state().0, 1);
    }

    #[test]
    #[traced_test]
    fn dispatch_after_store_dropped_is_ignored() {
        let (store, dispatch) = Store::new(Counter::default());
        drop(store);

        dispatch.dispatch(1_i64);

        assert!(logs_contain("Store is gone"));
    }

    #[test]
    fn subscribers_see_updates() {
        let (mut store, dispatch) = Store::new(Counter::default());
        let mut subscriber = store.subscribe();

        dispatch.dispatch(4_i64);
        store.process_pending();

        assert!(subscriber.has_changed().unwrap());
        assert_eq!(subscriber.borrow_and_update().0, 4);
    }

    #[test]
    fn app_state_routes_auth_actions() {
        let (mut store, dispatch) = Store::new(AppState::default());

        dispatch.dispatch(AuthAction::SignupSuccess(json!({"id": 1})));
        store.process_pending();

        let state = store.state();
        assert_eq!(state.auth.sign_up, SignUpStatus::Registered(json!({"id": 1})));
        assert_eq!(state.toasts.len(), 1);
    }
}
