//! Application state store.
//!
//! Holds who is signed in. The store is an ordinary value handed to whatever
//! needs it; readers subscribe through a `watch` channel and are woken only
//! when the state actually changes.

use std::sync::Arc;
use tokio::sync::watch;

use crate::models::User;
use crate::types::UserId;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub user: Option<User>,
    pub admin: Option<User>,
}

impl SessionState {
    pub fn user_id(&self) -> Option<&UserId> {
        self.user.as_ref().map(|u| &u.id)
    }

    pub fn admin_id(&self) -> Option<&UserId> {
        self.admin.as_ref().map(|a| &a.id)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    tx: Arc<watch::Sender<SessionState>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::with_state(SessionState::default())
    }

    pub fn with_state(state: SessionState) -> Self {
        let (tx, _rx) = watch::channel(state);
        Self { tx: Arc::new(tx) }
    }

    pub fn snapshot(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    pub fn current_user_id(&self) -> Option<UserId> {
        self.tx.borrow().user_id().cloned()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }

    pub fn sign_in(&self, user: User) {
        tracing::debug!(user_id = %user.id, "session sign in");
        self.update(|state| replace(&mut state.user, Some(user)));
    }

    pub fn sign_out(&self) {
        tracing::debug!("session sign out");
        self.update(|state| replace(&mut state.user, None));
    }

    pub fn admin_sign_in(&self, admin: User) {
        tracing::debug!(admin_id = %admin.id, "admin session sign in");
        self.update(|state| replace(&mut state.admin, Some(admin)));
    }

    pub fn admin_sign_out(&self) {
        self.update(|state| replace(&mut state.admin, None));
    }

    fn update(&self, modify: impl FnOnce(&mut SessionState) -> bool) {
        self.tx.send_if_modified(modify);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Swap in `value`, reporting whether anything changed
fn replace(slot: &mut Option<User>, value: Option<User>) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}
