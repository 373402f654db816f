//! Session capability
//!
//! Authentication lives with an external provider; the library only needs
//! the current user id, a change notification and a way to sign out.

use tokio::sync::watch;
use tracing::info;

use crate::model::UserId;

pub trait SessionProvider: Send + Sync {
    fn current_user_id(&self) -> Option<UserId>;

    /// Receiver that observes every sign-in and sign-out
    fn on_session_change(&self) -> watch::Receiver<Option<UserId>>;

    fn sign_out(&self);
}

/// In-process session backed by a watch channel
#[derive(Debug)]
pub struct LocalSession {
    tx: watch::Sender<Option<UserId>>,
}

impl LocalSession {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    pub fn signed_in(user_id: UserId) -> Self {
        let session = Self::new();
        session.sign_in(user_id);
        session
    }

    pub fn sign_in(&self, user_id: UserId) {
        info!("Session started for user {}", user_id);
        self.tx.send_replace(Some(user_id));
    }
}

impl Default for LocalSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionProvider for LocalSession {
    fn current_user_id(&self) -> Option<UserId> {
        self.tx.borrow().clone()
    }

    fn on_session_change(&self) -> watch::Receiver<Option<UserId>> {
        self.tx.subscribe()
    }

    fn sign_out(&self) {
        if let Some(user_id) = self.tx.send_replace(None) {
            info!("Session ended for user {}", user_id);
        }
    }
}
