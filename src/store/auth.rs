//! Authentication slice holding the current session

use std::sync::Arc;
use tokio::sync::RwLock;

use super::status::RequestStatus;
use crate::models::Session;

#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    Pending,
    LoggedIn(Session),
    Rejected(String),
    Logout,
    /// Clear the request flags, keep the session
    Reset,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<Session>,
    pub status: RequestStatus,
}

impl AuthState {
    pub fn reduce(&mut self, action: AuthAction) {
        match action {
            AuthAction::Pending => self.status.pending(),
            AuthAction::LoggedIn(session) => {
                self.status.fulfilled();
                self.user = Some(session);
            }
            AuthAction::Rejected(message) => {
                self.status.rejected(message);
                self.user = None;
            }
            AuthAction::Logout => *self = Self::default(),
            AuthAction::Reset => self.status = RequestStatus::default(),
        }
    }

    /// Token of an authenticated session, if any
    pub fn token(&self) -> Option<&str> {
        self.user
            .as_ref()
            .filter(|user| user.has_token())
            .map(|user| user.token.as_str())
    }
}

#[derive(Clone, Default)]
pub struct AuthHandle {
    inner: Arc<RwLock<AuthState>>,
}

impl AuthHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn dispatch(&self, action: AuthAction) {
        self.inner.write().await.reduce(action);
    }

    pub async fn snapshot(&self) -> AuthState {
        self.inner.read().await.clone()
    }

    pub async fn token(&self) -> Option<String> {
        self.inner.read().await.token().map(str::to_string)
    }

    pub async fn is_authenticated(&self) -> bool {
        self.inner.read().await.token().is_some()
    }
}
