//! Headless screens: guard on the session, load slices on mount, derive
//! table rows, forward form submissions, reset on unmount.

pub mod books;
pub mod grades;
pub mod loans;
pub mod login;
pub mod payments;
pub mod subjects;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::{
    error::{AppError, AppResult},
    notify::Toast,
    store::RequestStatus,
    AppContext,
};

pub use books::BooksScreen;
pub use grades::GradesScreen;
pub use loans::LoansScreen;
pub use login::LoginScreen;
pub use payments::PaymentsScreen;
pub use subjects::SubjectsScreen;

/// Where the user should be after a screen action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    Login,
    Home,
}

impl Navigation {
    /// `Login` when `result` failed because the session is missing or rejected
    pub fn after<T>(result: &AppResult<T>) -> Navigation {
        match result {
            Err(err) if err.requires_login() => Navigation::Login,
            _ => Navigation::Stay,
        }
    }
}

/// Column headers plus one line of cells per record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

#[async_trait]
pub trait Screen: Send + Sync {
    /// Check the session and load the screen's collections
    async fn mount(&mut self) -> Navigation;

    /// Cancel pending operations and reset the screen's slices
    async fn unmount(&mut self);

    /// Rows as currently derived from the slices
    async fn table(&self) -> Table;

    async fn status(&self) -> RequestStatus;
}

/// Context plus the cancellation token of the current mount
pub(crate) struct ScreenCore {
    pub ctx: AppContext,
    pub lifetime: CancellationToken,
}

impl ScreenCore {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            lifetime: CancellationToken::new(),
        }
    }

    /// Start a new mount; returns `Login` when there is no session
    pub async fn begin(&mut self) -> Navigation {
        self.lifetime = CancellationToken::new();
        if self.ctx.store.auth.is_authenticated().await {
            Navigation::Stay
        } else {
            tracing::debug!("No session, redirecting to login");
            Navigation::Login
        }
    }

    pub fn end(&self) {
        self.lifetime.cancel();
    }

    /// Surface a failed operation as an error toast.
    ///
    /// Form validation errors and cancellations stay silent.
    pub fn report<T>(&self, result: AppResult<T>) -> AppResult<T> {
        if let Err(err) = &result {
            if !matches!(err, AppError::Validation(_) | AppError::Cancelled) {
                self.ctx.notifier.notify(Toast::error(
                    err.user_message(),
                    self.ctx.config.notifications.error_duration_ms,
                ));
            }
        }
        result
    }

    /// Report the result; a rejected session is also cleared so that every
    /// later mount redirects to login.
    pub async fn settle<T>(&self, result: AppResult<T>) -> AppResult<T> {
        let result = self.report(result);
        if Navigation::after(&result) == Navigation::Login {
            tracing::info!("Session rejected by the backend, logging out");
            self.ctx.auth().logout().await;
        }
        result
    }

    /// Navigation after the loads issued on mount
    pub async fn after_load(&self, results: impl IntoIterator<Item = AppResult<()>>) -> Navigation {
        let mut navigation = Navigation::Stay;
        for result in results {
            let result = self.settle(result).await;
            if Navigation::after(&result) == Navigation::Login {
                navigation = Navigation::Login;
            }
        }
        navigation
    }
}
