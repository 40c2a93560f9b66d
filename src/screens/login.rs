//! Login screen

use tokio_util::sync::CancellationToken;

use super::{Navigation, ScreenCore};
use crate::{
    error::{AppError, AppResult},
    models::{LoginForm, Modalidad},
    store::RequestStatus,
    AppContext,
};

pub struct LoginScreen {
    core: ScreenCore,
}

impl LoginScreen {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            core: ScreenCore::new(ctx),
        }
    }

    /// Modalities offered by the form with their role labels
    pub fn modalidades() -> [(Modalidad, &'static str); 3] {
        [
            (Modalidad::Ebr, Modalidad::Ebr.login_label()),
            (Modalidad::Ceba, Modalidad::Ceba.login_label()),
            (Modalidad::Residencia, Modalidad::Residencia.login_label()),
        ]
    }

    /// An existing session skips the form
    pub async fn mount(&mut self) -> Navigation {
        self.core.lifetime = CancellationToken::new();
        if self.core.ctx.store.auth.is_authenticated().await {
            Navigation::Home
        } else {
            Navigation::Stay
        }
    }

    pub fn unmount(&mut self) {
        self.core.end();
    }

    /// Validate and log in; a rejected login raises a toast and clears the flags
    pub async fn submit(&self, form: &LoginForm) -> AppResult<Navigation> {
        let auth = self.core.ctx.auth();
        let result = auth.login(form, &self.core.lifetime).await;

        if let Err(AppError::Validation(_)) = &result {
            return result.map(|_| Navigation::Stay);
        }

        let result = self.core.report(result);
        auth.reset().await;
        result.map(|_| Navigation::Home)
    }

    pub async fn status(&self) -> RequestStatus {
        self.core.ctx.store.auth.snapshot().await.status
    }

    pub async fn logout(&self) -> Navigation {
        self.core.ctx.auth().logout().await;
        Navigation::Login
    }
}
