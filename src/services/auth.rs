//! Authentication endpoint

use reqwest::Method;
use serde_json::Value;

use super::ApiClient;
use crate::{
    error::AppResult,
    models::{LoginForm, Session},
};

#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Authenticate with email, password and modality
    pub async fn login(&self, form: &LoginForm) -> AppResult<Session> {
        tracing::debug!(correo = %form.correo, modalidad = ?form.modalidad, "POST login");
        let body: Value = self
            .api
            .send(self.api.request(Method::POST, "auth/login", None).json(form))
            .await?;
        Session::from_login_response(body)
    }
}
