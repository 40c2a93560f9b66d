//! HTTP service layer: one thin wrapper per backend endpoint

pub mod auth;
pub mod payments;
pub mod resource;

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::{
    config::{ApiConfig, AppConfig},
    error::{AppError, AppResult, ErrorBody},
    models::{Book, Grade, Loan, Payment, Subject},
    notify::Notifier,
};

pub use resource::ResourceService;

/// Shared HTTP client bound to the backend base URL
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token_header: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Reuse an existing [`reqwest::Client`] and its connection pool
    pub fn with_client(http: reqwest::Client, config: &ApiConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token_header: config.token_header.clone(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Start a request, attaching the session token when one is given
    pub fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match token {
            Some(token) => builder.header(self.token_header.as_str(), token),
            None => builder,
        }
    }

    /// Send the request and decode a JSON body
    pub async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> AppResult<T> {
        let response = Self::ensure_success(builder.send().await?).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Send the request, ignoring any body on success
    pub async fn send_unit(&self, builder: RequestBuilder) -> AppResult<()> {
        Self::ensure_success(builder.send().await?).await?;
        Ok(())
    }

    async fn ensure_success(response: Response) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let msg = ErrorBody::parse(&body).message();
        tracing::debug!(status = status.as_u16(), msg = ?msg, "Backend rejected request");

        Err(AppError::Api {
            status: status.as_u16(),
            msg,
        })
    }
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub subjects: ResourceService<Subject>,
    pub grades: ResourceService<Grade>,
    pub books: ResourceService<Book>,
    pub payments: ResourceService<Payment>,
    pub loans: ResourceService<Loan>,
}

impl Services {
    /// Create all services sharing one HTTP client
    pub fn new(config: &AppConfig, notifier: Arc<dyn Notifier>) -> Self {
        let api = ApiClient::new(&config.api);
        let durations = config.notifications.clone();

        Self {
            auth: auth::AuthService::new(api.clone()),
            subjects: ResourceService::new(api.clone(), notifier.clone(), durations.clone()),
            grades: ResourceService::new(api.clone(), notifier.clone(), durations.clone()),
            books: ResourceService::new(api.clone(), notifier.clone(), durations.clone()),
            payments: ResourceService::new(api.clone(), notifier.clone(), durations.clone()),
            loans: ResourceService::new(api, notifier, durations),
        }
    }
}
