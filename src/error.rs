//! Error types for the SGE client

use serde::Deserialize;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request failed with status code {status}")]
    Api {
        status: u16,
        /// Message reported by the backend in its error body, if any
        msg: Option<String>,
    },

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl AppError {
    /// Message stored in a slice when an operation is rejected.
    ///
    /// The backend's own `msg` wins, then the error's display text, then the
    /// debug rendering of the error.
    pub fn user_message(&self) -> String {
        if let AppError::Api { msg: Some(msg), .. } = self {
            if !msg.trim().is_empty() {
                return msg.clone();
            }
        }

        let generic = self.to_string();
        if !generic.trim().is_empty() {
            return generic;
        }

        format!("{:?}", self)
    }

    /// Whether the error should send the user back to the login screen
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            AppError::Unauthenticated | AppError::Api { status: 401, .. }
        )
    }
}

/// Error body returned by the backend
///
/// Business errors carry a top-level `msg`; field validation failures carry an
/// `errors` array whose entries each have a `msg`.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Deserialize)]
pub struct FieldError {
    #[serde(default)]
    pub msg: Option<String>,
}

impl ErrorBody {
    /// Parse an error body, tolerating empty or non-JSON payloads
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }

    pub fn message(self) -> Option<String> {
        self.msg
            .or_else(|| self.errors.into_iter().find_map(|e| e.msg))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("{}: {}", field, e.code),
                })
            })
            .collect();
        messages.sort();
        AppError::Validation(messages.join(", "))
    }
}

/// Result type alias for client operations
pub type AppResult<T> = Result<T, AppError>;
