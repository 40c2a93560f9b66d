//! Session user and login form

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use super::Modalidad;
use crate::error::{AppError, AppResult};

/// Authenticated user as kept by the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub correo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modalidad: Option<Modalidad>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    pub token: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Session {
    pub fn has_token(&self) -> bool {
        !self.token.trim().is_empty()
    }

    /// Build a session from the login response.
    ///
    /// The backend either answers with the user document carrying `token`, or
    /// with `{ usuario: {...}, token }`.
    pub fn from_login_response(body: Value) -> AppResult<Self> {
        let Value::Object(mut root) = body else {
            return Err(AppError::Validation("Respuesta de login inválida".to_string()));
        };

        let nested = root
            .remove("usuario")
            .or_else(|| root.remove("user"));

        let merged = match nested {
            Some(Value::Object(mut user)) => {
                if let Some(token) = root.remove("token") {
                    user.insert("token".to_string(), token);
                }
                user
            }
            _ => root,
        };

        Ok(serde_json::from_value(Value::Object(merged))?)
    }
}

/// Login form
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct LoginForm {
    #[validate(
        length(min = 1, message = "El correo es requerido"),
        email(message = "Ingrese un correo válido")
    )]
    pub correo: String,
    #[validate(length(min = 1, message = "La contraseña es requerida"))]
    pub password: String,
    #[validate(required(message = "La modalidad es requerida"))]
    pub modalidad: Option<Modalidad>,
}
