//! Book (libro) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use super::{id_from_any, EntityRef, MutationNotices, Notice, Resource};

/// Library book; `grado` is populated by the backend on list/get
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Book {
    #[serde(rename = "_id", deserialize_with = "id_from_any")]
    pub id: String,
    #[validate(length(min = 1, message = "El código es requerido"))]
    pub codigo: String,
    #[validate(length(min = 1, message = "El nombre es requerido"))]
    pub nombre: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub titulo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editorial: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grado: Option<EntityRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cantidad: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observaciones: Option<String>,
    #[serde(default)]
    pub estado: bool,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Book {
    /// Copies on hand, a missing count reads as zero
    pub fn cantidad_or_zero(&self) -> u32 {
        self.cantidad.unwrap_or(0)
    }
}

/// Create book form
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct BookForm {
    #[validate(length(min = 1, message = "El código es requerido"))]
    pub codigo: String,
    #[validate(length(min = 1, message = "El nombre es requerido"))]
    pub nombre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub titulo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editorial: Option<String>,
    /// Grade id the book belongs to
    #[validate(length(min = 1, message = "El grado es requerido"))]
    pub grado: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cantidad: Option<u32>,
    #[validate(url(message = "La imagen debe ser una URL válida"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observaciones: Option<String>,
    pub estado: bool,
}

impl Resource for Book {
    const PATH: &'static str = "libros";
    const NOTICES: MutationNotices = MutationNotices {
        created: Notice {
            title: "LIBRO REGISTRADO",
            description: "El libro se ha creado correctamente",
        },
        updated: Notice {
            title: "LIBRO MODIFICADO",
            description: "El libro ha sido modificado correctamente",
        },
        deleted: Notice {
            title: "LIBRO ELIMINADO",
            description: "El libro se ha eliminado correctamente",
        },
    };

    type Draft = BookForm;

    fn id(&self) -> &str {
        &self.id
    }
}
