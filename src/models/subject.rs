//! Subject (asignatura) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use super::{id_from_any, Modalidad, MutationNotices, Notice, Resource};

/// Subject as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Subject {
    #[serde(rename = "_id", deserialize_with = "id_from_any")]
    pub id: String,
    #[validate(length(min = 1, message = "El nombre es requerido"))]
    pub nombre: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nivel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modalidad: Option<Modalidad>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub estado: bool,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Create subject form
#[derive(Debug, Clone, Serialize, Validate)]
pub struct SubjectForm {
    #[validate(length(min = 1, message = "El nombre es requerido"))]
    pub nombre: String,
    #[validate(length(min = 1, message = "El nivel es requerido"))]
    pub nivel: String,
    #[validate(required(message = "La modalidad es requerida"))]
    pub modalidad: Option<Modalidad>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    pub estado: bool,
}

impl Default for SubjectForm {
    fn default() -> Self {
        Self {
            nombre: String::new(),
            nivel: String::new(),
            modalidad: None,
            descripcion: None,
            estado: true,
        }
    }
}

impl Resource for Subject {
    const PATH: &'static str = "asignaturas";
    const NOTICES: MutationNotices = MutationNotices {
        created: Notice {
            title: "ASIGNATURA REGISTRADA",
            description: "La asignatura se ha creado correctamente",
        },
        updated: Notice {
            title: "ASIGNATURA MODIFICADA",
            description: "La asignatura ha sido modificada correctamente",
        },
        deleted: Notice {
            title: "ASIGNATURA ELIMINADA",
            description: "La asignatura se ha eliminado correctamente",
        },
    };

    type Draft = SubjectForm;

    fn id(&self) -> &str {
        &self.id
    }
}
