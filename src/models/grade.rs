//! Grade (grado) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use super::{id_from_any, Modalidad, MutationNotices, Notice, Resource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Grade {
    #[serde(rename = "_id", deserialize_with = "id_from_any")]
    pub id: String,
    #[validate(length(min = 1, message = "El nombre es requerido"))]
    pub nombre: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nivel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modalidad: Option<Modalidad>,
    #[serde(default)]
    pub estado: bool,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct GradeForm {
    #[validate(length(min = 1, message = "El nombre es requerido"))]
    pub nombre: String,
    #[validate(length(min = 1, message = "El nivel es requerido"))]
    pub nivel: String,
    #[validate(required(message = "La modalidad es requerida"))]
    pub modalidad: Option<Modalidad>,
    pub estado: bool,
}

impl Resource for Grade {
    const PATH: &'static str = "grados";
    const NOTICES: MutationNotices = MutationNotices {
        created: Notice {
            title: "GRADO REGISTRADO",
            description: "El grado se ha creado correctamente",
        },
        updated: Notice {
            title: "GRADO MODIFICADO",
            description: "El grado ha sido modificado correctamente",
        },
        deleted: Notice {
            title: "GRADO ELIMINADO",
            description: "El grado se ha eliminado correctamente",
        },
    };

    type Draft = GradeForm;

    fn id(&self) -> &str {
        &self.id
    }
}
