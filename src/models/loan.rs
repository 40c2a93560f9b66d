//! Map loan (préstamo de mapas) model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use super::{id_from_any, EntityRef, MutationNotices, Notice, Resource};

/// Loan of a map to a student; the return fields stay empty until the map is back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Loan {
    #[serde(rename = "_id", deserialize_with = "id_from_any")]
    pub id: String,
    #[validate(length(min = 1, message = "El código es requerido"))]
    pub codigo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estudiante: Option<EntityRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapa: Option<EntityRef>,
    /// Dates are kept as the backend sent them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_prestamo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion_prestamo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_devolucion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion_devolucion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observaciones: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estado: Option<String>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Loan {
    pub fn is_returned(&self) -> bool {
        self.descripcion_devolucion.is_some() || self.fecha_devolucion.is_some()
    }

    /// The loan with the return registered, ready to be sent as an update
    pub fn with_return(&self, form: &ReturnForm) -> Loan {
        let mut loan = self.clone();
        loan.codigo = form.codigo.to_uppercase();
        if let Some(fecha) = form.fecha_devolucion {
            loan.fecha_devolucion = Some(fecha.format("%Y-%m-%d").to_string());
        }
        loan.descripcion_devolucion = Some(form.descripcion_devolucion.clone());
        if form.observaciones.is_some() {
            loan.observaciones = form.observaciones.clone();
        }
        loan
    }
}

/// Register loan form
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct LoanForm {
    #[validate(length(min = 1, message = "El código es requerido"))]
    pub codigo: String,
    /// Student id
    #[validate(length(min = 1, message = "El estudiante es requerido"))]
    pub estudiante: String,
    /// Map id
    #[validate(length(min = 1, message = "El mapa es requerido"))]
    pub mapa: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_prestamo: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion_prestamo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observaciones: Option<String>,
}

/// Register return form
#[derive(Debug, Clone, Default, Validate)]
pub struct ReturnForm {
    #[validate(length(min = 1, message = "El código es requerido"))]
    pub codigo: String,
    pub fecha_devolucion: Option<NaiveDate>,
    #[validate(length(min = 1, message = "La descripción de la devolución es requerida"))]
    pub descripcion_devolucion: String,
    pub observaciones: Option<String>,
}

impl Resource for Loan {
    const PATH: &'static str = "prestamos_mapas";
    const NOTICES: MutationNotices = MutationNotices {
        created: Notice {
            title: "PRESTAMO REGISTRADO",
            description: "El préstamo se ha registrado correctamente",
        },
        updated: Notice {
            title: "PRESTAMO MODIFICADO",
            description: "El préstamo ha sido modificado correctamente",
        },
        deleted: Notice {
            title: "PRESTAMO ELIMINADO",
            description: "El préstamo se ha eliminado correctamente",
        },
    };

    type Draft = LoanForm;

    fn id(&self) -> &str {
        &self.id
    }
}
