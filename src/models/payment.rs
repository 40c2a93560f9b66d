//! Payment (pago CEBA) model and related types

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::{Validate, ValidationError};

use super::{id_from_any, EntityRef, MutationNotices, Notice, PaymentStatus, Resource};

/// Payment registered for a CEBA student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Payment {
    #[serde(rename = "_id", deserialize_with = "id_from_any")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codigo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estudiante: Option<EntityRef>,
    #[validate(length(min = 1, message = "El concepto es requerido"))]
    pub concepto: String,
    #[serde(with = "rust_decimal::serde::float", default)]
    #[validate(custom(function = "positive_amount"))]
    pub monto: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metodo_pago: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha: Option<DateTime<Utc>>,
    #[serde(default)]
    pub estado: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observaciones: Option<String>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Register payment form
#[derive(Debug, Clone, Serialize, Validate)]
pub struct PaymentForm {
    /// Student id
    #[validate(length(min = 1, message = "El estudiante es requerido"))]
    pub estudiante: String,
    #[validate(length(min = 1, message = "El concepto es requerido"))]
    pub concepto: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[validate(custom(function = "positive_amount"))]
    pub monto: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metodo_pago: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observaciones: Option<String>,
}

/// `desde`/`hasta` query parameters accepted by the payment listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Validate)]
#[validate(schema(function = "ordered_range"))]
pub struct DateRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desde: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hasta: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(desde: NaiveDate, hasta: NaiveDate) -> Self {
        Self {
            desde: Some(desde),
            hasta: Some(hasta),
        }
    }
}

/// Body of `PUT /pagos_ceba/estado/:id`
#[derive(Debug, Clone, Serialize)]
pub struct PaymentStatusUpdate<'a> {
    #[serde(rename = "_id")]
    pub id: &'a str,
    pub estado: PaymentStatus,
}

/// The status endpoint wraps the updated payment
#[derive(Debug, Deserialize)]
pub(crate) struct PaymentEnvelope {
    pub pago: Payment,
}

fn positive_amount(monto: &Decimal) -> Result<(), ValidationError> {
    if monto.is_sign_positive() && !monto.is_zero() {
        Ok(())
    } else {
        let mut err = ValidationError::new("positive_amount");
        err.message = Some("El monto debe ser mayor a cero".into());
        Err(err)
    }
}

fn ordered_range(range: &DateRange) -> Result<(), ValidationError> {
    match (range.desde, range.hasta) {
        (Some(desde), Some(hasta)) if desde > hasta => {
            let mut err = ValidationError::new("ordered_range");
            err.message = Some("La fecha inicial no puede ser posterior a la final".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

impl Resource for Payment {
    const PATH: &'static str = "pagos_ceba";
    const NOTICES: MutationNotices = MutationNotices {
        created: Notice {
            title: "PAGO REGISTRADO",
            description: "El pago se ha creado correctamente",
        },
        updated: Notice {
            title: "PAGO MODIFICADO",
            description: "El pago ha sido modificado correctamente",
        },
        deleted: Notice {
            title: "PAGO ELIMINADO",
            description: "El pago se ha eliminado correctamente",
        },
    };

    type Draft = PaymentForm;

    fn id(&self) -> &str {
        &self.id
    }
}
