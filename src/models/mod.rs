//! Data models for the SGE backend resources

pub mod book;
pub mod enums;
pub mod grade;
pub mod loan;
pub mod payment;
pub mod subject;
pub mod user;

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

// Re-export commonly used types
pub use book::{Book, BookForm};
pub use enums::{Modalidad, ModalidadFilter, PaymentStatus};
pub use grade::{Grade, GradeForm};
pub use loan::{Loan, LoanForm, ReturnForm};
pub use payment::{DateRange, Payment, PaymentForm};
pub use subject::{Subject, SubjectForm};
pub use user::{LoginForm, Session};

/// Success notification text for one kind of mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    pub title: &'static str,
    pub description: &'static str,
}

/// Notifications shown after each successful mutation of a resource
#[derive(Debug, Clone, Copy)]
pub struct MutationNotices {
    pub created: Notice,
    pub updated: Notice,
    pub deleted: Notice,
}

/// A backend entity type managed through the generic slice
///
/// `PATH` is the endpoint segment under the API base URL. Records are
/// identified by the backend's `_id` field.
pub trait Resource:
    Clone + std::fmt::Debug + PartialEq + Serialize + DeserializeOwned + Validate + Send + Sync + 'static
{
    const PATH: &'static str;
    const NOTICES: MutationNotices;

    /// Form payload used to create a record
    type Draft: Serialize + Validate + Send + Sync;

    fn id(&self) -> &str;
}

/// Reference to another entity, either a bare id or a populated document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityRef {
    Id(String),
    Populated(RefRecord),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefRecord {
    #[serde(rename = "_id", deserialize_with = "id_from_any")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EntityRef {
    pub fn id(&self) -> &str {
        match self {
            EntityRef::Id(id) => id,
            EntityRef::Populated(record) => &record.id,
        }
    }

    /// Name carried by a populated reference
    pub fn nombre(&self) -> Option<&str> {
        match self {
            EntityRef::Id(_) => None,
            EntityRef::Populated(record) => record.nombre.as_deref(),
        }
    }
}

/// Accept identifiers sent either as strings or as numbers
pub(crate) fn id_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number identifier, got {}",
            other
        ))),
    }
}
