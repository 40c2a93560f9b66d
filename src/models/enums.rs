//! Shared domain enums

use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Modalidad
// ---------------------------------------------------------------------------

/// Teaching modality a record belongs to, also selected at login.
///
/// Values the client does not know are kept verbatim in `Other` so that an
/// update sends them back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Modalidad {
    Ebr,
    Ceba,
    Residencia,
    Other(String),
}

impl Modalidad {
    pub fn as_str(&self) -> &str {
        match self {
            Modalidad::Ebr => "EBR",
            Modalidad::Ceba => "CEBA",
            Modalidad::Residencia => "RESIDENCIA",
            Modalidad::Other(raw) => raw,
        }
    }

    /// Role label shown next to the modality on the login form
    pub fn login_label(&self) -> &'static str {
        match self {
            Modalidad::Ebr => "ADMINISTRADOR",
            Modalidad::Ceba => "DOCENTES",
            Modalidad::Residencia => "ALUMNO",
            Modalidad::Other(_) => "DESCONOCIDO",
        }
    }
}

impl From<String> for Modalidad {
    fn from(value: String) -> Self {
        match value.as_str() {
            "EBR" => Modalidad::Ebr,
            "CEBA" => Modalidad::Ceba,
            "RESIDENCIA" => Modalidad::Residencia,
            _ => Modalidad::Other(value),
        }
    }
}

impl From<Modalidad> for String {
    fn from(value: Modalidad) -> Self {
        match value {
            Modalidad::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Modalidad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Modalidad {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "EBR" => Ok(Modalidad::Ebr),
            "CEBA" => Ok(Modalidad::Ceba),
            // Older login forms sent the misspelled value
            "RESIDENCIA" | "REDIDENCIA" => Ok(Modalidad::Residencia),
            other => Err(format!("Unknown modalidad: {}", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Modalidad filter
// ---------------------------------------------------------------------------

/// Client-side table filter; `TODOS` shows every record
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalidadFilter {
    #[default]
    All,
    Only(Modalidad),
}

impl ModalidadFilter {
    pub fn matches(&self, modalidad: Option<&Modalidad>) -> bool {
        match self {
            ModalidadFilter::All => true,
            ModalidadFilter::Only(wanted) => modalidad == Some(wanted),
        }
    }
}

impl FromStr for ModalidadFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("TODOS") {
            return Ok(ModalidadFilter::All);
        }
        s.parse().map(ModalidadFilter::Only)
    }
}

// ---------------------------------------------------------------------------
// PaymentStatus
// ---------------------------------------------------------------------------

/// Payment state as tracked by the backend; unknown states are kept verbatim
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentStatus {
    #[default]
    Pendiente,
    Cancelado,
    Anulado,
    Other(String),
}

impl PaymentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PaymentStatus::Pendiente => "PENDIENTE",
            PaymentStatus::Cancelado => "CANCELADO",
            PaymentStatus::Anulado => "ANULADO",
            PaymentStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for PaymentStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "PENDIENTE" => PaymentStatus::Pendiente,
            "CANCELADO" => PaymentStatus::Cancelado,
            "ANULADO" => PaymentStatus::Anulado,
            _ => PaymentStatus::Other(value),
        }
    }
}

impl From<PaymentStatus> for String {
    fn from(value: PaymentStatus) -> Self {
        match value {
            PaymentStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Label for boolean `estado` columns
pub fn estado_label(estado: bool) -> &'static str {
    if estado {
        "ACTIVO"
    } else {
        "INACTIVO"
    }
}
