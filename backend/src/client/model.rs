//! Wire shapes consumed by the client views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::MAX_STAMPS;

/// Participant as returned by the API.
///
/// Public endpoints omit `created_at`; admin endpoints include it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: Uuid,
    pub nombre: String,
    pub apellido: String,
    pub codigo: String,
    pub sellos: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Student {
    /// `"nombre apellido"` as shown in lists.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.nombre, self.apellido)
    }

    /// Whether the card holds every stamp.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.sellos >= MAX_STAMPS
    }

    pub(crate) fn matches_filter(&self, needle: &str) -> bool {
        format!("{} {} {}", self.nombre, self.apellido, self.codigo)
            .to_lowercase()
            .contains(needle)
    }
}

/// Body of a create request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    pub nombre: String,
    pub apellido: String,
    pub codigo: String,
}

impl NewStudent {
    /// True when any field is blank after trimming.
    #[must_use]
    pub fn has_blank_field(&self) -> bool {
        [&self.nombre, &self.apellido, &self.codigo]
            .iter()
            .any(|field| field.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct StudentList {
    pub students: Vec<Student>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StudentEnvelope {
    pub student: Student,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: Option<String>,
}
