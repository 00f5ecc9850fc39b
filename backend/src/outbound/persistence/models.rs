//! Diesel row types for the `estudiantes` table.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::estudiantes;

/// Row read back from `estudiantes`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = estudiantes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ParticipantRow {
    pub id: Uuid,
    pub nombre: String,
    pub apellido: String,
    pub codigo: String,
    pub sellos: i16,
    pub created_at: DateTime<Utc>,
}

/// Insert payload; the store assigns `id` and `created_at`.
#[derive(Debug, Insertable)]
#[diesel(table_name = estudiantes)]
pub(crate) struct NewParticipantRow<'a> {
    pub nombre: &'a str,
    pub apellido: &'a str,
    pub codigo: &'a str,
    pub sellos: i16,
}
