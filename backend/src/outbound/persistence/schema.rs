//! Diesel table definitions.
//!
//! Kept in sync with `backend/migrations` by hand.

diesel::table! {
    /// Participants and their stamp counts.
    estudiantes (id) {
        id -> Uuid,
        nombre -> Text,
        apellido -> Text,
        codigo -> Text,
        sellos -> Int2,
        created_at -> Timestamptz,
    }
}
