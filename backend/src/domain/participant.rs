//! Participant model and the pure validation rules guarding it.
//!
//! Field names follow the `estudiantes` table and the JSON wire format
//! (`nombre`, `apellido`, `codigo`, `sellos`) so values flow through every
//! layer without renaming.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stamps needed to complete a card.
pub const MAX_STAMPS: u8 = 7;
/// Minimum trimmed length of a search term.
pub const SEARCH_TERM_MIN_CHARS: usize = 2;
/// Upper bound on rows returned by a search.
pub const SEARCH_RESULT_LIMIT: usize = 20;

/// Validation failures for participant input.
///
/// Display strings are the user-facing messages returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParticipantValidationError {
    /// One or more of `nombre`, `apellido`, `codigo` is blank.
    #[error("Nombre, apellido y código son obligatorios")]
    MissingFields { fields: Vec<&'static str> },
    /// The stamp count is not an integer in `[0, 7]`.
    #[error("Sellos debe ser un número entre 0 y 7")]
    StampsOutOfRange,
    /// The search term is shorter than two characters once trimmed.
    #[error("La búsqueda debe tener al menos 2 caracteres")]
    SearchTermTooShort,
}

/// Opaque participant identifier assigned by the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(Uuid);

impl ParticipantId {
    /// Wrap an identifier produced by the store.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse a caller-supplied identifier.
    ///
    /// Returns `None` for text that is not a UUID; such an id cannot match
    /// any stored participant.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim()).ok().map(Self)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique participant code (carnet), trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParticipantCode(String);

impl ParticipantCode {
    /// Borrow the code text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ParticipantCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stamp count bounded to `[0, MAX_STAMPS]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct StampCount(u8);

impl StampCount {
    /// An empty card.
    pub const ZERO: Self = Self(0);
    /// A completed card.
    pub const FULL: Self = Self(MAX_STAMPS);

    /// Numeric value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Apply `delta`, clamping the result into `[0, MAX_STAMPS]`.
    ///
    /// # Examples
    /// ```
    /// use stampcard::domain::StampCount;
    ///
    /// assert_eq!(StampCount::FULL.adjusted(1), StampCount::FULL);
    /// assert_eq!(StampCount::ZERO.adjusted(-1), StampCount::ZERO);
    /// ```
    #[must_use]
    pub fn adjusted(self, delta: i32) -> Self {
        let target = i32::from(self.0).saturating_add(delta);
        let clamped = target.clamp(0, i32::from(MAX_STAMPS));
        Self(u8::try_from(clamped).unwrap_or(MAX_STAMPS))
    }

    /// Stamps still missing before the card is complete.
    #[must_use]
    pub const fn remaining(self) -> u8 {
        MAX_STAMPS - self.0
    }

    /// Whether all stamps have been collected.
    #[must_use]
    pub const fn is_complete(self) -> bool {
        self.0 >= MAX_STAMPS
    }
}

impl TryFrom<i64> for StampCount {
    type Error = ParticipantValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        validate_stamp_count(value)
    }
}

impl From<StampCount> for u8 {
    fn from(value: StampCount) -> Self {
        value.0
    }
}

impl fmt::Display for StampCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Normalised search term: trimmed, lowercase, at least two characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Borrow the normalised term.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Build a `%term%` pattern for case-insensitive `LIKE` matching.
    ///
    /// `%`, `_` and the escape character itself are escaped so they match
    /// literally.
    ///
    /// # Examples
    /// ```
    /// use stampcard::domain::normalize_search_term;
    ///
    /// let term = normalize_search_term("50%_off").expect("valid term");
    /// assert_eq!(term.like_pattern(), r"%50\%\_off%");
    /// ```
    #[must_use]
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.0.len() + 2);
        pattern.push('%');
        for ch in self.0.chars() {
            if matches!(ch, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(ch);
        }
        pattern.push('%');
        pattern
    }

    /// Case-insensitive substring match against name, surname or code.
    #[must_use]
    pub fn matches(&self, participant: &Participant) -> bool {
        [&participant.nombre, &participant.apellido, &participant.codigo]
            .into_iter()
            .any(|field| field.to_lowercase().contains(self.0.as_str()))
    }
}

/// Validated input for registering a participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewParticipant {
    pub nombre: String,
    pub apellido: String,
    pub codigo: ParticipantCode,
}

/// A participant as held by the record store.
///
/// ## Invariants
/// - `codigo` is unique across participants.
/// - `sellos` lies in `[0, MAX_STAMPS]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: ParticipantId,
    pub nombre: String,
    pub apellido: String,
    pub codigo: String,
    pub sellos: StampCount,
    pub created_at: DateTime<Utc>,
}

/// Check that all three fields are non-empty once trimmed and return the
/// trimmed values.
///
/// # Examples
/// ```
/// use stampcard::domain::validate_new_participant;
///
/// let new = validate_new_participant(" Ana ", "Lopez", "A1").expect("valid");
/// assert_eq!(new.nombre, "Ana");
/// assert!(validate_new_participant("Ana", "  ", "A1").is_err());
/// ```
pub fn validate_new_participant(
    nombre: &str,
    apellido: &str,
    codigo: &str,
) -> Result<NewParticipant, ParticipantValidationError> {
    let (nombre, apellido, codigo) = (nombre.trim(), apellido.trim(), codigo.trim());
    let fields: Vec<&'static str> = [("nombre", nombre), ("apellido", apellido), ("codigo", codigo)]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect();
    if !fields.is_empty() {
        return Err(ParticipantValidationError::MissingFields { fields });
    }

    Ok(NewParticipant {
        nombre: nombre.to_owned(),
        apellido: apellido.to_owned(),
        codigo: ParticipantCode(codigo.to_owned()),
    })
}

/// Accept only integers in `[0, MAX_STAMPS]`.
pub fn validate_stamp_count(value: i64) -> Result<StampCount, ParticipantValidationError> {
    u8::try_from(value)
        .ok()
        .filter(|count| *count <= MAX_STAMPS)
        .map(StampCount)
        .ok_or(ParticipantValidationError::StampsOutOfRange)
}

/// Trim and lowercase a search query, rejecting terms under two characters.
pub fn normalize_search_term(q: &str) -> Result<SearchTerm, ParticipantValidationError> {
    let trimmed = q.trim();
    if trimmed.chars().count() < SEARCH_TERM_MIN_CHARS {
        return Err(ParticipantValidationError::SearchTermTooShort);
    }
    Ok(SearchTerm(trimmed.to_lowercase()))
}
