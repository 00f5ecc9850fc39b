//! Domain primitives and aggregates.
//!
//! Purpose: define strongly typed domain entities used by the HTTP adapters
//! and persistence. Public API: re-exports the participant model, the admin
//! authoriser, the error taxonomy and the services implementing the driving
//! ports.

pub mod admin_auth;
pub mod error;
pub mod participant;
pub mod participant_service;
pub mod ports;
pub mod trace_id;

pub use self::admin_auth::{AdminAuthenticator, AdminCapability, AdminSecret, AdminSecretError};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::participant::{
    MAX_STAMPS, NewParticipant, Participant, ParticipantCode, ParticipantId,
    ParticipantValidationError, SEARCH_RESULT_LIMIT, SEARCH_TERM_MIN_CHARS, SearchTerm,
    StampCount, normalize_search_term, validate_new_participant, validate_stamp_count,
};
pub use self::participant_service::ParticipantService;
pub use self::trace_id::TraceId;
