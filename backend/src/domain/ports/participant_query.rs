//! Driving port for public participant lookups.
//!
//! The public search view reads through this port; no secret is required.

use async_trait::async_trait;

use crate::domain::{Error, Participant, ParticipantId, SearchTerm};

/// Domain use-case port for anonymous reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParticipantQuery: Send + Sync {
    /// Participants whose name, surname or code contains `term`, ordered by
    /// surname and capped at twenty rows.
    async fn search(&self, term: &SearchTerm) -> Result<Vec<Participant>, Error>;

    /// Fetch one participant, failing with `not_found` when absent.
    async fn find(&self, id: &ParticipantId) -> Result<Participant, Error>;
}

/// Fixture query that knows no participants.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureParticipantQuery;

#[async_trait]
impl ParticipantQuery for FixtureParticipantQuery {
    async fn search(&self, _term: &SearchTerm) -> Result<Vec<Participant>, Error> {
        Ok(Vec::new())
    }

    async fn find(&self, _id: &ParticipantId) -> Result<Participant, Error> {
        Err(Error::not_found("Estudiante no encontrado"))
    }
}
