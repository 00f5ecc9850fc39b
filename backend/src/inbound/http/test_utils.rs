//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;
use async_trait::async_trait;

use crate::domain::ports::{InMemoryParticipantRepository, ParticipantCommand};
use crate::domain::{AdminCapability, Error, NewParticipant, Participant, ParticipantId, StampCount};
use crate::inbound::http::state::HttpState;
use crate::test_support::http::in_memory_http_state;

/// Secret accepted by states built here.
pub const TEST_ADMIN_KEY: &str = "clave-de-prueba";

/// Privileged port that holds no participants.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopParticipantCommand;

#[async_trait]
impl ParticipantCommand for NoopParticipantCommand {
    async fn list_all(&self, _access: &AdminCapability) -> Result<Vec<Participant>, Error> {
        Ok(Vec::new())
    }

    async fn register(
        &self,
        _access: &AdminCapability,
        _participant: NewParticipant,
    ) -> Result<Participant, Error> {
        Err(Error::internal("Error al crear estudiante"))
    }

    async fn set_stamps(
        &self,
        _access: &AdminCapability,
        _id: &ParticipantId,
        _sellos: StampCount,
    ) -> Result<Participant, Error> {
        Err(Error::not_found("Estudiante no encontrado"))
    }

    async fn remove(&self, _access: &AdminCapability, _id: &ParticipantId) -> Result<(), Error> {
        Ok(())
    }
}

/// Build handler state over an in-memory store that accepts
/// [`TEST_ADMIN_KEY`], returning the store so tests can seed and inspect it.
pub fn in_memory_state() -> (web::Data<HttpState>, Arc<InMemoryParticipantRepository>) {
    in_memory_http_state(TEST_ADMIN_KEY)
}
