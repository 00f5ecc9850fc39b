//! Participant domain service.
//!
//! Implements the public [`ParticipantQuery`] and the privileged
//! [`ParticipantCommand`] driving ports on top of a
//! [`ParticipantRepository`]. Store failures are logged in full and surfaced
//! to callers as generic internal errors.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::domain::ports::{
    ParticipantCommand, ParticipantQuery, ParticipantRepository, ParticipantRepositoryError,
};
use crate::domain::{
    AdminCapability, Error, NewParticipant, Participant, ParticipantId, SEARCH_RESULT_LIMIT,
    SearchTerm, StampCount,
};

const NOT_FOUND_MESSAGE: &str = "Estudiante no encontrado";

/// Operation labels paired with the generic message shown on store failure.
#[derive(Debug, Clone, Copy)]
enum Operation {
    Search,
    Find,
    List,
    Create,
    UpdateStamps,
    Delete,
}

impl Operation {
    fn failure_message(self) -> &'static str {
        match self {
            Self::Search | Self::Find => "Error interno del servidor",
            Self::List => "Error al obtener estudiantes",
            Self::Create => "Error al crear estudiante",
            Self::UpdateStamps => "Error al actualizar sellos",
            Self::Delete => "Error al eliminar estudiante",
        }
    }
}

fn duplicate_code(codigo: &str) -> Error {
    Error::conflict(format!("El código {codigo} ya está registrado"))
}

/// Participant service implementing the driving ports.
#[derive(Clone)]
pub struct ParticipantService<R> {
    repo: Arc<R>,
}

impl<R> ParticipantService<R> {
    /// Create a new service backed by `repo`.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> ParticipantService<R>
where
    R: ParticipantRepository,
{
    fn map_repository_error(operation: Operation, err: ParticipantRepositoryError) -> Error {
        match err {
            ParticipantRepositoryError::DuplicateCode { codigo } => duplicate_code(&codigo),
            other => {
                error!(?operation, error = %other, "participant store operation failed");
                Error::internal(operation.failure_message())
            }
        }
    }
}

#[async_trait]
impl<R> ParticipantQuery for ParticipantService<R>
where
    R: ParticipantRepository,
{
    async fn search(&self, term: &SearchTerm) -> Result<Vec<Participant>, Error> {
        self.repo
            .search(term, SEARCH_RESULT_LIMIT)
            .await
            .map_err(|err| Self::map_repository_error(Operation::Search, err))
    }

    async fn find(&self, id: &ParticipantId) -> Result<Participant, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(|err| Self::map_repository_error(Operation::Find, err))?
            .ok_or_else(|| Error::not_found(NOT_FOUND_MESSAGE))
    }
}

#[async_trait]
impl<R> ParticipantCommand for ParticipantService<R>
where
    R: ParticipantRepository,
{
    async fn list_all(&self, _access: &AdminCapability) -> Result<Vec<Participant>, Error> {
        self.repo
            .list_all()
            .await
            .map_err(|err| Self::map_repository_error(Operation::List, err))
    }

    async fn register(
        &self,
        _access: &AdminCapability,
        participant: NewParticipant,
    ) -> Result<Participant, Error> {
        let existing = self
            .repo
            .find_by_code(&participant.codigo)
            .await
            .map_err(|err| Self::map_repository_error(Operation::Create, err))?;
        if existing.is_some() {
            return Err(duplicate_code(participant.codigo.as_str()));
        }

        // The store's unique constraint still guards the race between the
        // lookup above and this insert.
        let stored = self
            .repo
            .insert(&participant)
            .await
            .map_err(|err| Self::map_repository_error(Operation::Create, err))?;
        info!(id = %stored.id, codigo = %stored.codigo, "participant registered");
        Ok(stored)
    }

    async fn set_stamps(
        &self,
        _access: &AdminCapability,
        id: &ParticipantId,
        sellos: StampCount,
    ) -> Result<Participant, Error> {
        let updated = self
            .repo
            .update_stamps(id, sellos)
            .await
            .map_err(|err| Self::map_repository_error(Operation::UpdateStamps, err))?
            .ok_or_else(|| Error::not_found(NOT_FOUND_MESSAGE))?;
        info!(%id, sellos = %updated.sellos, "stamp count updated");
        Ok(updated)
    }

    async fn remove(&self, _access: &AdminCapability, id: &ParticipantId) -> Result<(), Error> {
        let removed = self
            .repo
            .delete(id)
            .await
            .map_err(|err| Self::map_repository_error(Operation::Delete, err))?;
        if removed {
            info!(%id, "participant removed");
        } else {
            debug!(%id, "delete matched no participant");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "participant_service_tests.rs"]
mod tests;
