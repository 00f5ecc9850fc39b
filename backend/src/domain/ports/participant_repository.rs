//! Port for participant persistence.
//!
//! The [`ParticipantRepository`] trait is the record store contract used by
//! the participant service. The PostgreSQL adapter lives in
//! `outbound::persistence`; [`InMemoryParticipantRepository`] backs local
//! runs without a database and the HTTP test suites.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use uuid::Uuid;

use crate::domain::{
    NewParticipant, Participant, ParticipantCode, ParticipantId, SearchTerm, StampCount,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by participant repository adapters.
    pub enum ParticipantRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "participant repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "participant repository query failed: {message}",
        /// The store rejected an insert because the code is taken.
        DuplicateCode { codigo: String } =>
            "participant code already registered: {codigo}",
    }
}

/// Port for participant storage and retrieval.
///
/// Listings (`search`, `list_all`) are ordered by surname ascending.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// Case-insensitive substring match on name, surname or code, capped at
    /// `limit` rows.
    async fn search(
        &self,
        term: &SearchTerm,
        limit: usize,
    ) -> Result<Vec<Participant>, ParticipantRepositoryError>;

    /// Fetch one participant by identifier.
    async fn find_by_id(
        &self,
        id: &ParticipantId,
    ) -> Result<Option<Participant>, ParticipantRepositoryError>;

    /// Fetch one participant by exact code.
    async fn find_by_code(
        &self,
        code: &ParticipantCode,
    ) -> Result<Option<Participant>, ParticipantRepositoryError>;

    /// Every participant.
    async fn list_all(&self) -> Result<Vec<Participant>, ParticipantRepositoryError>;

    /// Insert a participant with zero stamps, returning the stored row.
    ///
    /// Fails with [`ParticipantRepositoryError::DuplicateCode`] when the
    /// code is already taken.
    async fn insert(
        &self,
        participant: &NewParticipant,
    ) -> Result<Participant, ParticipantRepositoryError>;

    /// Overwrite the stamp count. Returns `None` when no row matched.
    async fn update_stamps(
        &self,
        id: &ParticipantId,
        sellos: StampCount,
    ) -> Result<Option<Participant>, ParticipantRepositoryError>;

    /// Delete a participant. Returns whether a row was removed.
    async fn delete(&self, id: &ParticipantId) -> Result<bool, ParticipantRepositoryError>;
}

/// Process-local participant store.
///
/// Enforces the same code uniqueness and ordering as the database adapter.
pub struct InMemoryParticipantRepository {
    rows: Mutex<Vec<Participant>>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryParticipantRepository {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl InMemoryParticipantRepository {
    /// Create an empty store stamping rows with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Participant>>, ParticipantRepositoryError> {
        self.rows
            .lock()
            .map_err(|_| ParticipantRepositoryError::query("participant store lock poisoned"))
    }

    fn sorted(mut rows: Vec<Participant>) -> Vec<Participant> {
        rows.sort_by(|a, b| a.apellido.cmp(&b.apellido));
        rows
    }
}

#[async_trait]
impl ParticipantRepository for InMemoryParticipantRepository {
    async fn search(
        &self,
        term: &SearchTerm,
        limit: usize,
    ) -> Result<Vec<Participant>, ParticipantRepositoryError> {
        let matches = self
            .lock()?
            .iter()
            .filter(|row| term.matches(row))
            .cloned()
            .collect();
        Ok(Self::sorted(matches).into_iter().take(limit).collect())
    }

    async fn find_by_id(
        &self,
        id: &ParticipantId,
    ) -> Result<Option<Participant>, ParticipantRepositoryError> {
        Ok(self.lock()?.iter().find(|row| row.id == *id).cloned())
    }

    async fn find_by_code(
        &self,
        code: &ParticipantCode,
    ) -> Result<Option<Participant>, ParticipantRepositoryError> {
        Ok(self
            .lock()?
            .iter()
            .find(|row| row.codigo == code.as_str())
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Participant>, ParticipantRepositoryError> {
        Ok(Self::sorted(self.lock()?.clone()))
    }

    async fn insert(
        &self,
        participant: &NewParticipant,
    ) -> Result<Participant, ParticipantRepositoryError> {
        let mut rows = self.lock()?;
        if rows
            .iter()
            .any(|row| row.codigo == participant.codigo.as_str())
        {
            return Err(ParticipantRepositoryError::duplicate_code(
                participant.codigo.as_str(),
            ));
        }
        let stored = Participant {
            id: ParticipantId::from_uuid(Uuid::new_v4()),
            nombre: participant.nombre.clone(),
            apellido: participant.apellido.clone(),
            codigo: participant.codigo.as_str().to_owned(),
            sellos: StampCount::ZERO,
            created_at: self.clock.utc(),
        };
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn update_stamps(
        &self,
        id: &ParticipantId,
        sellos: StampCount,
    ) -> Result<Option<Participant>, ParticipantRepositoryError> {
        let mut rows = self.lock()?;
        Ok(rows.iter_mut().find(|row| row.id == *id).map(|row| {
            row.sellos = sellos;
            row.clone()
        }))
    }

    async fn delete(&self, id: &ParticipantId) -> Result<bool, ParticipantRepositoryError> {
        let mut rows = self.lock()?;
        let before = rows.len();
        rows.retain(|row| row.id != *id);
        Ok(rows.len() != before)
    }
}
