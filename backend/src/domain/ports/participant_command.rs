//! Driving port for privileged participant operations.
//!
//! Every method takes an [`AdminCapability`], which only the admin
//! authoriser can mint. Inbound adapters therefore cannot reach these
//! operations without checking the shared secret first.

use async_trait::async_trait;

use crate::domain::{AdminCapability, Error, NewParticipant, Participant, ParticipantId, StampCount};

/// Domain use-case port for the admin panel.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParticipantCommand: Send + Sync {
    /// Every participant ordered by surname.
    async fn list_all(&self, access: &AdminCapability) -> Result<Vec<Participant>, Error>;

    /// Register a participant with zero stamps.
    ///
    /// # Errors
    ///
    /// Returns `conflict` when the code is already registered.
    async fn register(
        &self,
        access: &AdminCapability,
        participant: NewParticipant,
    ) -> Result<Participant, Error>;

    /// Overwrite the stamp count, failing with `not_found` when absent.
    async fn set_stamps(
        &self,
        access: &AdminCapability,
        id: &ParticipantId,
        sellos: StampCount,
    ) -> Result<Participant, Error>;

    /// Remove a participant. Removing an absent id succeeds.
    async fn remove(&self, access: &AdminCapability, id: &ParticipantId) -> Result<(), Error>;
}
