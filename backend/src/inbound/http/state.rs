//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::AdminAuthenticator;
use crate::domain::ports::{ParticipantCommand, ParticipantQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub participants: Arc<dyn ParticipantQuery>,
    pub participants_admin: Arc<dyn ParticipantCommand>,
    pub admin: Arc<AdminAuthenticator>,
}

impl HttpState {
    /// Construct state from the driving ports and the admin authoriser.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use stampcard::domain::ports::InMemoryParticipantRepository;
    /// use stampcard::domain::{AdminAuthenticator, AdminSecret, ParticipantService};
    /// use stampcard::inbound::http::state::HttpState;
    ///
    /// let service = Arc::new(ParticipantService::new(Arc::new(
    ///     InMemoryParticipantRepository::default(),
    /// )));
    /// let secret = AdminSecret::try_new("clave").expect("non-empty secret");
    /// let state = HttpState::new(
    ///     service.clone(),
    ///     service,
    ///     AdminAuthenticator::new(&secret),
    /// );
    /// let _query = state.participants.clone();
    /// ```
    pub fn new(
        participants: Arc<dyn ParticipantQuery>,
        participants_admin: Arc<dyn ParticipantCommand>,
        admin: AdminAuthenticator,
    ) -> Self {
        Self {
            participants,
            participants_admin,
            admin: Arc::new(admin),
        }
    }
}
