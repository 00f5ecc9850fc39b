//! Builders for the HTTP state ports.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use stampcard::domain::ports::{
    InMemoryParticipantRepository, ParticipantCommand, ParticipantQuery, ParticipantRepository,
};
use stampcard::domain::{AdminAuthenticator, ParticipantService};
use stampcard::inbound::http::state::HttpState;
use stampcard::outbound::persistence::{DbPool, DieselParticipantRepository};

fn service_ports<R>(repo: R) -> (Arc<dyn ParticipantQuery>, Arc<dyn ParticipantCommand>)
where
    R: ParticipantRepository + 'static,
{
    let service = Arc::new(ParticipantService::new(Arc::new(repo)));
    (service.clone(), service)
}

/// Wire the participant ports to PostgreSQL when a pool is available,
/// otherwise to a process-local store.
pub(super) fn build_http_state(
    db_pool: Option<&DbPool>,
    admin: AdminAuthenticator,
) -> web::Data<HttpState> {
    let (query, command) = match db_pool {
        Some(pool) => service_ports(DieselParticipantRepository::new(pool.clone())),
        None => {
            warn!("no database configured; participants are kept in memory (dev only)");
            service_ports(InMemoryParticipantRepository::default())
        }
    };
    web::Data::new(HttpState::new(query, command, admin))
}
