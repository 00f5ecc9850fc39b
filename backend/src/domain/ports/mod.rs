//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod participant_command;
mod participant_query;
mod participant_repository;

#[cfg(test)]
pub use participant_command::MockParticipantCommand;
pub use participant_command::ParticipantCommand;
#[cfg(test)]
pub use participant_query::MockParticipantQuery;
pub use participant_query::{FixtureParticipantQuery, ParticipantQuery};
#[cfg(test)]
pub use participant_repository::MockParticipantRepository;
pub use participant_repository::{
    InMemoryParticipantRepository, ParticipantRepository, ParticipantRepositoryError,
};
