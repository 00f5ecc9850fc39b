//! PostgreSQL persistence adapter.
//!
//! Purpose: implement the participant repository port with Diesel and
//! `diesel-async`, plus the pool and embedded migrations it depends on.

mod diesel_participant_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_participant_repository::DieselParticipantRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
