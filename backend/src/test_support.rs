//! Test utilities for the backend crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Compiled for tests and behind the `test-support` feature.

mod clock;

pub use clock::MutableClock;

pub mod http {
    //! In-memory HTTP state for handler and scenario tests.

    use std::sync::Arc;

    use actix_web::web;

    use crate::domain::ports::InMemoryParticipantRepository;
    use crate::domain::{AdminAuthenticator, AdminSecret, ParticipantService};
    use crate::inbound::http::state::HttpState;

    /// Handler state over an empty in-memory store that accepts `admin_key`.
    ///
    /// The store is returned too so tests can seed and inspect it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stampcard::test_support::http::in_memory_http_state;
    ///
    /// let (state, repo) = in_memory_http_state("clave");
    /// assert!(state.admin.verify(Some("clave")).is_ok());
    /// # drop(repo);
    /// ```
    pub fn in_memory_http_state(
        admin_key: &str,
    ) -> (web::Data<HttpState>, Arc<InMemoryParticipantRepository>) {
        let secret = match AdminSecret::try_new(admin_key) {
            Ok(secret) => secret,
            Err(error) => panic!("test admin key rejected: {error}"),
        };
        let repo = Arc::new(InMemoryParticipantRepository::default());
        let service = Arc::new(ParticipantService::new(repo.clone()));
        let state = HttpState::new(service.clone(), service, AdminAuthenticator::new(&secret));
        (web::Data::new(state), repo)
    }
}
