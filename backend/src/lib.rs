//! Stamp-card backend library.
//!
//! Hexagonal layout: `domain` holds the participant model, validation and the
//! ports; `inbound::http` and `outbound::persistence` adapt them to actix-web
//! and PostgreSQL; `client` carries the browser-side view state.

pub mod client;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
