//! Port describing the REST calls the client views make.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::define_port_error;

use super::model::{NewStudent, Student};

define_port_error! {
    /// Failures surfaced by [`StampCardApi`] calls.
    pub enum ApiFailure {
        /// The server answered with a non-success status.
        Status { status: u16, message: String } =>
            "request failed with status {status}: {message}",
        /// The request never produced a response.
        Transport { message: String } => "transport error: {message}",
        /// The response body did not have the expected shape.
        Decode { message: String } => "invalid response body: {message}",
    }
}

impl ApiFailure {
    /// True for 401 and 403, which invalidate the admin session.
    #[must_use]
    pub fn is_auth_rejection(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403, .. })
    }

    /// Message from the server's error envelope, if one was returned.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

/// REST surface used by the search, login and admin views.
///
/// Privileged calls take the admin key explicitly; the adapter sends it as
/// the `x-admin-key` header.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StampCardApi: Send + Sync {
    /// `GET /api/students/search?q=`.
    async fn search(&self, query: &str) -> Result<Vec<Student>, ApiFailure>;

    /// `GET /api/students/{id}`.
    async fn student(&self, id: Uuid) -> Result<Student, ApiFailure>;

    /// `POST /api/admin/verify`.
    async fn verify_key(&self, key: &str) -> Result<(), ApiFailure>;

    /// `GET /api/admin/students`.
    async fn list_students(&self, key: &str) -> Result<Vec<Student>, ApiFailure>;

    /// `POST /api/admin/students`.
    async fn create_student(&self, key: &str, student: &NewStudent)
    -> Result<Student, ApiFailure>;

    /// `PATCH /api/admin/students/{id}/sellos`.
    async fn update_stamps(&self, key: &str, id: Uuid, sellos: u8) -> Result<Student, ApiFailure>;

    /// `DELETE /api/admin/students/{id}`.
    async fn delete_student(&self, key: &str, id: Uuid) -> Result<(), ApiFailure>;
}
