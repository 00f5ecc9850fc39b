//! Reqwest-backed [`StampCardApi`] adapter.
//!
//! Owns transport details only: URL building, the admin key header, status
//! mapping and JSON decoding.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::api::{ApiFailure, StampCardApi};
use super::model::{ErrorEnvelope, NewStudent, Student, StudentEnvelope, StudentList};
use crate::inbound::http::ADMIN_KEY_HEADER;

#[derive(Debug, Deserialize)]
struct Acknowledgement {
    #[serde(rename = "ok")]
    _ok: bool,
}

/// HTTP client for the stamp-card REST API rooted at one base URL.
#[derive(Debug, Clone)]
pub struct HttpStampCardApi {
    client: Client,
    base: Url,
}

impl HttpStampCardApi {
    /// Build a client for `base` (for example `http://localhost:3001/api/`).
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base: with_trailing_slash(base),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiFailure> {
        self.base
            .join(path)
            .map_err(|err| ApiFailure::transport(format!("invalid endpoint {path}: {err}")))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiFailure> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        serde_json::from_slice(body.as_ref()).map_err(|err| ApiFailure::decode(err.to_string()))
    }
}

fn with_trailing_slash(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

fn map_transport_error(error: reqwest::Error) -> ApiFailure {
    ApiFailure::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ApiFailure {
    let message = serde_json::from_slice::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
        .unwrap_or_default();
    ApiFailure::status(status.as_u16(), message)
}

#[async_trait]
impl StampCardApi for HttpStampCardApi {
    async fn search(&self, query: &str) -> Result<Vec<Student>, ApiFailure> {
        let mut url = self.endpoint("students/search")?;
        url.query_pairs_mut().append_pair("q", query);
        let list: StudentList = self.send(self.client.get(url)).await?;
        Ok(list.students)
    }

    async fn student(&self, id: Uuid) -> Result<Student, ApiFailure> {
        let url = self.endpoint(&format!("students/{id}"))?;
        let envelope: StudentEnvelope = self.send(self.client.get(url)).await?;
        Ok(envelope.student)
    }

    async fn verify_key(&self, key: &str) -> Result<(), ApiFailure> {
        let url = self.endpoint("admin/verify")?;
        let request = self
            .client
            .post(url)
            .json(&serde_json::json!({ "key": key }));
        let _: Acknowledgement = self.send(request).await?;
        Ok(())
    }

    async fn list_students(&self, key: &str) -> Result<Vec<Student>, ApiFailure> {
        let url = self.endpoint("admin/students")?;
        let request = self.client.get(url).header(ADMIN_KEY_HEADER, key);
        let list: StudentList = self.send(request).await?;
        Ok(list.students)
    }

    async fn create_student(
        &self,
        key: &str,
        student: &NewStudent,
    ) -> Result<Student, ApiFailure> {
        let url = self.endpoint("admin/students")?;
        let request = self
            .client
            .post(url)
            .header(ADMIN_KEY_HEADER, key)
            .json(student);
        let envelope: StudentEnvelope = self.send(request).await?;
        Ok(envelope.student)
    }

    async fn update_stamps(&self, key: &str, id: Uuid, sellos: u8) -> Result<Student, ApiFailure> {
        let url = self.endpoint(&format!("admin/students/{id}/sellos"))?;
        let request = self
            .client
            .patch(url)
            .header(ADMIN_KEY_HEADER, key)
            .json(&serde_json::json!({ "sellos": sellos }));
        let envelope: StudentEnvelope = self.send(request).await?;
        Ok(envelope.student)
    }

    async fn delete_student(&self, key: &str, id: Uuid) -> Result<(), ApiFailure> {
        let url = self.endpoint(&format!("admin/students/{id}"))?;
        let request = self.client.delete(url).header(ADMIN_KEY_HEADER, key);
        let _: Acknowledgement = self.send(request).await?;
        Ok(())
    }
}
