//! Admin panel handlers.
//!
//! ```text
//! POST   /api/admin/verify {"key":"..."}
//! GET    /api/admin/students
//! POST   /api/admin/students {"nombre":"Ana","apellido":"Lopez","codigo":"A1"}
//! PATCH  /api/admin/students/{id}/sellos {"sellos":3}
//! DELETE /api/admin/students/{id}
//! ```
//!
//! Everything except `verify` requires the `x-admin-key` header, including
//! unknown paths under `/api/admin`. Handlers are mounted in the `/admin`
//! scope built by [`crate::inbound::http::configure`].

use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::{Error, Participant, ParticipantId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::admin_access::AdminAccess;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::validation::{parse_new_participant, parse_stamp_count};

const NOT_FOUND_MESSAGE: &str = "Estudiante no encontrado";

/// Body of `POST /api/admin/verify`.
#[derive(Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct VerifyRequest {
    #[serde(default)]
    pub key: Option<String>,
}

/// Acknowledgement body `{"ok": true}`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    fn ok() -> web::Json<Self> {
        web::Json(Self { ok: true })
    }
}

/// Body of `POST /api/admin/students`. Absent fields count as blank.
#[derive(Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateStudentRequest {
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub apellido: Option<String>,
    #[serde(default)]
    pub codigo: Option<String>,
}

/// Body of `PATCH /api/admin/students/{id}/sellos`.
///
/// Kept as raw JSON so a string or fractional value gets the stamp-range
/// message rather than a generic body error.
#[derive(Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateStampsRequest {
    #[serde(default)]
    #[schema(value_type = i64, minimum = 0, maximum = 7)]
    pub sellos: Option<Value>,
}

/// Participant as shown to the admin panel, including the creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StudentRecord {
    pub id: Uuid,
    pub nombre: String,
    pub apellido: String,
    pub codigo: String,
    #[schema(minimum = 0, maximum = 7)]
    pub sellos: u8,
    pub created_at: DateTime<Utc>,
}

impl From<Participant> for StudentRecord {
    fn from(value: Participant) -> Self {
        Self {
            id: *value.id.as_uuid(),
            nombre: value.nombre,
            apellido: value.apellido,
            codigo: value.codigo,
            sellos: value.sellos.get(),
            created_at: value.created_at,
        }
    }
}

/// Body of `GET /api/admin/students`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StudentRecordList {
    pub students: Vec<StudentRecord>,
}

/// Body returned by create and stamp updates.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StudentRecordResponse {
    pub student: StudentRecord,
}

/// Check a secret entered on the login view.
///
/// A missing or unreadable body counts as a missing key.
#[utoipa::path(
    post,
    path = "/api/admin/verify",
    request_body = VerifyRequest,
    responses(
        (status = 200, description = "Secret accepted", body = OkResponse),
        (status = 401, description = "Wrong or missing secret", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "verifyAdminKey"
)]
#[post("/verify")]
pub async fn verify_key(
    state: web::Data<HttpState>,
    payload: Option<web::Json<VerifyRequest>>,
) -> ApiResult<web::Json<OkResponse>> {
    let key = payload.as_ref().and_then(|body| body.key.as_deref());
    state.admin.verify(key)?;
    Ok(OkResponse::ok())
}

/// List every participant ordered by surname.
#[utoipa::path(
    get,
    path = "/api/admin/students",
    responses(
        (status = 200, description = "All participants", body = StudentRecordList),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "listStudents",
    security(("AdminKey" = []))
)]
#[get("/students")]
pub async fn list_students(
    access: AdminAccess,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<StudentRecordList>> {
    let students = state
        .participants_admin
        .list_all(access.capability())
        .await?;
    Ok(web::Json(StudentRecordList {
        students: students.into_iter().map(StudentRecord::from).collect(),
    }))
}

/// Register a participant with zero stamps.
#[utoipa::path(
    post,
    path = "/api/admin/students",
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Participant created", body = StudentRecordResponse),
        (status = 400, description = "Missing field", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 409, description = "Code already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "createStudent",
    security(("AdminKey" = []))
)]
#[post("/students")]
pub async fn create_student(
    access: AdminAccess,
    state: web::Data<HttpState>,
    payload: web::Json<CreateStudentRequest>,
) -> ApiResult<HttpResponse> {
    let new = parse_new_participant(
        payload.nombre.as_deref(),
        payload.apellido.as_deref(),
        payload.codigo.as_deref(),
    )?;
    let student = state
        .participants_admin
        .register(access.capability(), new)
        .await?;
    Ok(HttpResponse::Created().json(StudentRecordResponse {
        student: student.into(),
    }))
}

/// Overwrite a participant's stamp count.
#[utoipa::path(
    patch,
    path = "/api/admin/students/{id}/sellos",
    params(("id" = String, Path, description = "Participant identifier")),
    request_body = UpdateStampsRequest,
    responses(
        (status = 200, description = "Updated participant", body = StudentRecordResponse),
        (status = 400, description = "Stamp count outside 0..=7", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Unknown participant", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "updateStamps",
    security(("AdminKey" = []))
)]
#[patch("/students/{id}/sellos")]
pub async fn update_stamps(
    access: AdminAccess,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateStampsRequest>,
) -> ApiResult<web::Json<StudentRecordResponse>> {
    let sellos = parse_stamp_count(payload.sellos.as_ref())?;
    let id = ParticipantId::parse(&path).ok_or_else(|| Error::not_found(NOT_FOUND_MESSAGE))?;
    let student = state
        .participants_admin
        .set_stamps(access.capability(), &id, sellos)
        .await?;
    Ok(web::Json(StudentRecordResponse {
        student: student.into(),
    }))
}

/// Delete a participant. Unknown ids succeed.
#[utoipa::path(
    delete,
    path = "/api/admin/students/{id}",
    params(("id" = String, Path, description = "Participant identifier")),
    responses(
        (status = 200, description = "Participant absent afterwards", body = OkResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "deleteStudent",
    security(("AdminKey" = []))
)]
#[delete("/students/{id}")]
pub async fn delete_student(
    access: AdminAccess,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<OkResponse>> {
    // A malformed id cannot name a stored row, so there is nothing to delete.
    if let Some(id) = ParticipantId::parse(&path) {
        state
            .participants_admin
            .remove(access.capability(), &id)
            .await?;
    }
    Ok(OkResponse::ok())
}

/// Fallback for unmatched paths under `/api/admin`.
///
/// The key is checked first so unknown admin paths reveal nothing to
/// callers without it.
pub async fn admin_route_not_found(_access: AdminAccess) -> ApiResult<HttpResponse> {
    Err(Error::not_found(super::ROUTE_NOT_FOUND_MESSAGE))
}

#[cfg(test)]
#[path = "admin_tests.rs"]
mod tests;
