//! Public participant lookups.
//!
//! ```text
//! GET /api/students/search?q=ana
//! GET /api/students/{id}
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Error, Participant, ParticipantId, normalize_search_term};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_validation_error;

const NOT_FOUND_MESSAGE: &str = "Estudiante no encontrado";

/// Query string for `GET /api/students/search`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Substring matched against name, surname and code.
    #[serde(default)]
    pub q: Option<String>,
}

/// Participant as shown to anonymous callers. Omits the creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StudentSummary {
    pub id: Uuid,
    #[schema(example = "Ana")]
    pub nombre: String,
    #[schema(example = "Lopez")]
    pub apellido: String,
    #[schema(example = "A1")]
    pub codigo: String,
    #[schema(minimum = 0, maximum = 7)]
    pub sellos: u8,
}

impl From<Participant> for StudentSummary {
    fn from(value: Participant) -> Self {
        Self {
            id: *value.id.as_uuid(),
            nombre: value.nombre,
            apellido: value.apellido,
            codigo: value.codigo,
            sellos: value.sellos.get(),
        }
    }
}

/// Body of `GET /api/students/search`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StudentSearchResponse {
    pub students: Vec<StudentSummary>,
}

/// Body of `GET /api/students/{id}`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StudentSummaryResponse {
    pub student: StudentSummary,
}

/// Search participants by name, surname or code.
#[utoipa::path(
    get,
    path = "/api/students/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Up to twenty matches ordered by surname", body = StudentSearchResponse),
        (status = 400, description = "Search term shorter than two characters", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "searchStudents"
)]
#[get("/students/search")]
pub async fn search_students(
    state: web::Data<HttpState>,
    query: web::Query<SearchQuery>,
) -> ApiResult<web::Json<StudentSearchResponse>> {
    let term =
        normalize_search_term(query.q.as_deref().unwrap_or_default()).map_err(map_validation_error)?;
    let students = state.participants.search(&term).await?;
    Ok(web::Json(StudentSearchResponse {
        students: students.into_iter().map(StudentSummary::from).collect(),
    }))
}

/// Fetch one participant.
#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(("id" = String, Path, description = "Participant identifier")),
    responses(
        (status = 200, description = "Participant", body = StudentSummaryResponse),
        (status = 404, description = "Unknown or malformed identifier", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "getStudent"
)]
#[get("/students/{id}")]
pub async fn get_student(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<StudentSummaryResponse>> {
    let id = ParticipantId::parse(&path).ok_or_else(|| Error::not_found(NOT_FOUND_MESSAGE))?;
    let student = state.participants.find(&id).await?;
    Ok(web::Json(StudentSummaryResponse {
        student: student.into(),
    }))
}
