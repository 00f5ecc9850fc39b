//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every REST handler from the inbound layer, the wire
//! schemas they exchange, the error envelope ([`ErrorSchema`],
//! [`ErrorCodeSchema`]) and the `x-admin-key` header scheme used by admin
//! routes. Swagger UI serves it in debug builds.

use crate::inbound::http::admin::{
    CreateStudentRequest, OkResponse, StudentRecord, StudentRecordList, StudentRecordResponse,
    UpdateStampsRequest, VerifyRequest,
};
use crate::inbound::http::health::ServiceStatus;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::students::{
    StudentSearchResponse, StudentSummary, StudentSummaryResponse,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the admin header security scheme.
pub const ADMIN_KEY_SCHEME: &str = "AdminKey";

/// Adds the admin key header scheme referenced by privileged routes.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            ADMIN_KEY_SCHEME,
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "x-admin-key",
                "Shared admin secret, checked on every privileged call.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Jinetes DTI API",
        description = "Participant search and stamp-card administration."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::health::api_health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::students::search_students,
        crate::inbound::http::students::get_student,
        crate::inbound::http::admin::verify_key,
        crate::inbound::http::admin::list_students,
        crate::inbound::http::admin::create_student,
        crate::inbound::http::admin::update_stamps,
        crate::inbound::http::admin::delete_student,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        ServiceStatus,
        StudentSummary,
        StudentSearchResponse,
        StudentSummaryResponse,
        VerifyRequest,
        OkResponse,
        CreateStudentRequest,
        UpdateStampsRequest,
        StudentRecord,
        StudentRecordList,
        StudentRecordResponse,
    )),
    tags(
        (name = "students", description = "Public participant lookups"),
        (name = "admin", description = "Participant administration"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
