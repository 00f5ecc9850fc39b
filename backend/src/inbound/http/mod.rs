//! HTTP inbound adapter exposing REST endpoints.

pub mod admin;
pub mod admin_access;
pub mod admin_config;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod students;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use actix_web::{HttpResponse, web};

pub use admin_access::ADMIN_KEY_HEADER;
pub use error::ApiResult;

use crate::domain::Error;

/// Register the `/api` routes and the JSON body error handler.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use stampcard::inbound::http::{configure, route_not_found};
///
/// let app = App::new()
///     .configure(configure)
///     .default_service(web::to(route_not_found));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(validation::json_error_handler))
        .service(
            web::scope("/api")
                .service(health::api_health)
                .service(students::search_students)
                .service(students::get_student)
                .service(
                    web::scope("/admin")
                        .service(admin::verify_key)
                        .service(admin::list_students)
                        .service(admin::create_student)
                        .service(admin::update_stamps)
                        .service(admin::delete_student)
                        .default_service(web::to(admin::admin_route_not_found)),
                ),
        );
}

const ROUTE_NOT_FOUND_MESSAGE: &str = "Ruta no encontrada";

/// Fallback for unmatched routes.
pub async fn route_not_found() -> ApiResult<HttpResponse> {
    Err(Error::not_found(ROUTE_NOT_FOUND_MESSAGE))
}
