//! Extractor guarding privileged handlers.
//!
//! Reads the shared secret from the `x-admin-key` header and exchanges it
//! for an [`AdminCapability`]. Handlers that take [`AdminAccess`] as their
//! first argument reject unauthorised callers before the body is parsed.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::{debug, error};

use crate::domain::{AdminCapability, Error};
use crate::inbound::http::state::HttpState;

/// Header carrying the admin secret.
pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Proof that the request presented the admin secret.
#[derive(Debug)]
pub struct AdminAccess(AdminCapability);

impl AdminAccess {
    /// Borrow the capability demanded by privileged ports.
    pub fn capability(&self) -> &AdminCapability {
        &self.0
    }
}

fn authorize(req: &HttpRequest) -> Result<AdminAccess, Error> {
    let Some(state) = req.app_data::<web::Data<HttpState>>() else {
        error!("HttpState missing from app data");
        return Err(Error::internal("Error interno del servidor"));
    };
    let presented = req
        .headers()
        .get(ADMIN_KEY_HEADER)
        .and_then(|value| value.to_str().ok());
    state.admin.authorize(presented).map(AdminAccess).inspect_err(|_| {
        debug!(path = %req.path(), "admin request rejected");
    })
}

impl FromRequest for AdminAccess {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authorize(req))
    }
}
