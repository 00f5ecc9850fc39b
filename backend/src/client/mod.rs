//! Client state and synchronisation for the browser views.
//!
//! Purpose: hold what the search page, login form and admin panel display,
//! and keep it in step with the REST API through the [`StampCardApi`] port.
//! Admin actions update local state optimistically and roll back on failure.

mod admin_panel;
mod api;
mod card;
mod flash;
mod http_client;
mod login;
mod model;
mod optimistic;
mod search;
mod session;

pub use admin_panel::{
    AdminPanel, BLANK_FIELDS_MESSAGE, CREATE_FAILED_MESSAGE, DELETE_FAILED_MESSAGE, PanelStats,
    UPDATE_FAILED_MESSAGE,
};
#[cfg(test)]
pub use api::MockStampCardApi;
pub use api::{ApiFailure, StampCardApi};
pub use card::{Slot, StampCardView};
pub use flash::{FLASH_TTL, Flash, FlashBoard};
pub use http_client::HttpStampCardApi;
pub use login::{AdminLogin, WRONG_KEY_MESSAGE};
pub use model::{NewStudent, Student};
pub use optimistic::{Removal, Snapshot};
pub use search::{SEARCH_FAILED_MESSAGE, SearchPage};
pub use session::{AdminSession, Navigation};
