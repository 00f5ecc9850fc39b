//! Admin login view state.

use std::sync::Arc;

use tracing::{info, warn};

use super::api::StampCardApi;
use super::session::{AdminSession, Navigation};

pub const WRONG_KEY_MESSAGE: &str = "Clave incorrecta. Intenta de nuevo.";

/// Key entry form that verifies the key before storing it.
pub struct AdminLogin {
    api: Arc<dyn StampCardApi>,
    key: String,
    error: Option<&'static str>,
}

impl AdminLogin {
    pub fn new(api: Arc<dyn StampCardApi>) -> Self {
        Self {
            api,
            key: String::new(),
            error: None,
        }
    }

    pub fn set_key(&mut self, key: impl Into<String>) {
        self.key = key.into();
    }

    /// Whether the submit action is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.key.trim().is_empty()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error
    }

    /// Verify the trimmed key; on success store it and go to the panel.
    pub async fn submit(&mut self, session: &mut AdminSession) -> Option<Navigation> {
        let key = self.key.trim();
        if key.is_empty() {
            return None;
        }
        self.error = None;
        match self.api.verify_key(key).await {
            Ok(()) => {
                session.sign_in(key);
                self.key.clear();
                info!("admin key accepted");
                Some(Navigation::Admin)
            }
            Err(failure) => {
                warn!(error = %failure, "admin key rejected");
                self.error = Some(WRONG_KEY_MESSAGE);
                None
            }
        }
    }
}
