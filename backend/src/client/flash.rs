//! Transient status messages that dismiss themselves.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;

/// How long a message stays visible.
pub const FLASH_TTL: Duration = Duration::from_secs(3);

/// A message and the instant it was raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub text: String,
    pub raised_at: DateTime<Utc>,
}

/// Holds at most one message; a newer message replaces the older one.
pub struct FlashBoard {
    clock: Arc<dyn Clock>,
    current: Option<Flash>,
}

impl FlashBoard {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            current: None,
        }
    }

    /// Show `text` from now on.
    pub fn raise(&mut self, text: impl Into<String>) {
        self.current = Some(Flash {
            text: text.into(),
            raised_at: self.clock.utc(),
        });
    }

    /// The message still within [`FLASH_TTL`], if any.
    #[must_use]
    pub fn visible(&self) -> Option<&str> {
        let flash = self.current.as_ref()?;
        let ttl = TimeDelta::from_std(FLASH_TTL).unwrap_or(TimeDelta::MAX);
        (self.clock.utc() - flash.raised_at < ttl).then_some(flash.text.as_str())
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

impl std::fmt::Debug for FlashBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlashBoard")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}
