//! Admin key held for the lifetime of a browser tab.

use std::fmt;

use zeroize::Zeroizing;

/// View the client should switch to after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Home,
    Login,
    Admin,
}

/// Ephemeral admin session. Holds the verified key, nothing else.
#[derive(Default)]
pub struct AdminSession {
    key: Option<Zeroizing<String>>,
}

impl AdminSession {
    /// An empty, signed-out session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a key that the server has just accepted.
    pub fn sign_in(&mut self, key: impl Into<String>) {
        self.key = Some(Zeroizing::new(key.into()));
    }

    /// Forget the key.
    pub fn sign_out(&mut self) {
        self.key = None;
    }

    /// The stored key, if signed in.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref().map(String::as_str)
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.key.is_some()
    }
}

impl fmt::Debug for AdminSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminSession")
            .field("signed_in", &self.is_signed_in())
            .finish()
    }
}
