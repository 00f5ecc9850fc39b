//! Shared-secret admin authorisation.
//!
//! The configured secret is hashed once at startup and the plaintext is
//! wiped. Each privileged request presents a secret which is hashed and
//! compared against the stored digest. A successful check mints an
//! [`AdminCapability`]; privileged service operations demand one, so no code
//! path reaches the record store for an admin action without passing the
//! check first.

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::Error;

/// Bytes of the digest shown in fingerprints before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

const UNAUTHORIZED_MESSAGE: &str = "No autorizado";
const WRONG_KEY_MESSAGE: &str = "Clave incorrecta";

/// Errors raised while constructing an [`AdminSecret`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdminSecretError {
    /// The secret was empty once trimmed.
    #[error("admin secret must not be empty")]
    Empty,
}

/// Configured admin secret. The plaintext is zeroised on drop.
pub struct AdminSecret(Zeroizing<String>);

impl AdminSecret {
    /// Wrap a configured secret, trimming surrounding whitespace.
    pub fn try_new(raw: impl Into<String>) -> Result<Self, AdminSecretError> {
        let raw = Zeroizing::new(raw.into());
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AdminSecretError::Empty);
        }
        Ok(Self(Zeroizing::new(trimmed.to_owned())))
    }

    fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Debug for AdminSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AdminSecret(<redacted>)")
    }
}

/// Proof that the caller presented the admin secret.
///
/// Only [`AdminAuthenticator::authorize`] can construct one.
#[derive(Debug)]
pub struct AdminCapability {
    _sealed: (),
}

/// Process-wide admin check built once from configuration.
///
/// # Examples
/// ```
/// use stampcard::domain::{AdminAuthenticator, AdminSecret};
///
/// let secret = AdminSecret::try_new("s3cret").expect("non-empty secret");
/// let auth = AdminAuthenticator::new(&secret);
/// assert!(auth.authorize(Some("s3cret")).is_ok());
/// assert!(auth.authorize(Some("wrong")).is_err());
/// assert!(auth.authorize(None).is_err());
/// ```
#[derive(Clone)]
pub struct AdminAuthenticator {
    digest: [u8; 32],
}

impl AdminAuthenticator {
    /// Hash the configured secret.
    #[must_use]
    pub fn new(secret: &AdminSecret) -> Self {
        Self {
            digest: digest(secret.expose()),
        }
    }

    /// Check a secret presented on a privileged call (the `x-admin-key`
    /// header).
    pub fn authorize(&self, presented: Option<&str>) -> Result<AdminCapability, Error> {
        if self.matches(presented) {
            Ok(AdminCapability { _sealed: () })
        } else {
            Err(Error::unauthorized(UNAUTHORIZED_MESSAGE))
        }
    }

    /// Check a secret submitted to the login verification operation.
    pub fn verify(&self, presented: Option<&str>) -> Result<(), Error> {
        if self.matches(presented) {
            Ok(())
        } else {
            Err(Error::unauthorized(WRONG_KEY_MESSAGE))
        }
    }

    /// Truncated SHA-256 fingerprint for logs.
    ///
    /// Lets operators tell which secret is active without revealing it.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        hex::encode(&self.digest[..FINGERPRINT_BYTES])
    }

    fn matches(&self, presented: Option<&str>) -> bool {
        match presented {
            Some(value) if !value.is_empty() => {
                let candidate = digest(value);
                // Fixed-length digests compared without early exit.
                candidate
                    .iter()
                    .zip(self.digest.iter())
                    .fold(0_u8, |acc, (a, b)| acc | (a ^ b))
                    == 0
            }
            _ => false,
        }
    }
}

impl std::fmt::Debug for AdminAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAuthenticator")
            .field("fingerprint", &self.fingerprint())
            .finish()
    }
}

fn digest(value: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let mut out = [0_u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::{fixture, rstest};

    #[fixture]
    fn authenticator() -> AdminAuthenticator {
        let secret = AdminSecret::try_new("  jinetes-2024 \n").expect("valid secret");
        AdminAuthenticator::new(&secret)
    }

    #[rstest]
    fn blank_secrets_are_rejected() {
        assert_eq!(
            AdminSecret::try_new("   ").map(|_| ()),
            Err(AdminSecretError::Empty)
        );
    }

    #[rstest]
    fn configured_secret_is_trimmed(authenticator: AdminAuthenticator) {
        assert!(authenticator.authorize(Some("jinetes-2024")).is_ok());
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("jinetes-2025"))]
    #[case(Some(" jinetes-2024"))]
    fn wrong_or_missing_secrets_are_unauthorised(
        authenticator: AdminAuthenticator,
        #[case] presented: Option<&str>,
    ) {
        let err = authenticator.authorize(presented).expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), "No autorizado");
    }

    #[rstest]
    fn verify_reports_wrong_key(authenticator: AdminAuthenticator) {
        let err = authenticator.verify(Some("wrong")).expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), "Clave incorrecta");
        assert!(authenticator.verify(Some("jinetes-2024")).is_ok());
    }

    #[rstest]
    fn fingerprint_is_short_hex(authenticator: AdminAuthenticator) {
        let fp = authenticator.fingerprint();
        assert_eq!(fp.len(), FINGERPRINT_BYTES * 2);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(!fp.contains("jinetes"));
    }

    #[rstest]
    fn debug_output_redacts_secret() {
        let secret = AdminSecret::try_new("hunter2").expect("valid secret");
        assert!(!format!("{secret:?}").contains("hunter2"));
    }
}
