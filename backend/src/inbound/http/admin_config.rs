//! Admin secret configuration.
//!
//! The secret comes from `ADMIN_SECRET_KEY`, or from the file named by
//! `ADMIN_SECRET_KEY_FILE`. Release builds refuse to start without one;
//! debug builds fall back to an ephemeral secret and warn.

use mockable::Env;
use std::path::PathBuf;
use tracing::warn;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::{AdminSecret, AdminSecretError};

const SECRET_ENV: &str = "ADMIN_SECRET_KEY";
const SECRET_FILE_ENV: &str = "ADMIN_SECRET_KEY_FILE";

/// Build mode for configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate a missing secret.
    Debug,
    /// Release builds require an explicit secret.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stampcard::inbound::http::admin_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// Errors raised while loading the admin secret.
#[derive(thiserror::Error, Debug)]
pub enum AdminConfigError {
    /// Neither secret variable is set.
    #[error("missing required environment variable: {SECRET_ENV} (or {SECRET_FILE_ENV})")]
    MissingSecret,
    /// Reading the secret file failed.
    #[error("failed to read admin secret at {path}: {source}")]
    SecretRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The configured secret is blank.
    #[error("admin secret from {origin} is empty")]
    EmptySecret {
        origin: String,
        #[source]
        source: AdminSecretError,
    },
}

/// Load the admin secret from the environment.
///
/// # Examples
///
/// ```rust
/// use mockable::MockEnv;
/// use stampcard::inbound::http::admin_config::{BuildMode, admin_secret_from_env};
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "ADMIN_SECRET_KEY" => Some("jinetes".to_string()),
///     _ => None,
/// });
///
/// assert!(admin_secret_from_env(&env, BuildMode::Release).is_ok());
/// ```
pub fn admin_secret_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<AdminSecret, AdminConfigError> {
    if let Some(value) = env.string(SECRET_ENV) {
        let value = Zeroizing::new(value);
        return AdminSecret::try_new(value.as_str()).map_err(|source| {
            AdminConfigError::EmptySecret {
                origin: SECRET_ENV.to_owned(),
                source,
            }
        });
    }

    if let Some(path) = env.string(SECRET_FILE_ENV) {
        let path = PathBuf::from(path);
        let contents = std::fs::read_to_string(&path)
            .map(Zeroizing::new)
            .map_err(|source| AdminConfigError::SecretRead {
                path: path.clone(),
                source,
            })?;
        return AdminSecret::try_new(contents.as_str()).map_err(|source| {
            AdminConfigError::EmptySecret {
                origin: path.display().to_string(),
                source,
            }
        });
    }

    match mode {
        BuildMode::Debug => {
            warn!("ADMIN_SECRET_KEY not set; using ephemeral admin secret (dev only)");
            let ephemeral = Zeroizing::new(format!(
                "{}{}",
                Uuid::new_v4().simple(),
                Uuid::new_v4().simple()
            ));
            AdminSecret::try_new(ephemeral.as_str()).map_err(|source| {
                AdminConfigError::EmptySecret {
                    origin: "ephemeral".to_owned(),
                    source,
                }
            })
        }
        BuildMode::Release => Err(AdminConfigError::MissingSecret),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AdminAuthenticator;
    use mockable::MockEnv;
    use rstest::rstest;
    use std::collections::HashMap;

    struct TempSecretFile {
        path: PathBuf,
    }

    impl TempSecretFile {
        fn new(contents: &str) -> Self {
            let path = std::env::temp_dir().join(format!("admin-secret-{}", Uuid::new_v4()));
            std::fs::write(&path, contents).expect("write secret file");
            Self { path }
        }

        fn path_str(&self) -> String {
            self.path.to_str().expect("utf-8 temp path").to_owned()
        }
    }

    impl Drop for TempSecretFile {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.path);
        }
    }

    fn mock_env(vars: HashMap<&'static str, String>) -> MockEnv {
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |key| vars.get(key).cloned());
        env
    }

    fn accepts(secret: &AdminSecret, key: &str) -> bool {
        AdminAuthenticator::new(secret).verify(Some(key)).is_ok()
    }

    #[rstest]
    #[case(BuildMode::Debug)]
    #[case(BuildMode::Release)]
    fn direct_variable_wins(#[case] mode: BuildMode) {
        let file = TempSecretFile::new("from-file");
        let env = mock_env(HashMap::from([
            (SECRET_ENV, " from-env ".to_owned()),
            (SECRET_FILE_ENV, file.path_str()),
        ]));
        let secret = admin_secret_from_env(&env, mode).expect("secret loads");
        assert!(accepts(&secret, "from-env"));
    }

    #[rstest]
    fn secret_file_is_read_and_trimmed() {
        let file = TempSecretFile::new("from-file\n");
        let env = mock_env(HashMap::from([(SECRET_FILE_ENV, file.path_str())]));
        let secret = admin_secret_from_env(&env, BuildMode::Release).expect("secret loads");
        assert!(accepts(&secret, "from-file"));
    }

    #[rstest]
    fn unreadable_secret_file_is_reported() {
        let env = mock_env(HashMap::from([(
            SECRET_FILE_ENV,
            "/nonexistent/admin-secret".to_owned(),
        )]));
        let err = admin_secret_from_env(&env, BuildMode::Debug).expect_err("read fails");
        assert!(matches!(err, AdminConfigError::SecretRead { .. }));
    }

    #[rstest]
    fn blank_secret_is_rejected() {
        let env = mock_env(HashMap::from([(SECRET_ENV, "   ".to_owned())]));
        let err = admin_secret_from_env(&env, BuildMode::Debug).expect_err("blank secret");
        assert!(matches!(err, AdminConfigError::EmptySecret { .. }));
    }

    #[rstest]
    fn release_requires_a_secret() {
        let env = mock_env(HashMap::new());
        let err = admin_secret_from_env(&env, BuildMode::Release).expect_err("missing");
        assert!(matches!(err, AdminConfigError::MissingSecret));
    }

    #[rstest]
    fn debug_generates_unguessable_ephemeral_secret() {
        let env = mock_env(HashMap::new());
        let secret = admin_secret_from_env(&env, BuildMode::Debug).expect("ephemeral");
        assert!(!accepts(&secret, ""));
        assert!(!accepts(&secret, "admin"));
    }
}
