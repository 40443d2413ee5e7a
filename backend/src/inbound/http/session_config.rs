//! Session cookie configuration read from the environment.
//!
//! | Variable                  | Values                 | Debug default      |
//! |---------------------------|------------------------|--------------------|
//! | `SESSION_KEY_FILE`        | path                   | ephemeral key      |
//! | `SESSION_COOKIE_SECURE`   | boolean                | `true`             |
//! | `SESSION_SAMESITE`        | `Strict`/`Lax`/`None`  | `Lax`              |
//! | `SESSION_ALLOW_EPHEMERAL` | boolean                | `false`            |
//!
//! Debug builds warn and fall back on missing or malformed values. Release
//! builds refuse to start instead.

use std::path::{Path, PathBuf};

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroizing;

const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const SAMESITE_ENV: &str = "SESSION_SAMESITE";
const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
const DEFAULT_KEY_FILE: &str = "/var/run/secrets/session_key";
const MIN_KEY_LEN: usize = 64;
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Which validation regime applies.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Tolerant: warn and fall back.
    Debug,
    /// Strict: every toggle must be present and valid.
    Release,
}

impl BuildMode {
    /// The mode matching `cfg!(debug_assertions)`.
    ///
    /// ```rust
    /// use marketplace::inbound::http::session_config::BuildMode;
    ///
    /// let expected = if cfg!(debug_assertions) { BuildMode::Debug } else { BuildMode::Release };
    /// assert_eq!(BuildMode::from_debug_assertions(), expected);
    /// ```
    #[must_use]
    pub const fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// Resolved session cookie settings.
pub struct SessionSettings {
    /// Signing and encryption key for the cookie.
    pub key: Key,
    /// Whether the cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
    /// `SameSite` policy.
    pub same_site: SameSite,
}

/// Reasons the session configuration was rejected.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// A required variable is unset.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable holds a value outside its domain.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// The key file could not be read.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The key file holds fewer bytes than a release build accepts.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// `SameSite=None` without `Secure` in a release build.
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    /// Ephemeral keys were requested in a release build.
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Environment reader applying the build mode's leniency.
struct Toggles<'a, E> {
    env: &'a E,
    mode: BuildMode,
}

impl<E: Env> Toggles<'_, E> {
    fn resolve<T: Copy>(
        &self,
        name: &'static str,
        expected: &'static str,
        parse: fn(&str) -> Option<T>,
        fallback: T,
    ) -> Result<T, SessionConfigError> {
        let Some(value) = self.env.string(name) else {
            return match self.mode {
                BuildMode::Debug => {
                    warn!(variable = name, "not set; using development default");
                    Ok(fallback)
                }
                BuildMode::Release => Err(SessionConfigError::MissingEnv { name }),
            };
        };
        match (parse(&value), self.mode) {
            (Some(parsed), _) => Ok(parsed),
            (None, BuildMode::Debug) => {
                warn!(variable = name, %value, "invalid value; using development default");
                Ok(fallback)
            }
            (None, BuildMode::Release) => Err(SessionConfigError::InvalidEnv {
                name,
                value,
                expected,
            }),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

fn parse_same_site(value: &str) -> Option<SameSite> {
    match value.trim().to_ascii_lowercase().as_str() {
        "strict" => Some(SameSite::Strict),
        "lax" => Some(SameSite::Lax),
        "none" => Some(SameSite::None),
        _ => None,
    }
}

/// Read session settings from `env`.
///
/// # Examples
///
/// ```rust
/// use marketplace::inbound::http::session_config::{BuildMode, session_settings_from_env};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "SESSION_KEY_FILE" => Some("/nonexistent/session_key".to_owned()),
///     "SESSION_SAMESITE" => Some("Strict".to_owned()),
///     _ => None,
/// });
///
/// let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug is lenient");
/// assert!(settings.cookie_secure);
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let toggles = Toggles { env, mode };
    let cookie_secure = toggles.resolve(COOKIE_SECURE_ENV, BOOL_EXPECTED, parse_bool, true)?;
    let same_site = toggles.resolve(
        SAMESITE_ENV,
        SAMESITE_EXPECTED,
        parse_same_site,
        SameSite::Lax,
    )?;
    if same_site == SameSite::None && !cookie_secure {
        match mode {
            BuildMode::Debug => {
                warn!("SameSite=None without Secure; browsers will drop the cookie");
            }
            BuildMode::Release => return Err(SessionConfigError::InsecureSameSiteNone),
        }
    }
    let allow_ephemeral = toggles.resolve(ALLOW_EPHEMERAL_ENV, BOOL_EXPECTED, parse_bool, false)?;
    if allow_ephemeral && mode == BuildMode::Release {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }

    let path = env
        .string(KEY_FILE_ENV)
        .map_or_else(|| PathBuf::from(DEFAULT_KEY_FILE), PathBuf::from);
    let key = load_key(&path, mode, allow_ephemeral)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

fn load_key(
    path: &Path,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => Zeroizing::new(bytes),
        Err(source) if mode == BuildMode::Debug || allow_ephemeral => {
            warn!(path = %path.display(), error = %source, "using an ephemeral session key");
            return Ok(Key::generate());
        }
        Err(source) => {
            return Err(SessionConfigError::KeyRead {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    if mode == BuildMode::Release && bytes.len() < MIN_KEY_LEN {
        return Err(SessionConfigError::KeyTooShort {
            path: path.to_path_buf(),
            length: bytes.len(),
            min_len: MIN_KEY_LEN,
        });
    }
    Ok(Key::derive_from(&bytes))
}
