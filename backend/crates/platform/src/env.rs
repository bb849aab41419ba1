//! Environment validation
//!
//! Presence checks for required configuration values. A missing value is a
//! normal outcome reported in [`EnvReport`]; an unreadable one is an
//! [`EnvError`].

use std::collections::HashMap;

/// Keys the service cannot run correctly without.
pub const REQUIRED_ENV: &[&str] = &["DATABASE_URL", "SUPABASE_URL", "SUPABASE_ANON_KEY"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvError {
    #[error("Environment variable {0} is not valid unicode")]
    NotUnicode(String),
}

/// Where configuration values are read from.
pub trait EnvSource {
    /// `Ok(None)` when the key is not set.
    fn var(&self, key: &str) -> Result<Option<String>, EnvError>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Result<Option<String>, EnvError> {
        match std::env::var(key) {
            Ok(value) => Ok(Some(value)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(std::env::VarError::NotUnicode(_)) => Err(EnvError::NotUnicode(key.to_string())),
        }
    }
}

/// Fixed key/value map.
#[derive(Debug, Clone, Default)]
pub struct MapEnv(pub HashMap<String, String>);

impl MapEnv {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl EnvSource for MapEnv {
    fn var(&self, key: &str) -> Result<Option<String>, EnvError> {
        Ok(self.0.get(key).cloned())
    }
}

/// Result of a presence check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvReport {
    pub missing: Vec<String>,
}

impl EnvReport {
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Check that every key in `required` is set to a non-blank value.
pub fn validate_required<E: EnvSource + ?Sized>(
    source: &E,
    required: &[&str],
) -> Result<EnvReport, EnvError> {
    let mut missing = Vec::new();
    for key in required {
        match source.var(key)? {
            Some(value) if !value.trim().is_empty() => {}
            _ => missing.push((*key).to_string()),
        }
    }

    if !missing.is_empty() {
        tracing::warn!(missing = ?missing, "Required environment values are missing");
    }

    Ok(EnvReport { missing })
}
