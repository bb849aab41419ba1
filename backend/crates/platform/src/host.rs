//! Host platform classification
//!
//! Decides whether the code is serving a standard browser or the embedded
//! mobile shell. Signals are only available at run time, so they are read
//! through a [`HostProbe`] and then classified into a closed [`Platform`] set.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime host, as far as advertising is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Web,
    Mobile,
    Unknown,
}

impl Platform {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Platform::Web => "web",
            Platform::Mobile => "mobile",
            Platform::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Raw signals gathered from the host before classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostSignals {
    /// Platform name reported by the native bridge (`ios`, `android`, `web`),
    /// `None` when no bridge is present.
    pub bridge_platform: Option<String>,
    /// User agent of the hosting browser or web view.
    pub user_agent: Option<String>,
}

impl HostSignals {
    pub fn browser(user_agent: impl Into<String>) -> Self {
        Self {
            bridge_platform: None,
            user_agent: Some(user_agent.into()),
        }
    }

    pub fn native(platform: impl Into<String>) -> Self {
        Self {
            bridge_platform: Some(platform.into()),
            user_agent: None,
        }
    }

    /// Classify the signals into exactly one [`Platform`].
    ///
    /// A bridge always takes precedence over the user agent: the mobile shell
    /// embeds a web view whose user agent looks like a browser.
    pub fn classify(&self) -> Platform {
        match self.bridge_platform.as_deref().map(str::trim) {
            Some(p) if p.eq_ignore_ascii_case("ios") || p.eq_ignore_ascii_case("android") => {
                Platform::Mobile
            }
            Some(p) if p.eq_ignore_ascii_case("web") => Platform::Web,
            Some(_) => Platform::Unknown,
            None => match self.user_agent.as_deref() {
                Some(ua) if !ua.trim().is_empty() => Platform::Web,
                _ => Platform::Unknown,
            },
        }
    }
}

/// Detection failed before any signal could be read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DetectionError {
    #[error("Native bridge unavailable: {0}")]
    BridgeUnavailable(String),

    #[error("Malformed host signal `{name}`: {reason}")]
    MalformedSignal { name: String, reason: String },
}

/// Source of host signals.
pub trait HostProbe {
    fn signals(&self) -> Result<HostSignals, DetectionError>;
}

/// Probe returning fixed signals, for hosts that know their environment up front.
#[derive(Debug, Clone, Default)]
pub struct StaticHostProbe(pub HostSignals);

impl HostProbe for StaticHostProbe {
    fn signals(&self) -> Result<HostSignals, DetectionError> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_native_bridge() {
        assert_eq!(HostSignals::native("android").classify(), Platform::Mobile);
        assert_eq!(HostSignals::native("iOS").classify(), Platform::Mobile);
        assert_eq!(HostSignals::native("web").classify(), Platform::Web);
        assert_eq!(HostSignals::native("electron").classify(), Platform::Unknown);
    }

    #[test]
    fn test_bridge_wins_over_user_agent() {
        let signals = HostSignals {
            bridge_platform: Some("android".to_string()),
            user_agent: Some("Mozilla/5.0 (Linux; Android 14; wv)".to_string()),
        };
        assert_eq!(signals.classify(), Platform::Mobile);
    }

    #[test]
    fn test_classify_browser_and_empty() {
        assert_eq!(
            HostSignals::browser("Mozilla/5.0 Test Browser").classify(),
            Platform::Web
        );
        assert_eq!(HostSignals::browser("   ").classify(), Platform::Unknown);
        assert_eq!(HostSignals::default().classify(), Platform::Unknown);
    }

    #[test]
    fn test_platform_display() {
        assert_eq!(Platform::Web.to_string(), "web");
        assert_eq!(Platform::Mobile.to_string(), "mobile");
        assert_eq!(Platform::Unknown.to_string(), "unknown");
    }
}
