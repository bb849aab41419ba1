//! Ad capability detection
//!
//! Maps the host [`Platform`] onto the advertising integration that can run
//! there. Detection never fails from the caller's point of view: a probe
//! error falls back to the web provider and is kept for diagnostics.

use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

use crate::host::{HostProbe, Platform};

/// Advertising SDK integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdProvider {
    AdSense,
    AdMob,
}

impl AdProvider {
    /// Provider usable on a given host. Unknown hosts fail open to AdSense.
    #[inline]
    pub const fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::Mobile => AdProvider::AdMob,
            Platform::Web | Platform::Unknown => AdProvider::AdSense,
        }
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            AdProvider::AdSense => "adsense",
            AdProvider::AdMob => "admob",
        }
    }
}

impl fmt::Display for AdProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Ad-rendering components and the provider each one is built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdSlot {
    Banner,
    Sidebar,
    Interstitial,
    RewardVideo,
}

impl AdSlot {
    #[inline]
    pub const fn provider(&self) -> AdProvider {
        match self {
            AdSlot::Banner | AdSlot::Sidebar => AdProvider::AdSense,
            AdSlot::Interstitial | AdSlot::RewardVideo => AdProvider::AdMob,
        }
    }
}

/// Resolved capability for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdCapability {
    pub is_initialized: bool,
    pub platform: Platform,
    pub ad_provider: AdProvider,
    /// Detection failure message, diagnostics only.
    pub error: Option<String>,
}

impl Default for AdCapability {
    fn default() -> Self {
        Self {
            is_initialized: false,
            platform: Platform::Web,
            ad_provider: AdProvider::AdSense,
            error: None,
        }
    }
}

impl AdCapability {
    /// Probe the host once and resolve the capability.
    pub fn detect<P: HostProbe + ?Sized>(probe: &P) -> Self {
        match probe.signals() {
            Ok(signals) => {
                let platform = signals.classify();
                let ad_provider = AdProvider::for_platform(platform);
                tracing::debug!(%platform, %ad_provider, "Ad capability detected");
                Self {
                    is_initialized: true,
                    platform,
                    ad_provider,
                    error: None,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Platform detection failed, falling back to web");
                Self {
                    is_initialized: true,
                    platform: Platform::Web,
                    ad_provider: AdProvider::AdSense,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Whether a slot may render. A mismatch is a silent no-render.
    #[inline]
    pub fn renders(&self, slot: AdSlot) -> bool {
        self.is_initialized && slot.provider() == self.ad_provider
    }
}

/// Caches the first resolved [`AdCapability`] for the rest of the session.
#[derive(Debug, Default)]
pub struct AdManager {
    capability: OnceLock<AdCapability>,
}

impl AdManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the capability on first call; later calls ignore the probe.
    pub fn initialize<P: HostProbe + ?Sized>(&self, probe: &P) -> &AdCapability {
        self.capability.get_or_init(|| AdCapability::detect(probe))
    }

    /// Current capability, or the uninitialized default.
    pub fn capability(&self) -> AdCapability {
        self.capability.get().cloned().unwrap_or_default()
    }

    pub fn renders(&self, slot: AdSlot) -> bool {
        self.capability.get().is_some_and(|c| c.renders(slot))
    }
}
