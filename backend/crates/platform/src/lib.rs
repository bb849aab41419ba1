//! Platform Crate - Host and environment capabilities
//!
//! This crate answers questions about where the code is running:
//! - Host classification (browser vs embedded mobile shell)
//! - Advertising provider selection (AdSense vs AdMob)
//! - Request-header host signals for server-side detection
//! - Required configuration presence checks

pub mod ads;
pub mod client;
pub mod env;
pub mod host;

pub use ads::{AdCapability, AdManager, AdProvider, AdSlot};
pub use host::{DetectionError, HostProbe, HostSignals, Platform, StaticHostProbe};
