//! Client identification utilities
//!
//! Reads host signals from HTTP request headers, so a server can resolve the
//! ad capability of the client that called it.

use axum::http::{HeaderMap, header};

use crate::host::{DetectionError, HostProbe, HostSignals};

/// Header set by the mobile shell's native bridge (`ios` / `android`).
pub const NATIVE_PLATFORM_HEADER: &str = "x-native-platform";

/// [`HostProbe`] over the headers of a single request.
#[derive(Debug, Clone, Copy)]
pub struct RequestHostProbe<'a> {
    headers: &'a HeaderMap,
}

impl<'a> RequestHostProbe<'a> {
    pub fn new(headers: &'a HeaderMap) -> Self {
        Self { headers }
    }
}

impl HostProbe for RequestHostProbe<'_> {
    fn signals(&self) -> Result<HostSignals, DetectionError> {
        Ok(HostSignals {
            bridge_platform: header_str(self.headers, NATIVE_PLATFORM_HEADER)?,
            user_agent: header_str(self.headers, header::USER_AGENT.as_str())?,
        })
    }
}

/// Extract a header as text.
///
/// ## Returns
/// * `Ok(None)` - header absent
/// * `Err(DetectionError::MalformedSignal)` - header present but not visible ASCII
fn header_str(headers: &HeaderMap, name: &str) -> Result<Option<String>, DetectionError> {
    match headers.get(name) {
        None => Ok(None),
        Some(value) => value
            .to_str()
            .map(|v| Some(v.to_string()))
            .map_err(|e| DetectionError::MalformedSignal {
                name: name.to_string(),
                reason: e.to_string(),
            }),
    }
}
