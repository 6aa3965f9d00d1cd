//! Hydration data bridge.
//!
//! Gives the page layer one uniform way to read "this page's data",
//! whether it is running inside a server render or on the client after
//! hydration:
//!
//! - on the server, the document assembler constructs a fresh `SsrData`
//!   per request and threads it through the render call — nothing is
//!   shared across concurrent requests;
//! - on the client, `SsrData::from_payload` parses the embedded global
//!   left by the server exactly once; no payload means empty data and
//!   the page fetches on its own.
//!
//! The bridge is a one-time seed: consumers copy what they need at mount
//! and own their state afterwards. It never mutates data, only relays it.

use super::resolver::PageData;

/// Well-known global the inline script assigns the payload to.
pub const HYDRATION_GLOBAL: &str = "__VITRINE_DATA__";

/// Request-scoped holder for resolved page data.
#[derive(Debug, Clone, Default)]
pub struct SsrData {
    data: PageData,
}

impl SsrData {
    /// Wrap freshly-resolved data for one server render.
    pub fn new(data: PageData) -> Self {
        Self { data }
    }

    /// Bridge with no data; consuming pages must fetch independently.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Client startup path: parse the embedded payload, if any.
    ///
    /// An absent or unparsable payload yields an empty bridge rather
    /// than an error.
    pub fn from_payload(payload: Option<&str>) -> Self {
        let data = payload
            .and_then(|raw| serde_json::from_str(raw).ok())
            .map(|value| PageData::from_json(&value))
            .unwrap_or_default();
        Self { data }
    }

    /// The data resolved for this page.
    pub fn data(&self) -> &PageData {
        &self.data
    }
}
