//! Classification stages.
//!
//! Each detector inspects the request metadata and either produces a
//! verdict or yields to the next stage.

pub mod heuristics;
pub mod patterns;
pub mod signatures;

pub use heuristics::HeuristicScorer;
pub use patterns::PatternMatcher;
pub use signatures::SignatureMatcher;

use crate::verdict::BotVerdict;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Request metadata supplied by the ingress collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestMetadata {
    /// Raw User-Agent header, absent when the client sent none
    pub user_agent: Option<String>,
    /// Client IP address
    pub client_ip: IpAddr,
    /// Requested page URL (path or full URL)
    pub page_url: String,
    /// Site the request was served for
    pub site_url: String,
}

impl RequestMetadata {
    /// Get the user-agent, treating a whitespace-only value as absent.
    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent
            .as_deref()
            .map(str::trim)
            .filter(|ua| !ua.is_empty())
    }
}

/// Trait for classification stages.
///
/// Stages are pure functions over the request metadata: `None` means no
/// signal, and the engine falls through to the next stage.
pub trait Detector: Send + Sync {
    /// Inspect the request and return a verdict if this stage fires.
    fn detect(&self, meta: &RequestMetadata) -> Option<BotVerdict>;

    /// Get the detector name.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
pub(crate) fn test_metadata(ua: Option<&str>) -> RequestMetadata {
    RequestMetadata {
        user_agent: ua.map(str::to_string),
        client_ip: "127.0.0.1".parse().unwrap(),
        page_url: "/".to_string(),
        site_url: "https://example.com".to_string(),
    }
}
