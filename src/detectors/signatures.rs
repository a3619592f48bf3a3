//! Signature table detector.
//!
//! Identifies known AI crawlers by their declared User-Agent markers.
//! First matching entry in table order wins.

use super::{Detector, RequestMetadata};
use crate::verdict::BotVerdict;
use rust_decimal::Decimal;
use std::sync::LazyLock;

/// A known AI crawler signature.
#[derive(Debug, Clone)]
pub struct BotSignature {
    /// Operating company
    pub company: &'static str,
    /// Suggested USD rate per request
    pub suggested_rate: Decimal,
    /// Classification confidence (0-100)
    pub confidence: u8,
}

/// Known AI crawler markers, matched as lowercase substrings.
///
/// Table order is insertion order of known companies; the first matching
/// marker wins. Markers are kept non-overlapping so no user-agent can
/// match two entries.
static SIGNATURES: LazyLock<Vec<(&'static str, BotSignature)>> = LazyLock::new(|| {
    vec![
        sig("gptbot", "OpenAI", "0.002", 95),
        sig("chatgpt-user", "OpenAI", "0.002", 90),
        sig("oai-searchbot", "OpenAI", "0.002", 90),
        sig("claudebot", "Anthropic", "0.002", 95),
        sig("claude-web", "Anthropic", "0.0015", 90),
        sig("anthropic-ai", "Anthropic", "0.0015", 90),
        sig("google-extended", "Google", "0.001", 90),
        sig("googleother", "Google", "0.001", 85),
        sig("ccbot", "Common Crawl", "0.001", 90),
        sig("bytespider", "ByteDance", "0.001", 90),
        sig("perplexitybot", "Perplexity", "0.0015", 95),
        sig("cohere-ai", "Cohere", "0.001", 85),
        sig("meta-externalagent", "Meta", "0.001", 90),
        sig("facebookbot", "Meta", "0.001", 85),
        sig("amazonbot", "Amazon", "0.001", 85),
        sig("applebot-extended", "Apple", "0.001", 90),
        sig("diffbot", "Diffbot", "0.001", 85),
        sig("omgili", "Webz.io", "0.001", 80),
        sig("timpibot", "Timpi", "0.0005", 80),
        sig("youbot", "You.com", "0.001", 85),
    ]
});

fn sig(
    marker: &'static str,
    company: &'static str,
    rate: &'static str,
    confidence: u8,
) -> (&'static str, BotSignature) {
    (
        marker,
        BotSignature {
            company,
            suggested_rate: rate.parse().expect("valid rate literal"),
            confidence,
        },
    )
}

/// Signature table matcher.
pub struct SignatureMatcher;

impl SignatureMatcher {
    /// Create a new signature matcher over the compiled table.
    pub fn new() -> Self {
        Self
    }

    /// Look up the first signature whose marker the user-agent contains.
    pub fn lookup(&self, ua: &str) -> Option<&'static BotSignature> {
        let ua_lower = ua.to_lowercase();
        SIGNATURES
            .iter()
            .find(|(marker, _)| ua_lower.contains(marker))
            .map(|(_, signature)| signature)
    }

    /// Number of entries in the signature table.
    pub fn table_len(&self) -> usize {
        SIGNATURES.len()
    }

    /// Iterate the table in definition order.
    pub fn entries(&self) -> impl Iterator<Item = &'static (&'static str, BotSignature)> {
        SIGNATURES.iter()
    }
}

impl Default for SignatureMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for SignatureMatcher {
    fn detect(&self, meta: &RequestMetadata) -> Option<BotVerdict> {
        let ua = meta.user_agent()?;
        self.lookup(ua).map(|signature| {
            BotVerdict::signature_match(
                signature.company,
                signature.confidence,
                signature.suggested_rate,
            )
        })
    }

    fn name(&self) -> &'static str {
        "signature_matcher"
    }
}
