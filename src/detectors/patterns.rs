//! Suspicious-pattern detector.
//!
//! Fallback for user-agents that carry automated-client traits without a
//! known signature: headless browser markers, scripting libraries,
//! generic bot tokens, AI terms.

use super::{Detector, RequestMetadata};
use crate::verdict::BotVerdict;
use regex::Regex;
use std::sync::LazyLock;

/// Patterns indicating an automated client, scanned in list order against
/// the raw user-agent. All are case-insensitive via the `(?i)` flag.
static SUSPICIOUS_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        // Headless browsers and automation frameworks
        (r"(?i)headless", "headless_marker"),
        (r"(?i)phantomjs", "phantomjs"),
        (r"(?i)puppeteer", "puppeteer"),
        (r"(?i)playwright", "playwright"),
        (r"(?i)selenium", "selenium"),
        // Scripting libraries and HTTP clients
        (r"(?i)python-requests", "python_requests"),
        (r"(?i)python-urllib", "python_urllib"),
        (r"(?i)aiohttp", "aiohttp"),
        (r"(?i)scrapy", "scrapy"),
        (r"(?i)go-http-client", "go_http_client"),
        (r"(?i)node-fetch", "node_fetch"),
        (r"(?i)axios", "axios"),
        (r"(?i)curl/", "curl"),
        (r"(?i)wget/", "wget"),
        (r"(?i)libwww", "libwww"),
        // Generic automation tokens
        (r"(?i)bot", "generic_bot"),
        (r"(?i)crawler", "generic_crawler"),
        (r"(?i)spider", "generic_spider"),
        (r"(?i)scraper", "generic_scraper"),
        (r"(?i)scraping", "generic_scraping"),
        // AI terms
        (r"(?i)gpt", "ai_term_gpt"),
        (r"(?i)\bllm\b", "ai_term_llm"),
        (r"(?i)\bai\b", "ai_term_ai"),
    ]
    .into_iter()
    .map(|(pattern, reason)| (Regex::new(pattern).expect("valid pattern"), reason))
    .collect()
});

/// Suspicious-pattern matcher.
pub struct PatternMatcher;

impl PatternMatcher {
    /// Create a new pattern matcher over the compiled list.
    pub fn new() -> Self {
        Self
    }

    /// Return the label of the first pattern matching the user-agent.
    pub fn first_match(&self, ua: &str) -> Option<&'static str> {
        SUSPICIOUS_PATTERNS
            .iter()
            .find(|(pattern, _)| pattern.is_match(ua))
            .map(|(_, reason)| *reason)
    }
}

impl Default for PatternMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for PatternMatcher {
    fn detect(&self, meta: &RequestMetadata) -> Option<BotVerdict> {
        let ua = meta.user_agent()?;
        self.first_match(ua).map(|reason| {
            tracing::debug!(pattern = reason, "Suspicious pattern matched");
            BotVerdict::pattern_match()
        })
    }

    fn name(&self) -> &'static str {
        "pattern_matcher"
    }
}
