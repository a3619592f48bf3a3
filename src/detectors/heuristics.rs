//! Heuristic scoring detector.
//!
//! Last-resort stage for user-agents with no signature or pattern hit.
//! Accumulates an additive score from structural traits and classifies as
//! a bot when the score crosses the threshold.

use super::{Detector, RequestMetadata};
use crate::verdict::BotVerdict;
use std::net::IpAddr;

/// Keywords hinting at an automated client. Each one found adds to the
/// score independently.
const BOT_KEYWORDS: [&str; 8] = [
    "bot", "crawler", "spider", "scraper", "fetch", "http", "client", "agent",
];

/// Substrings real browsers carry. Matched case-sensitively.
const BROWSER_TOKENS: [&str; 3] = ["Mozilla", "Chrome", "Safari"];

/// Score at or above which the request is classified as a bot.
const BOT_SCORE_THRESHOLD: u32 = 40;

/// Heuristic scorer detector.
pub struct HeuristicScorer;

impl HeuristicScorer {
    /// Create a new heuristic scorer.
    pub fn new() -> Self {
        Self
    }

    /// Compute the heuristic score for a user-agent.
    ///
    /// The client IP is accepted for interface parity with the other
    /// stages but does not contribute to the score.
    pub fn score(&self, ua: &str, client_ip: IpAddr) -> u32 {
        let _ = client_ip;
        let mut score = 0u32;

        // Abnormal length
        if ua.len() < 20 || ua.len() > 500 {
            score += 25;
        }

        // Automation keywords, each counted once
        let ua_lower = ua.to_lowercase();
        for keyword in BOT_KEYWORDS {
            if ua_lower.contains(keyword) {
                score += 10;
            }
        }

        // No browser token at all
        if !BROWSER_TOKENS.iter().any(|token| ua.contains(token)) {
            score += 20;
        }

        score
    }
}

impl Default for HeuristicScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for HeuristicScorer {
    fn detect(&self, meta: &RequestMetadata) -> Option<BotVerdict> {
        let ua = meta.user_agent()?;
        let score = self.score(ua, meta.client_ip);
        if score >= BOT_SCORE_THRESHOLD {
            tracing::debug!(score, "Heuristic score over threshold");
            Some(BotVerdict::heuristic(score))
        } else {
            None
        }
    }

    fn name(&self) -> &'static str {
        "heuristic_scorer"
    }
}
