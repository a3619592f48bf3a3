//! Classification verdict types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Bot type classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BotType {
    /// AI crawler (GPTBot, ClaudeBot, CCBot, etc.)
    AiBot,
    /// Search engine crawler
    SearchBot,
    /// Social media crawler
    SocialBot,
    /// Unknown/unclassified
    #[default]
    Unknown,
}

impl BotType {
    /// Returns the type as a string for log rows.
    pub fn as_str(&self) -> &'static str {
        match self {
            BotType::AiBot => "ai_bot",
            BotType::SearchBot => "search_bot",
            BotType::SocialBot => "social_bot",
            BotType::Unknown => "unknown",
        }
    }
}

/// How the verdict was reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    /// Matched an entry in the signature table
    SignatureMatch,
    /// Matched a suspicious user-agent pattern
    PatternMatch,
    /// Crossed the heuristic score threshold
    Heuristic,
    /// No detection fired
    #[default]
    None,
}

impl DetectionMethod {
    /// Returns the method as a string for log rows.
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectionMethod::SignatureMatch => "signature_match",
            DetectionMethod::PatternMatch => "pattern_match",
            DetectionMethod::Heuristic => "heuristic",
            DetectionMethod::None => "none",
        }
    }
}

/// Classification result for a single request.
///
/// The zero value (`Default`) means "not a bot": confidence 0, no name,
/// no rate, detection method `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BotVerdict {
    /// Whether the request is classified as automated
    pub is_bot: bool,

    /// Whether the bot is an AI crawler
    pub is_ai_bot: bool,

    /// Bot type classification
    pub bot_type: BotType,

    /// Detected bot name if any (e.g. "OpenAI", "Unknown AI Bot")
    pub bot_name: Option<String>,

    /// Operating company if known
    pub company: Option<String>,

    /// Classification confidence (0-100)
    pub confidence: u8,

    /// Suggested USD rate per request, from the signature table
    pub suggested_rate: Option<Decimal>,

    /// How the verdict was reached
    pub detection: DetectionMethod,
}

impl BotVerdict {
    /// Verdict for a request with no bot signal.
    pub fn human() -> Self {
        Self::default()
    }

    /// Verdict for a signature-table match.
    pub fn signature_match(company: impl Into<String>, confidence: u8, rate: Decimal) -> Self {
        let company = company.into();
        Self {
            is_bot: true,
            is_ai_bot: true,
            bot_type: BotType::AiBot,
            bot_name: Some(company.clone()),
            company: Some(company),
            confidence,
            suggested_rate: Some(rate),
            detection: DetectionMethod::SignatureMatch,
        }
    }

    /// Verdict for a suspicious-pattern match. Fixed confidence of 70.
    pub fn pattern_match() -> Self {
        Self {
            is_bot: true,
            is_ai_bot: true,
            bot_type: BotType::AiBot,
            bot_name: Some("Unknown AI Bot".to_string()),
            company: None,
            confidence: 70,
            suggested_rate: None,
            detection: DetectionMethod::PatternMatch,
        }
    }

    /// Verdict for a heuristic score past the threshold. Confidence is the
    /// score capped at 85.
    pub fn heuristic(score: u32) -> Self {
        Self {
            is_bot: true,
            is_ai_bot: true,
            bot_type: BotType::AiBot,
            bot_name: Some("Potential AI Bot".to_string()),
            company: None,
            confidence: score.min(85) as u8,
            suggested_rate: None,
            detection: DetectionMethod::Heuristic,
        }
    }
}
