//! Monetization policy and action decision.

use crate::verdict::BotVerdict;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Zero revenue with two decimal places, so log rows render "0.00".
static ZERO_REVENUE: LazyLock<Decimal> =
    LazyLock::new(|| "0.00".parse().expect("valid rate literal"));

/// Per-site monetization settings, read from the site-configuration
/// collaborator. Treated as read-only input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SitePolicy {
    /// Whether the site owner opted into monetization
    pub monetization_enabled: bool,

    /// Lowercase bot-name fragments exempted from monetization
    pub allowed_bots: Vec<String>,

    /// Site-configured USD rate per request, preferred over the verdict's
    /// suggested rate when present
    pub pricing_per_request: Option<Decimal>,
}

impl SitePolicy {
    /// Check whether a detected bot name is covered by the allow list.
    ///
    /// The check is a bidirectional case-insensitive substring test: an
    /// entry matches when the bot name contains it or it contains the bot
    /// name.
    pub fn is_allowed(&self, bot_name: &str) -> bool {
        let name = bot_name.to_lowercase();
        self.allowed_bots.iter().any(|entry| {
            let entry = entry.to_lowercase();
            name.contains(&entry) || entry.contains(&name)
        })
    }
}

/// Action taken for a classified request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Recorded only, no enforcement
    Logged,
    /// Explicitly let through
    Allowed,
    /// Denied by an enforcement collaborator
    Blocked,
    /// Converted into a billable event
    Monetized,
}

impl ActionType {
    /// Returns the action as a string for log rows.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Logged => "logged",
            ActionType::Allowed => "allowed",
            ActionType::Blocked => "blocked",
            ActionType::Monetized => "monetized",
        }
    }
}

/// Decision output consumed by the logging collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDecision {
    /// Action taken
    pub action: ActionType,

    /// Whether the request should be denied
    pub should_block: bool,

    /// Whether the request produced revenue
    pub should_monetize: bool,

    /// Revenue amount in USD; zero unless monetized
    pub revenue: Decimal,

    /// Free-form reason for the decision
    pub reason: Option<String>,
}

impl ActionDecision {
    /// Log-only decision with zero revenue.
    pub fn logged() -> Self {
        Self {
            action: ActionType::Logged,
            should_block: false,
            should_monetize: false,
            revenue: *ZERO_REVENUE,
            reason: None,
        }
    }

    /// Allow decision with zero revenue.
    pub fn allowed() -> Self {
        Self {
            action: ActionType::Allowed,
            should_block: false,
            should_monetize: false,
            revenue: *ZERO_REVENUE,
            reason: None,
        }
    }

    /// Block decision for enforcement collaborators. Never produced by the
    /// decider itself.
    pub fn blocked() -> Self {
        Self {
            action: ActionType::Blocked,
            should_block: true,
            should_monetize: false,
            revenue: *ZERO_REVENUE,
            reason: None,
        }
    }

    /// Monetized decision with the given revenue.
    pub fn monetized(revenue: Decimal) -> Self {
        Self {
            action: ActionType::Monetized,
            should_block: false,
            should_monetize: true,
            revenue,
            reason: None,
        }
    }

    /// Attach a reason for the decision.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// Combines a classification verdict with the site policy into an action.
pub struct ActionDecider {
    /// Minimum confidence for a billable action (0-100)
    pub monetize_confidence: u8,
    /// Rate applied when neither the site nor the signature names one
    pub fallback_rate: Decimal,
}

impl ActionDecider {
    /// Create a decider with the given tunables.
    pub fn new(monetize_confidence: u8, fallback_rate: Decimal) -> Self {
        Self {
            monetize_confidence,
            fallback_rate,
        }
    }

    /// Decide the action for a verdict under a site's policy.
    ///
    /// Rules are evaluated in order, first applicable wins: not a bot is
    /// only logged; the opt-out and the allow list always take precedence
    /// over revenue capture; only AI bots at or above the confidence floor
    /// are monetized; everything else falls through to a plain log entry.
    pub fn decide(&self, verdict: &BotVerdict, policy: &SitePolicy) -> ActionDecision {
        if !verdict.is_bot {
            return ActionDecision::logged();
        }

        if !policy.monetization_enabled {
            return ActionDecision::allowed().with_reason("monetization_disabled");
        }

        if let Some(name) = verdict.bot_name.as_deref() {
            if policy.is_allowed(name) {
                return ActionDecision::allowed().with_reason("allow_list_match");
            }
        }

        if verdict.is_ai_bot && verdict.confidence >= self.monetize_confidence {
            let revenue = policy
                .pricing_per_request
                .or(verdict.suggested_rate)
                .unwrap_or(self.fallback_rate);
            return ActionDecision::monetized(revenue);
        }

        ActionDecision::logged().with_reason("below_monetize_confidence")
    }
}

impl Default for ActionDecider {
    fn default() -> Self {
        Self {
            monetize_confidence: 70,
            fallback_rate: "0.001".parse().expect("valid rate literal"),
        }
    }
}
