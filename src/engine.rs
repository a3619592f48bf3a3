//! Detection engine: stage pipeline plus action decision.

use crate::config::EngineConfig;
use crate::content::{classify_content, ContentClass};
use crate::decision::{ActionDecider, ActionDecision, SitePolicy};
use crate::detectors::{
    Detector, HeuristicScorer, PatternMatcher, RequestMetadata, SignatureMatcher,
};
use crate::error::ConfigError;
use crate::verdict::BotVerdict;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Full evaluation record for a request, handed to the persistence
/// collaborator as an immutable log row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestOutcome {
    /// Classification verdict
    pub verdict: BotVerdict,
    /// Action decision
    pub decision: ActionDecision,
    /// Content category of the requested URL
    pub content: ContentClass,
}

/// Bot detection and monetization engine.
///
/// Stateless and synchronous: every call depends only on its inputs and
/// the static tables, so it is safe to share across any number of
/// concurrently handled requests.
pub struct DetectionEngine {
    config: EngineConfig,
    signatures: SignatureMatcher,
    patterns: PatternMatcher,
    heuristics: HeuristicScorer,
    decider: ActionDecider,
}

impl DetectionEngine {
    /// Create an engine from a validated configuration.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let decider = ActionDecider::new(
            config.thresholds.monetize_confidence,
            config.fallback_rate,
        );
        Ok(Self {
            config,
            signatures: SignatureMatcher::new(),
            patterns: PatternMatcher::new(),
            heuristics: HeuristicScorer::new(),
            decider,
        })
    }

    /// Classify a request into a verdict.
    ///
    /// Stages run in order — signature table, suspicious patterns,
    /// heuristic score — and the first one that fires wins. A missing or
    /// blank user-agent yields the zero verdict without running any stage.
    pub fn classify(&self, meta: &RequestMetadata) -> BotVerdict {
        if meta.user_agent().is_none() {
            debug!(client_ip = %meta.client_ip, "No user-agent, skipping detection");
            return BotVerdict::default();
        }

        if self.config.detection.signature_lookup {
            if let Some(verdict) = self.signatures.detect(meta) {
                debug!(
                    detector = self.signatures.name(),
                    company = verdict.company.as_deref().unwrap_or(""),
                    confidence = verdict.confidence,
                    "Signature match"
                );
                return verdict;
            }
        }

        if self.config.detection.pattern_matching {
            if let Some(verdict) = self.patterns.detect(meta) {
                debug!(
                    detector = self.patterns.name(),
                    confidence = verdict.confidence,
                    "Pattern match"
                );
                return verdict;
            }
        }

        if self.config.detection.heuristic_scoring {
            if let Some(verdict) = self.heuristics.detect(meta) {
                debug!(
                    detector = self.heuristics.name(),
                    confidence = verdict.confidence,
                    "Heuristic match"
                );
                return verdict;
            }
        }

        BotVerdict::default()
    }

    /// Decide the action for an already-computed verdict.
    pub fn decide(&self, verdict: &BotVerdict, policy: &SitePolicy) -> ActionDecision {
        self.decider.decide(verdict, policy)
    }

    /// Classify a request and decide the action under the site's policy.
    pub fn evaluate(&self, meta: &RequestMetadata, policy: &SitePolicy) -> RequestOutcome {
        let verdict = self.classify(meta);
        let decision = self.decide(&verdict, policy);
        let content = classify_content(&meta.page_url);

        info!(
            client_ip = %meta.client_ip,
            page_url = %meta.page_url,
            is_bot = verdict.is_bot,
            bot_name = verdict.bot_name.as_deref().unwrap_or(""),
            confidence = verdict.confidence,
            detection = verdict.detection.as_str(),
            action = decision.action.as_str(),
            revenue = %decision.revenue,
            content = content.as_str(),
            "Request evaluated"
        );

        RequestOutcome {
            verdict,
            decision,
            content,
        }
    }
}

impl Default for DetectionEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default()).expect("default config is valid")
    }
}
