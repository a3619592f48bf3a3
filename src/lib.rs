//! Crawltoll — AI crawler classification and monetization decisions.
//!
//! Classifies inbound request metadata as human or AI bot and combines
//! the verdict with a site's monetization policy into an action.
//!
//! # Features
//!
//! - Signature table of known AI crawlers with per-company rates
//! - Suspicious-pattern fallback (headless browsers, scripting libraries)
//! - Heuristic scoring for unlabeled automated clients
//! - Policy decider: allow list and opt-out always beat revenue capture
//! - Content-type classification for logged requests
//!
//! # Example
//!
//! ```
//! use crawltoll::{DetectionEngine, RequestMetadata, SitePolicy};
//!
//! let engine = DetectionEngine::default();
//! let meta = RequestMetadata {
//!     user_agent: Some("Mozilla/5.0 (compatible; GPTBot/1.0)".to_string()),
//!     client_ip: "198.51.100.7".parse().unwrap(),
//!     page_url: "/articles/1".to_string(),
//!     site_url: "https://example.com".to_string(),
//! };
//! let policy = SitePolicy {
//!     monetization_enabled: true,
//!     ..SitePolicy::default()
//! };
//!
//! let outcome = engine.evaluate(&meta, &policy);
//! assert!(outcome.verdict.is_bot);
//! assert!(outcome.decision.should_monetize);
//! ```

pub mod config;
pub mod content;
pub mod decision;
pub mod detectors;
pub mod engine;
pub mod error;
pub mod verdict;

pub use config::EngineConfig;
pub use content::{classify_content, ContentClass};
pub use decision::{ActionDecider, ActionDecision, ActionType, SitePolicy};
pub use detectors::RequestMetadata;
pub use engine::{DetectionEngine, RequestOutcome};
pub use error::ConfigError;
pub use verdict::{BotType, BotVerdict, DetectionMethod};
