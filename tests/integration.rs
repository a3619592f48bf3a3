//! Integration tests for the crawltoll engine.
//!
//! These tests verify the complete pipeline: configuration parsing,
//! classification stages, action decisions, and the serialized outcome
//! records.

use crawltoll::config::ThresholdConfig;
use crawltoll::{
    classify_content, ActionType, BotVerdict, ContentClass, DetectionEngine, DetectionMethod,
    EngineConfig, RequestMetadata, SitePolicy,
};
use rust_decimal::Decimal;

fn metadata(ua: Option<&str>, page_url: &str) -> RequestMetadata {
    RequestMetadata {
        user_agent: ua.map(str::to_string),
        client_ip: "198.51.100.7".parse().unwrap(),
        page_url: page_url.to_string(),
        site_url: "https://example.com".to_string(),
    }
}

fn policy(enabled: bool, allowed: &[&str], pricing: Option<&str>) -> SitePolicy {
    SitePolicy {
        monetization_enabled: enabled,
        allowed_bots: allowed.iter().map(|s| s.to_string()).collect(),
        pricing_per_request: pricing.map(|p| p.parse().unwrap()),
    }
}

// =============================================================================
// Configuration Tests
// =============================================================================

#[test]
fn test_default_config_is_valid() {
    let config = EngineConfig::default();

    assert!(config.detection.signature_lookup);
    assert!(config.detection.pattern_matching);
    assert!(config.detection.heuristic_scoring);
    assert_eq!(config.thresholds.monetize_confidence, 70);
    assert_eq!(config.fallback_rate.to_string(), "0.001");

    assert!(DetectionEngine::new(config).is_ok());
}

#[test]
fn test_config_from_json() {
    let json = r#"{
        "detection": {
            "signature_lookup": true,
            "pattern_matching": true,
            "heuristic_scoring": false
        },
        "thresholds": { "monetize_confidence": 80 },
        "fallback_rate": "0.0005"
    }"#;

    let config: EngineConfig = serde_json::from_str(json).unwrap();
    assert!(!config.detection.heuristic_scoring);
    assert_eq!(config.thresholds.monetize_confidence, 80);
    assert_eq!(config.fallback_rate.to_string(), "0.0005");
}

#[test]
fn test_config_from_yaml() {
    let yaml = r#"
detection:
  pattern_matching: false
thresholds:
  monetize_confidence: 90
"#;
    let config: EngineConfig = serde_yaml::from_str(yaml).unwrap();
    assert!(!config.detection.pattern_matching);
    assert!(config.detection.signature_lookup);
    assert_eq!(config.thresholds.monetize_confidence, 90);
}

#[test]
fn test_out_of_range_threshold_is_rejected() {
    let config = EngineConfig {
        thresholds: ThresholdConfig {
            monetize_confidence: 150,
        },
        ..EngineConfig::default()
    };
    assert!(DetectionEngine::new(config).is_err());
}

// =============================================================================
// Classification Tests
// =============================================================================

#[test]
fn test_known_signatures_match_in_any_case() {
    let engine = DetectionEngine::default();

    for (ua, company, confidence) in [
        ("Mozilla/5.0 (compatible; GPTBot/1.0)", "OpenAI", 95),
        ("mozilla/5.0 (compatible; gptbot/1.0)", "OpenAI", 95),
        ("CLAUDEBOT/1.0", "Anthropic", 95),
        ("CCBot/2.0 (https://commoncrawl.org/faq/)", "Common Crawl", 90),
        ("Bytespider; https://zhanzhang.toutiao.com/", "ByteDance", 90),
        ("PerplexityBot/1.0", "Perplexity", 95),
    ] {
        let verdict = engine.classify(&metadata(Some(ua), "/"));
        assert!(verdict.is_bot, "ua: {ua}");
        assert!(verdict.is_ai_bot, "ua: {ua}");
        assert_eq!(verdict.company.as_deref(), Some(company), "ua: {ua}");
        assert_eq!(verdict.confidence, confidence, "ua: {ua}");
        assert_eq!(verdict.detection, DetectionMethod::SignatureMatch, "ua: {ua}");
    }
}

#[test]
fn test_missing_and_empty_user_agent_yield_zero_verdict() {
    let engine = DetectionEngine::default();

    for ua in [None, Some("")] {
        let verdict = engine.classify(&metadata(ua, "/"));
        assert_eq!(verdict, BotVerdict::default(), "ua: {ua:?}");
        assert!(!verdict.is_bot);
        assert_eq!(verdict.confidence, 0);
        assert_eq!(verdict.detection, DetectionMethod::None);
    }
}

#[test]
fn test_pattern_match_is_case_insensitive() {
    let engine = DetectionEngine::default();

    for ua in ["python-requests/2.28", "Python-Requests/2.28"] {
        let verdict = engine.classify(&metadata(Some(ua), "/"));
        assert_eq!(verdict.detection, DetectionMethod::PatternMatch, "ua: {ua}");
        assert_eq!(verdict.confidence, 70);
        assert_eq!(verdict.bot_name.as_deref(), Some("Unknown AI Bot"));
    }
}

#[test]
fn test_heuristic_confidence_tracks_score() {
    let engine = DetectionEngine::default();

    // 5 chars (+25), no keywords, no browser token (+20): score 45
    let verdict = engine.classify(&metadata(Some("short"), "/"));
    assert!(verdict.is_bot);
    assert_eq!(verdict.confidence, 45);
    assert_eq!(verdict.detection, DetectionMethod::Heuristic);
    assert_eq!(verdict.bot_name.as_deref(), Some("Potential AI Bot"));
}

// =============================================================================
// Decision Precedence Tests
// =============================================================================

#[test]
fn test_allow_list_overrides_high_confidence() {
    let engine = DetectionEngine::default();
    let verdict = engine.classify(&metadata(Some("GPTBot/1.0"), "/"));
    assert_eq!(verdict.confidence, 95);

    let decision = engine.decide(&verdict, &policy(true, &["openai"], Some("0.002")));
    assert_eq!(decision.action, ActionType::Allowed);
    assert!(!decision.should_monetize);
    assert_eq!(decision.revenue.to_string(), "0.00");
}

#[test]
fn test_disabled_monetization_overrides_any_bot() {
    let engine = DetectionEngine::default();
    let verdict = engine.classify(&metadata(Some("ClaudeBot/1.0"), "/"));
    assert_eq!(verdict.confidence, 95);

    let decision = engine.decide(&verdict, &policy(false, &[], Some("0.01")));
    assert_eq!(decision.action, ActionType::Allowed);
    assert_eq!(decision.revenue.to_string(), "0.00");
}

#[test]
fn test_revenue_priority_order() {
    let engine = DetectionEngine::default();
    let verdict = engine.classify(&metadata(Some("GPTBot/1.0"), "/"));
    let suggested: Decimal = "0.002".parse().unwrap();
    assert_eq!(verdict.suggested_rate, Some(suggested));

    // Site pricing first
    let decision = engine.decide(&verdict, &policy(true, &[], Some("0.004")));
    assert_eq!(decision.revenue.to_string(), "0.004");

    // Signature suggested rate second
    let decision = engine.decide(&verdict, &policy(true, &[], None));
    assert_eq!(decision.revenue.to_string(), "0.002");

    // Fallback rate last (pattern verdicts carry no suggested rate)
    let pattern_verdict = engine.classify(&metadata(Some("python-requests/2.28"), "/"));
    assert_eq!(pattern_verdict.suggested_rate, None);
    let decision = engine.decide(&pattern_verdict, &policy(true, &[], None));
    assert_eq!(decision.revenue.to_string(), "0.001");
}

#[test]
fn test_revenue_implies_monetized_ai_bot() {
    // Invariant: revenue > 0 only on monetized decisions for AI bots at
    // or above the confidence floor and outside the allow list.
    let engine = DetectionEngine::default();
    let policies = [
        policy(true, &[], Some("0.002")),
        policy(true, &["openai"], None),
        policy(false, &[], Some("0.002")),
        policy(true, &[], None),
    ];
    let agents = [
        Some("GPTBot/1.0"),
        Some("python-requests/2.28"),
        Some("short"),
        Some("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/91 Safari/537.36"),
        None,
    ];

    for site in &policies {
        for ua in agents {
            let verdict = engine.classify(&metadata(ua, "/"));
            let decision = engine.decide(&verdict, site);
            if decision.revenue > Decimal::ZERO {
                assert_eq!(decision.action, ActionType::Monetized);
                assert!(decision.should_monetize);
                assert!(verdict.is_ai_bot);
                assert!(verdict.confidence >= 70);
                assert!(!site.is_allowed(verdict.bot_name.as_deref().unwrap()));
            }
        }
    }
}

// =============================================================================
// End-to-End Scenarios
// =============================================================================

#[test]
fn test_scenario_gptbot_monetized_at_site_rate() {
    let engine = DetectionEngine::default();
    let meta = metadata(
        Some("Mozilla/5.0 (compatible; GPTBot/1.0; +https://openai.com/gptbot)"),
        "/articles/1",
    );

    let outcome = engine.evaluate(&meta, &policy(true, &[], Some("0.002")));
    assert!(outcome.verdict.is_bot);
    assert_eq!(outcome.verdict.company.as_deref(), Some("OpenAI"));
    assert_eq!(outcome.verdict.confidence, 95);
    assert_eq!(outcome.decision.action, ActionType::Monetized);
    assert_eq!(outcome.decision.revenue.to_string(), "0.002");
}

#[test]
fn test_scenario_gptbot_allow_listed() {
    let engine = DetectionEngine::default();
    let meta = metadata(
        Some("Mozilla/5.0 (compatible; GPTBot/1.0; +https://openai.com/gptbot)"),
        "/articles/1",
    );

    let outcome = engine.evaluate(&meta, &policy(true, &["openai"], Some("0.002")));
    assert_eq!(outcome.decision.action, ActionType::Allowed);
}

#[test]
fn test_scenario_ordinary_browser_logged() {
    let engine = DetectionEngine::default();
    let meta = metadata(
        Some("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/91 Safari/537.36"),
        "/articles/1",
    );

    let outcome = engine.evaluate(&meta, &policy(true, &[], Some("0.002")));
    assert!(!outcome.verdict.is_bot);
    assert_eq!(outcome.decision.action, ActionType::Logged);
    assert_eq!(outcome.decision.revenue.to_string(), "0.00");
}

#[test]
fn test_scenario_python_requests_monetized() {
    let engine = DetectionEngine::default();
    let meta = metadata(Some("python-requests/2.28"), "/articles/1");

    let outcome = engine.evaluate(&meta, &policy(true, &[], None));
    assert_eq!(outcome.verdict.detection, DetectionMethod::PatternMatch);
    assert_eq!(outcome.verdict.confidence, 70);
    assert_eq!(outcome.decision.action, ActionType::Monetized);
}

#[test]
fn test_scenario_opaque_short_agent_heuristic() {
    let engine = DetectionEngine::default();
    let meta = metadata(Some("short"), "/articles/1");

    let outcome = engine.evaluate(&meta, &policy(true, &[], None));
    assert_eq!(outcome.verdict.detection, DetectionMethod::Heuristic);
    assert_eq!(outcome.verdict.confidence, 45);
    // Below the confidence floor: logged, not monetized
    assert_eq!(outcome.decision.action, ActionType::Logged);
}

// =============================================================================
// Content Classification Tests
// =============================================================================

#[test]
fn test_content_cascade_in_outcomes() {
    let engine = DetectionEngine::default();
    let site = policy(true, &[], None);

    for (page_url, expected) in [
        ("/wp-admin/export.xml", ContentClass::Admin),
        ("/wp-json/wp/v2/posts", ContentClass::Api),
        ("/sitemap.xml", ContentClass::Feed),
        ("/wp-content/uploads/photo.png", ContentClass::Asset),
        ("/logo.svg", ContentClass::Image),
        ("/bundle.js", ContentClass::Static),
        ("/articles/why-rust", ContentClass::Page),
    ] {
        let outcome = engine.evaluate(&metadata(Some("GPTBot/1.0"), page_url), &site);
        assert_eq!(outcome.content, expected, "page_url: {page_url}");
    }
}

#[test]
fn test_classify_content_is_exported() {
    assert_eq!(classify_content("/feed/"), ContentClass::Feed);
}

// =============================================================================
// Outcome Record Tests
// =============================================================================

#[test]
fn test_outcome_record_round_trip() {
    let engine = DetectionEngine::default();
    let meta = metadata(Some("GPTBot/1.0"), "/articles/1");

    let outcome = engine.evaluate(&meta, &policy(true, &[], Some("0.002")));
    let json = serde_json::to_string(&outcome).unwrap();

    let parsed: crawltoll::RequestOutcome = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.verdict, outcome.verdict);
    assert_eq!(parsed.decision, outcome.decision);
    assert_eq!(parsed.content, outcome.content);
}

#[test]
fn test_zero_revenue_renders_two_decimal_places() {
    let engine = DetectionEngine::default();
    let meta = metadata(None, "/");

    let outcome = engine.evaluate(&meta, &policy(true, &[], None));
    let json = serde_json::to_string(&outcome.decision).unwrap();
    assert!(json.contains("\"revenue\":\"0.00\""), "json: {json}");
}
