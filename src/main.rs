//! Batch classifier for request logs.
//!
//! Reads one JSON request record per line, evaluates each against the
//! detection engine, and writes one decision record per line to stdout.

use anyhow::{Context, Result};
use clap::Parser;
use crawltoll::{DetectionEngine, EngineConfig, RequestMetadata, RequestOutcome, SitePolicy};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, BufReader, Write};
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use tracing::{warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "crawltoll")]
#[command(author, version, about = "AI crawler classification and monetization decisions")]
struct Args {
    /// Path to engine configuration file (JSON or YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to site policy file (JSON or YAML), applied to records that
    /// carry no inline policy
    #[arg(short, long)]
    policy: Option<PathBuf>,

    /// Input JSONL file; reads stdin when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Enable JSON logging format
    #[arg(long)]
    json_logs: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// One inbound request record, as produced by the ingress collaborator.
#[derive(Debug, Deserialize)]
struct InboundRecord {
    user_agent: Option<String>,
    ip_address: String,
    page_url: String,
    site_url: String,
    #[serde(default)]
    policy: Option<SitePolicy>,
}

/// One evaluated record written to stdout.
#[derive(Debug, Serialize)]
struct OutboundRecord {
    site_url: String,
    page_url: String,
    #[serde(flatten)]
    outcome: RequestOutcome,
}

fn init_logging(json: bool, level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Load a JSON or YAML file, switching on the extension.
fn load_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let parsed = if path.extension().is_some_and(|e| e == "yaml" || e == "yml") {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    Ok(parsed)
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.json_logs, &args.log_level);

    let config: EngineConfig = match &args.config {
        Some(path) => load_file(path)?,
        None => EngineConfig::default(),
    };
    let engine = DetectionEngine::new(config)?;

    let default_policy: SitePolicy = match &args.policy {
        Some(path) => load_file(path)?,
        None => SitePolicy::default(),
    };

    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(std::io::stdin())),
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.context("failed to read input line")?;
        if line.trim().is_empty() {
            continue;
        }

        let record: InboundRecord = match serde_json::from_str(&line) {
            Ok(record) => record,
            Err(error) => {
                warn!(line = line_no + 1, %error, "Skipping malformed record");
                continue;
            }
        };

        let client_ip: IpAddr = record
            .ip_address
            .parse()
            .unwrap_or_else(|_| "0.0.0.0".parse().expect("valid fallback address"));

        let meta = RequestMetadata {
            user_agent: record.user_agent,
            client_ip,
            page_url: record.page_url,
            site_url: record.site_url,
        };
        let policy = record.policy.as_ref().unwrap_or(&default_policy);

        let outcome = engine.evaluate(&meta, policy);
        let outbound = OutboundRecord {
            site_url: meta.site_url.clone(),
            page_url: meta.page_url.clone(),
            outcome,
        };
        serde_json::to_writer(&mut out, &outbound)?;
        out.write_all(b"\n")?;
    }

    Ok(())
}
