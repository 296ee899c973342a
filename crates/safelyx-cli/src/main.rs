// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Safelyx command line
//!
//! Runs a single safety check and prints the verdict, or the raw result as JSON
//! with `--json`. Settings come from `safelyx.*` and `SAFELYX_*` first, then the
//! command-line overrides.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use safelyx_client::{
    CheckResponse, ClientConfig, ImageCheckResult, MessageCheckResult, SafelyxClient,
};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

#[derive(Debug, Parser)]
#[command(name = "safelyx", version)]
#[command(about = "Check links, emails, messages and images with Safelyx")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print the service's result as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Key code to sign requests with
    #[arg(long, global = true)]
    key_code: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Root URL of the service
    #[arg(long, global = true)]
    base_url: Option<Url>,

    /// Configuration file to load instead of `safelyx.*`
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check whether a link is safe to visit
    Link { link: String },
    /// Check whether an email address is legitimate
    Email { email: String },
    /// Check a message and the links and addresses it contains
    Message {
        message: String,
        /// Only analyze the text itself
        #[arg(long)]
        skip_link_and_email_checks: bool,
    },
    /// Check an image by URL
    Image { image_url: String },
}

impl Cli {
    fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::load_file(path)
                .with_context(|| format!("failed to load {}", path.display()))?,
            None => ClientConfig::load().context("failed to load configuration")?,
        };

        if let Some(key_code) = &self.key_code {
            config.key_code.clone_from(key_code);
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = cli.client_config()?;
    debug!(base_url = %config.base_url, timeout_seconds = config.timeout_seconds, "Configured");
    let client = SafelyxClient::from_config(config).context("invalid configuration")?;

    let output = match &cli.command {
        Command::Link { link } => {
            let result = client.check_link(link).await.context("link check failed")?;
            render(&result, cli.json, Vec::new())?
        }
        Command::Email { email } => {
            let result = client
                .check_email(email)
                .await
                .context("email check failed")?;
            render(&result, cli.json, Vec::new())?
        }
        Command::Message {
            message,
            skip_link_and_email_checks,
        } => {
            let result = client
                .check_message(message, *skip_link_and_email_checks)
                .await
                .context("message check failed")?;
            render(&result, cli.json, message_details(&result))?
        }
        Command::Image { image_url } => {
            let result = client
                .check_image(image_url)
                .await
                .context("image check failed")?;
            render(&result, cli.json, image_details(&result))?
        }
    };

    println!("{output}");
    Ok(())
}

/// Format a result for the terminal
fn render<R>(result: &R, json: bool, details: Vec<String>) -> Result<String>
where
    R: CheckResponse + Serialize,
{
    if json {
        return serde_json::to_string_pretty(result).context("failed to encode result");
    }

    let mut lines = vec![
        format!("{}: {}", R::KIND, result.subject()),
        format!("verdict: {}", result.verdict()),
    ];
    if !result.result_text().is_empty() {
        lines.push(result.result_text().to_string());
    }
    lines.extend(details);
    match result.checked_on() {
        Some(date) => lines.push(format!("checked on {date}")),
        None if !result.date().is_empty() => lines.push(format!("checked on {}", result.date())),
        None => {}
    }
    lines.push(format!("{} checks remaining", result.checks_remaining()));
    Ok(lines.join("\n"))
}

fn message_details(result: &MessageCheckResult) -> Vec<String> {
    let analysis = &result.analysis;
    let mut lines = Vec::new();
    if !analysis.sentiment.is_empty() {
        lines.push(format!("sentiment: {}", analysis.sentiment));
    }
    lines.extend(
        analysis
            .links
            .iter()
            .map(|link| format!("  link {}: {}", link.url, link.result)),
    );
    lines.extend(
        analysis
            .emails
            .iter()
            .map(|email| format!("  email {}: {}", email.email, email.result)),
    );
    lines
}

fn image_details(result: &ImageCheckResult) -> Vec<String> {
    let analysis = &result.analysis;
    let mut lines = Vec::new();
    if !analysis.description.is_empty() {
        lines.push(analysis.description.clone());
    }
    if let Some(link) = &analysis.link {
        lines.push(format!("  hosted at {}: {}", link.url, link.result));
    }
    lines
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use safelyx_client::LinkCheckResult;
    use serde_json::json;

    use super::*;

    fn link_result(result: i32) -> LinkCheckResult {
        serde_json::from_value(json!({
            "url": "https://example.com",
            "result": result,
            "result_text": "This link looks safe.",
            "date": "2025-01-01",
            "analysis": {
                "domain_reputation": "ok",
                "source_code": "ok",
                "anti_virus": "N/A"
            },
            "checks_remaining": 42
        }))
        .unwrap()
    }

    #[test]
    fn command_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_message_with_skip_flag() {
        let cli = Cli::try_parse_from([
            "safelyx",
            "message",
            "Hello, world!",
            "--skip-link-and-email-checks",
            "--json",
        ])
        .unwrap();

        assert!(cli.json);
        match cli.command {
            Command::Message {
                message,
                skip_link_and_email_checks,
            } => {
                assert_eq!(message, "Hello, world!");
                assert!(skip_link_and_email_checks);
            }
            other => panic!("Expected message command, got: {other:?}"),
        }
    }

    #[test]
    fn parse_global_overrides() {
        let cli = Cli::try_parse_from([
            "safelyx",
            "--timeout",
            "5",
            "--base-url",
            "http://localhost:8080/",
            "link",
            "example.com",
            "--key-code",
            "abc",
        ])
        .unwrap();

        assert_eq!(cli.timeout, Some(5));
        assert_eq!(cli.key_code.as_deref(), Some("abc"));
        assert_eq!(cli.base_url.unwrap().as_str(), "http://localhost:8080/");
    }

    #[test]
    fn reject_invalid_base_url() {
        assert!(Cli::try_parse_from(["safelyx", "--base-url", "not a url", "link", "x"]).is_err());
    }

    #[test]
    fn skip_flag_only_applies_to_messages() {
        assert!(
            Cli::try_parse_from(["safelyx", "link", "x", "--skip-link-and-email-checks"]).is_err()
        );
    }

    #[test]
    fn render_summary() {
        let output = render(&link_result(8), false, Vec::new()).unwrap();

        assert!(output.starts_with("link: https://example.com\nverdict: 8/10"));
        assert!(output.contains("checked on 2025-01-01"));
        assert!(output.ends_with("42 checks remaining"));
    }

    #[test]
    fn render_unevaluated() {
        let output = render(&link_result(-2), false, Vec::new()).unwrap();
        assert!(output.contains("verdict: not evaluated"));
    }

    #[test]
    fn render_json() {
        let output = render(&link_result(9), true, Vec::new()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["result"], 9);
        assert_eq!(value["checks_remaining"], 42);
    }

    #[test]
    fn message_findings_are_listed() {
        let result: MessageCheckResult = serde_json::from_value(json!({
            "message": "see example.com",
            "result": 8,
            "result_text": "Looks fine.",
            "date": "2025-01-01",
            "analysis": {
                "content": "A pointer to a website.",
                "sentiment": "neutral",
                "links": [{
                    "url": "https://example.com",
                    "result": 9,
                    "date": "2025-01-01",
                    "analysis": {}
                }],
                "emails": []
            },
            "checks_remaining": 3
        }))
        .unwrap();

        assert_eq!(
            message_details(&result),
            ["sentiment: neutral", "  link https://example.com: 9/10"]
        );
    }
}
