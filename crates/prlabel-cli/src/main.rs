//! prlabel - pull request size and type labeling
//!
//! Runs as a GitHub Actions step on `pull_request` events:
//!
//! - size label from additions + deletions (`size/XS` .. `size/XXL`)
//! - type label from an LLM reading the title and diff (`type/feature` ..)
//!
//! Any failure is printed as a single `::error::` line and the process exits 1.

mod actions;
mod config;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use prlabel_core::{init_tracing, LabelOutcome, Labeler};
use prlabel_github::{GitHubClient, GitHubConfig, PullRequestEvent};
use prlabel_llm::classifier_for;
use tracing::{info, Level};

use crate::config::{Inputs, Settings};

#[derive(Parser)]
#[command(name = "prlabel")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Label pull requests by size and type", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(flatten)]
    inputs: Inputs,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    init_tracing(cli.json, level);

    let outcome = match cli.inputs.resolve(std::env::var("GITHUB_TOKEN").ok()) {
        Ok(settings) => run(settings).await,
        Err(e) => Err(e.into()),
    };

    match outcome {
        Ok(outcome) => {
            info!(
                size = ?outcome.size.map(|s| s.to_string()),
                kind = ?outcome.kind.map(|k| k.to_string()),
                "Labeling complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            actions::set_failed(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

/// Read the event, build the collaborators and label the PR.
async fn run(settings: Settings) -> Result<LabelOutcome> {
    let event = PullRequestEvent::from_path(&settings.event_path)?;
    let pr = event.pull_request;
    info!(
        "Labeling PR {} in {} ({} additions, {} deletions)",
        pr.number, settings.repository, pr.additions, pr.deletions
    );

    let github = Arc::new(
        GitHubClient::new(
            GitHubConfig::new(settings.repository.clone(), &settings.github_token)
                .with_api_url(&settings.api_url),
        )
        .context("Failed to create GitHub client")?,
    );
    let classifier =
        classifier_for(settings.classifier.clone()).context("Failed to create classifier")?;

    let labeler = Labeler::new(github.clone(), github, classifier, settings.options);
    let outcome = labeler.run(&pr).await?;

    println!("{}", serde_json::to_string(&outcome)?);
    Ok(outcome)
}
