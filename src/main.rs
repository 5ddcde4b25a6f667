use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bug_reviewer::classifier::RiskClassifier;
use bug_reviewer::config::AppConfig;
use bug_reviewer::github::client::GitHubClient;
use bug_reviewer::pipeline;
use bug_reviewer::suggestions::{SuggestionClient, Suggestions};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr so stdout carries only the suggestion block
    // and the final JSON result.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bug_reviewer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::load()?;
    info!(
        "Checking commit {} in {}",
        config.commit_sha, config.repository
    );

    let classifier = RiskClassifier::from_file(&config.model_path)?;
    info!("Model loaded from {}", config.model_path);

    let github = GitHubClient::new(
        &config.github_api_url,
        &config.github_token,
        config.request_timeout(),
    )?;
    let suggestions = SuggestionClient::new(
        &config.gemini_api_url,
        config.gemini_api_key.clone(),
        config.request_timeout(),
    )?;

    let outcome = pipeline::run_review(
        &github,
        &classifier,
        &suggestions,
        &config.repository,
        &config.commit_sha,
    )
    .await?;

    match &outcome.suggestions {
        Suggestions::Available(text) => println!("Fix Suggestions:\n{}", text),
        unavailable => println!("{}", unavailable),
    }

    println!("{}", serde_json::to_string(&outcome.result)?);

    Ok(())
}
