use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use ember::batch::{self, FeedItem};
use ember::classify::cascade::RiskClassifier;
use ember::config::{Config, FallbackBackend};
use ember::fallback::perspective::PerspectiveFallback;
use ember::fallback::traits::FallbackClassifier;
use ember::ingest::{self, Modality};
use ember::output::terminal;

/// Ember: cascading risk classification for multilingual short text.
///
/// Classifies typed input, OCR output, speech transcripts, and social
/// posts into SAFE / SUSPICIOUS / FLAGGED with a deterministic rule
/// cascade and an optional probabilistic fallback.
#[derive(Parser)]
#[command(name = "ember", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a single text input
    Classify {
        /// The text to classify
        text: String,

        /// Input modality: text, image, audio, video, social-post
        #[arg(long, default_value = "text")]
        modality: String,

        /// Print the verdict as JSON instead of the colored display
        #[arg(long)]
        json: bool,
    },

    /// Classify a JSON file of feed items and print the ranked report
    Batch {
        /// Path to a JSON array of {text, id?, author?, likes?, reposts?, replies?}
        file: PathBuf,

        /// Number of items to classify in parallel (default: 8)
        #[arg(long, default_value = "8")]
        concurrency: usize,

        /// Only list items above the high-risk score in the table
        #[arg(long)]
        high_risk_only: bool,

        /// Print the full report as JSON instead of the colored display
        #[arg(long)]
        json: bool,
    },

    /// Show the loaded phrase and term lists
    Lists,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("ember=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Classify {
            text,
            modality,
            json,
        } => {
            let modality: Modality = modality.parse()?;
            let classifier = build_classifier(&config)?;

            let normalized = ingest::normalize(&text, modality);
            let verdict = classifier.classify(&normalized.text).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&verdict)?);
            } else {
                terminal::display_verdict(&verdict);
                if !normalized.hashtags.is_empty() {
                    println!("  Hashtags: {}", normalized.hashtags.join(", "));
                }
                if !normalized.mentions.is_empty() {
                    println!("  Mentions: {}", normalized.mentions.join(", "));
                }
            }
        }

        Commands::Batch {
            file,
            concurrency,
            high_risk_only,
            json,
        } => {
            let classifier = build_classifier(&config)?;

            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read batch file {}", file.display()))?;
            let items: Vec<FeedItem> = serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse batch file {}", file.display()))?;

            info!(count = items.len(), concurrency, "Classifying batch");
            let report = batch::classify_batch(&classifier, items, concurrency).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                terminal::display_batch_report(&report, high_risk_only);
            }
        }

        Commands::Lists => {
            let lexicon = config.load_lexicon()?;
            terminal::display_lexicon(&lexicon);
        }
    }

    Ok(())
}

/// Wire the classifier from config: lexicon, thresholds, fallback.
fn build_classifier(config: &Config) -> Result<RiskClassifier> {
    let lexicon = config.load_lexicon()?;

    let fallback: Option<Arc<dyn FallbackClassifier>> = match config.fallback_backend {
        FallbackBackend::None => {
            info!("No fallback classifier configured; rules-only with degrade path");
            None
        }
        FallbackBackend::Perspective => {
            config.require_perspective()?;
            Some(Arc::new(PerspectiveFallback::new(
                config.perspective_api_key.clone(),
            )))
        }
    };

    Ok(RiskClassifier::new(
        lexicon,
        config.thresholds(),
        fallback,
        config.fallback_timeout,
    ))
}
