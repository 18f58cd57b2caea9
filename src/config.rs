use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::classify::cascade::Thresholds;
use crate::lexicon::Lexicon;

/// Which fallback classifier backend to use.
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackBackend {
    /// No probabilistic fallback — texts the rules can't decide degrade
    /// to a fixed low-risk SAFE verdict
    None,
    /// Google Perspective API — requires PERSPECTIVE_API_KEY, 1 QPS limit
    Perspective,
}

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
pub struct Config {
    /// Directory with allow/deny/anchors/negatives JSON files.
    /// Unset means the compiled-in default lists.
    pub lexicon_dir: Option<PathBuf>,
    /// Which fallback classifier to use (default: None)
    pub fallback_backend: FallbackBackend,
    pub perspective_api_key: String,
    /// Per-call bound on the fallback classifier; a timeout degrades the
    /// verdict instead of stalling the batch
    pub fallback_timeout: Duration,
    pub allow_threshold: u8,
    pub deny_threshold: u8,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default except the Perspective key, which is only
    /// required once the perspective backend is selected.
    pub fn load() -> Result<Self> {
        let fallback_backend = match env::var("EMBER_FALLBACK").as_deref() {
            Ok("perspective") => FallbackBackend::Perspective,
            // "none" or unset both mean rules-only with the degrade path
            _ => FallbackBackend::None,
        };

        let fallback_timeout = Duration::from_millis(
            parse_env("EMBER_FALLBACK_TIMEOUT_MS")?.unwrap_or(5000u64),
        );

        Ok(Self {
            lexicon_dir: env::var("EMBER_LEXICON_DIR").ok().map(PathBuf::from),
            fallback_backend,
            perspective_api_key: env::var("PERSPECTIVE_API_KEY").unwrap_or_default(),
            fallback_timeout,
            allow_threshold: parse_env("EMBER_ALLOW_THRESHOLD")?.unwrap_or(85),
            deny_threshold: parse_env("EMBER_DENY_THRESHOLD")?.unwrap_or(80),
        })
    }

    /// Check that the Perspective API key is configured.
    /// Call this before constructing the perspective fallback.
    pub fn require_perspective(&self) -> Result<()> {
        if self.perspective_api_key.is_empty() {
            anyhow::bail!(
                "PERSPECTIVE_API_KEY not set. Add it to your .env file,\n\
                 or unset EMBER_FALLBACK to run rules-only."
            );
        }
        Ok(())
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            allow: self.allow_threshold,
            deny: self.deny_threshold,
        }
    }

    /// Load the configured lexicon, or the builtin defaults when no
    /// directory is set. A broken lexicon directory is fatal here, at
    /// startup — never a per-request failure.
    pub fn load_lexicon(&self) -> Result<Lexicon> {
        match &self.lexicon_dir {
            Some(dir) => Lexicon::from_dir(dir)
                .with_context(|| format!("Failed to load lexicon from {}", dir.display())),
            None => Ok(Lexicon::builtin()),
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Result<Option<T>>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => {
            let value = raw
                .parse()
                .with_context(|| format!("{name} has an invalid value: {raw:?}"))?;
            Ok(Some(value))
        }
        Err(_) => Ok(None),
    }
}
