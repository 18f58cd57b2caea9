// The risk cascade — four ordered stages, terminal on first hit.
//
// Stage order is a priority, not a vote: allow-list, deny-list,
// co-occurrence, then the probabilistic fallback. Once a stage fires no
// later stage runs, so an affirmational phrase always wins over an
// accidental negative co-occurrence, and later stages can never soften
// an earlier verdict.
//
// Rule stages report fixed scores (0 / 99 / 60) rather than the raw
// match similarity, so downstream consumers can threshold on score
// without knowing which stage fired. The similarity survives only as
// provenance on the Method variant.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::classify::{cooccurrence, matcher};
use crate::fallback::traits::{FallbackClassifier, Polarity};
use crate::lexicon::Lexicon;

/// Fixed score for a deny-list hit. High-confidence constant, not derived
/// from the match similarity.
pub const DENY_SCORE: u8 = 99;
/// Fixed score for a co-occurrence hit.
pub const COOCCURRENCE_SCORE: u8 = 60;
/// Score reported when the fallback classifier is unavailable.
pub const DEGRADED_SCORE: u8 = 10;
/// Fallback confidence above which a toxic polarity becomes SUSPICIOUS.
pub const FALLBACK_SUSPICIOUS_CONFIDENCE: u8 = 70;

/// The three-level risk label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLabel {
    Safe,
    Suspicious,
    Flagged,
}

impl RiskLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::Safe => "SAFE",
            RiskLabel::Suspicious => "SUSPICIOUS",
            RiskLabel::Flagged => "FLAGGED",
        }
    }
}

impl std::fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which cascade stage produced the verdict, with stage-specific
/// provenance. Exactly one stage fires per classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum Method {
    AllowList { phrase: String, similarity: u8 },
    DenyList { phrase: String, similarity: u8 },
    Cooccurrence { term: String },
    MlFallback,
    DegradedFallback,
    EmptyInput,
}

impl Method {
    pub fn name(&self) -> &'static str {
        match self {
            Method::AllowList { .. } => "allow_list",
            Method::DenyList { .. } => "deny_list",
            Method::Cooccurrence { .. } => "cooccurrence",
            Method::MlFallback => "ml_fallback",
            Method::DegradedFallback => "degraded_fallback",
            Method::EmptyInput => "empty_input",
        }
    }

    /// The matched phrase or term, where the stage has one.
    pub fn matched(&self) -> Option<&str> {
        match self {
            Method::AllowList { phrase, .. } | Method::DenyList { phrase, .. } => Some(phrase),
            Method::Cooccurrence { term } => Some(term),
            _ => None,
        }
    }
}

/// The classifier's complete output for one text input. Immutable once
/// produced; returned to the caller, never persisted here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub label: RiskLabel,
    /// Risk score 0-100: fixed constants for rule stages, model
    /// confidence for the fallback stage.
    pub score: u8,
    #[serde(flatten)]
    pub method: Method,
    /// The normalized text the verdict was produced from.
    pub text: String,
}

/// Per-list similarity thresholds for the fuzzy stages.
///
/// A match must strictly exceed the threshold. The defaults are the
/// values the builtin lists were tuned against; deployments trade them
/// off against their own false-positive tolerance.
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    pub allow: u8,
    pub deny: u8,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            allow: 85,
            deny: 80,
        }
    }
}

/// The cascade orchestrator.
///
/// Stateless given its immutable lexicon and the injected fallback;
/// safe to share across tasks without locking. `classify` never returns
/// an error: fallback unavailability degrades to a low-risk verdict.
pub struct RiskClassifier {
    lexicon: Lexicon,
    thresholds: Thresholds,
    fallback: Option<Arc<dyn FallbackClassifier>>,
    fallback_timeout: Duration,
}

impl RiskClassifier {
    pub fn new(
        lexicon: Lexicon,
        thresholds: Thresholds,
        fallback: Option<Arc<dyn FallbackClassifier>>,
        fallback_timeout: Duration,
    ) -> Self {
        Self {
            lexicon,
            thresholds,
            fallback,
            fallback_timeout,
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Run the cascade on one text input.
    ///
    /// The input is trimmed and Unicode-lowercased here; callers with
    /// modality-specific cleanup (URL stripping etc.) run the ingest
    /// normalizer first and pass its output.
    pub async fn classify(&self, raw: &str) -> Verdict {
        let text = raw.trim().to_lowercase();

        // Stage 0: nothing left after normalization. Never reaches the
        // fallback classifier.
        if text.is_empty() {
            return Verdict {
                label: RiskLabel::Safe,
                score: 0,
                method: Method::EmptyInput,
                text,
            };
        }

        // Stage 1: allow-list. Fires first so an affirmational phrase
        // containing an anchor term is never misclassified downstream.
        if let Some(m) = matcher::best_match(&text, &self.lexicon.allow, self.thresholds.allow) {
            debug!(phrase = m.phrase, similarity = m.similarity, "Allow-list hit");
            return Verdict {
                label: RiskLabel::Safe,
                score: 0,
                method: Method::AllowList {
                    phrase: m.phrase.to_string(),
                    similarity: m.similarity,
                },
                text,
            };
        }

        // Stage 2: deny-list.
        if let Some(m) = matcher::best_match(&text, &self.lexicon.deny, self.thresholds.deny) {
            debug!(phrase = m.phrase, similarity = m.similarity, "Deny-list hit");
            return Verdict {
                label: RiskLabel::Flagged,
                score: DENY_SCORE,
                method: Method::DenyList {
                    phrase: m.phrase.to_string(),
                    similarity: m.similarity,
                },
                text,
            };
        }

        // Stage 3: co-occurrence.
        if let Some(term) =
            cooccurrence::check(&text, &self.lexicon.anchors, &self.lexicon.negatives)
        {
            debug!(term, "Co-occurrence hit");
            return Verdict {
                label: RiskLabel::Suspicious,
                score: COOCCURRENCE_SCORE,
                method: Method::Cooccurrence {
                    term: term.to_string(),
                },
                text,
            };
        }

        // Stage 4: probabilistic fallback, bounded by the timeout.
        self.fallback_verdict(text).await
    }

    async fn fallback_verdict(&self, text: String) -> Verdict {
        let Some(fallback) = &self.fallback else {
            debug!("No fallback classifier configured, degrading");
            return degraded(text);
        };

        match timeout(self.fallback_timeout, fallback.classify(&text)).await {
            Ok(Ok(result)) => {
                let label = match result.polarity {
                    Polarity::Toxic if result.confidence > FALLBACK_SUSPICIOUS_CONFIDENCE => {
                        RiskLabel::Suspicious
                    }
                    _ => RiskLabel::Safe,
                };
                Verdict {
                    label,
                    score: result.confidence.min(100),
                    method: Method::MlFallback,
                    text,
                }
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Fallback classifier failed, degrading");
                degraded(text)
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.fallback_timeout.as_millis() as u64,
                    "Fallback classifier timed out, degrading"
                );
                degraded(text)
            }
        }
    }
}

fn degraded(text: String) -> Verdict {
    Verdict {
        label: RiskLabel::Safe,
        score: DEGRADED_SCORE,
        method: Method::DegradedFallback,
        text,
    }
}
