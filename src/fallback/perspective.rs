// Google Perspective API implementation of the fallback capability.
//
// Perspective analyzes text for toxicity. It's free but rate-limited to
// ~1 QPS, and the cascade already tolerates failure, so this adapter
// stays thin: one attribute, mapped onto the polarity/confidence
// contract the cascade consumes.
//
// API docs: https://developers.perspectiveapi.com/s/about-the-api-methods

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::rate_limiter::RateLimiter;
use super::traits::{FallbackClassifier, FallbackVerdict, Polarity};
use crate::output::truncate_chars;

/// Perspective free tier: 1 query per second.
const QUERY_INTERVAL: std::time::Duration = std::time::Duration::from_secs(1);

/// Perspective API fallback classifier.
pub struct PerspectiveFallback {
    client: Client,
    api_key: String,
    rate_limiter: RateLimiter,
}

impl PerspectiveFallback {
    /// Create a new Perspective fallback with the given API key.
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            rate_limiter: RateLimiter::new(QUERY_INTERVAL),
        }
    }
}

#[async_trait]
impl FallbackClassifier for PerspectiveFallback {
    async fn classify(&self, text: &str) -> Result<FallbackVerdict> {
        // Respect rate limits before making the call
        self.rate_limiter.acquire().await;

        let url = format!(
            "https://commentanalyzer.googleapis.com/v1alpha1/comments:analyze?key={}",
            self.api_key
        );

        let request = PerspectiveRequest {
            comment: Comment {
                text: text.to_string(),
            },
            requested_attributes: RequestedAttributes {
                toxicity: AttributeConfig {},
            },
            languages: vec!["en".to_string()],
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .context("Failed to call Perspective API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Perspective API returned {}: {}", status, body);
        }

        let result: PerspectiveResponse = response
            .json()
            .await
            .context("Failed to parse Perspective API response")?;

        let toxicity = result
            .attribute_scores
            .get("TOXICITY")
            .map(|score| score.summary_score.value)
            .unwrap_or(0.0)
            .clamp(0.0, 1.0);

        // Char-based truncation: a byte slice could land mid-character
        // on Devanagari or Bengali text and panic
        debug!(
            toxicity = toxicity,
            text_preview = %truncate_chars(text, 50),
            "Scored text"
        );

        // The summary score is P(toxic). Report the confidence of the
        // winning polarity, matching what a binary classifier would emit.
        let verdict = if toxicity >= 0.5 {
            FallbackVerdict {
                polarity: Polarity::Toxic,
                confidence: (toxicity * 100.0).round() as u8,
            }
        } else {
            FallbackVerdict {
                polarity: Polarity::NotToxic,
                confidence: ((1.0 - toxicity) * 100.0).round() as u8,
            }
        };

        Ok(verdict)
    }
}

// --- Perspective API request/response types ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PerspectiveRequest {
    comment: Comment,
    requested_attributes: RequestedAttributes,
    languages: Vec<String>,
}

#[derive(Serialize)]
struct Comment {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct RequestedAttributes {
    toxicity: AttributeConfig,
}

#[derive(Serialize)]
struct AttributeConfig {}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PerspectiveResponse {
    attribute_scores: std::collections::HashMap<String, AttributeScore>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AttributeScore {
    summary_score: SummaryScore,
}

#[derive(Deserialize)]
struct SummaryScore {
    value: f64,
}
