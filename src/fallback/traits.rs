// Fallback classifier trait — the swap-ready abstraction.
//
// The cascade only consumes this one operation. Implementations must be
// async because real providers sit behind HTTP APIs or model runtimes.

use anyhow::Result;
use async_trait::async_trait;

/// Whether the model read the text as toxic/negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Toxic,
    NotToxic,
}

/// The raw output of a fallback classifier: a polarity and the model's
/// confidence in it, 0-100. The cascade maps this onto a risk label;
/// providers should not pre-apply any thresholding.
#[derive(Debug, Clone, Copy)]
pub struct FallbackVerdict {
    pub polarity: Polarity,
    pub confidence: u8,
}

/// Trait for the injected probabilistic classifier. May fail or be
/// absent — the cascade absorbs both into its degrade path.
#[async_trait]
pub trait FallbackClassifier: Send + Sync {
    /// Classify a single text for toxic polarity.
    async fn classify(&self, text: &str) -> Result<FallbackVerdict>;
}
