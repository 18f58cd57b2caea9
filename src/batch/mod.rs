// Batch aggregation — fan the cascade out over a feed collection, rank
// by severity, and summarize.
//
// Items are independent and the classifier is a pure function of its
// input plus the read-only fallback, so classification runs concurrently
// via buffer_unordered. Output is still deterministic: results are
// restored to input order before the stable rank sort, so equal scores
// keep their original relative order.

use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::cascade::{RiskClassifier, RiskLabel, Verdict};
use crate::ingest::{self, Modality};

/// Items scoring above this are surfaced in the high-risk detail view,
/// independent of label.
pub const HIGH_RISK_SCORE: u8 = 60;

/// One item as delivered by a social feed collaborator.
///
/// The classifier reads only `text`; everything else is caller-owned
/// metadata that passes through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedItem {
    #[serde(default)]
    pub id: Option<String>,
    pub text: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub reposts: u64,
    #[serde(default)]
    pub replies: u64,
}

/// A classified feed item: every `FeedItem` field copied through, plus
/// the computed fields. Built once, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct BatchItem {
    pub id: Option<String>,
    pub text: String,
    pub author: Option<String>,
    pub likes: u64,
    pub reposts: u64,
    pub replies: u64,
    /// Hashtags/mentions extracted by the normalizer — display metadata
    /// only, never part of the classification decision.
    pub hashtags: Vec<String>,
    pub mentions: Vec<String>,
    pub analysis: Verdict,
    pub risk_score: u8,
    pub classification: RiskLabel,
}

impl BatchItem {
    /// Copy all source fields into the new record, then set the computed
    /// ones. The source is consumed; nothing is mutated in place.
    fn build(
        item: FeedItem,
        hashtags: Vec<String>,
        mentions: Vec<String>,
        verdict: Verdict,
    ) -> Self {
        Self {
            id: item.id,
            text: item.text,
            author: item.author,
            likes: item.likes,
            reposts: item.reposts,
            replies: item.replies,
            hashtags,
            mentions,
            risk_score: verdict.score,
            classification: verdict.label,
            analysis: verdict,
        }
    }
}

/// Label counts and percentages over one batch. Recomputed per batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub flagged: usize,
    pub suspicious: usize,
    pub safe: usize,
    pub flagged_pct: f64,
    pub suspicious_pct: f64,
    pub safe_pct: f64,
}

impl BatchSummary {
    pub fn from_items(items: &[BatchItem]) -> Self {
        let total = items.len();
        let flagged = items
            .iter()
            .filter(|i| i.classification == RiskLabel::Flagged)
            .count();
        let suspicious = items
            .iter()
            .filter(|i| i.classification == RiskLabel::Suspicious)
            .count();
        let safe = items
            .iter()
            .filter(|i| i.classification == RiskLabel::Safe)
            .count();
        Self {
            total,
            flagged,
            suspicious,
            safe,
            flagged_pct: percentage(flagged, total),
            suspicious_pct: percentage(suspicious, total),
            safe_pct: percentage(safe, total),
        }
    }
}

/// Percentage rounded to two decimals; 0.0 for an empty batch rather
/// than a division error.
fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (count as f64 / total as f64 * 10000.0).round() / 100.0
    }
}

/// The aggregator's output: items ranked highest-risk-first plus the
/// summary computed over the same items.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub items: Vec<BatchItem>,
    pub summary: BatchSummary,
}

impl BatchReport {
    /// Items above the high-risk score, independent of label: a
    /// SUSPICIOUS item at 65 and a FLAGGED item at 99 both qualify.
    pub fn high_risk(&self) -> Vec<&BatchItem> {
        self.items
            .iter()
            .filter(|i| i.risk_score > HIGH_RISK_SCORE)
            .collect()
    }
}

/// Classify a feed collection and produce the ranked report.
///
/// Fan-out runs `concurrency` classifications at a time (same pattern
/// as a network sweep); a slow fallback call on one item never stalls
/// the others, and the classifier's own timeout bounds each call.
pub async fn classify_batch(
    classifier: &RiskClassifier,
    items: Vec<FeedItem>,
    concurrency: usize,
) -> BatchReport {
    let pb = ProgressBar::new(items.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Classifying [{bar:30}] {pos}/{len} ({eta})")
            .unwrap(),
    );

    let mut classified: Vec<(usize, BatchItem)> =
        stream::iter(items.into_iter().enumerate().map(|(idx, item)| {
            let pb = pb.clone();
            async move {
                let normalized = ingest::normalize(&item.text, Modality::SocialPost);
                let verdict = classifier.classify(&normalized.text).await;
                pb.inc(1);
                (
                    idx,
                    BatchItem::build(item, normalized.hashtags, normalized.mentions, verdict),
                )
            }
        }))
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;
    pb.finish_and_clear();

    // buffer_unordered yields in completion order; restore input order
    // before ranking so ties resolve deterministically.
    classified.sort_by_key(|(idx, _)| *idx);
    let mut ranked: Vec<BatchItem> = classified.into_iter().map(|(_, item)| item).collect();
    let summary = BatchSummary::from_items(&ranked);
    // sort_by is stable: equal scores keep input order
    ranked.sort_by(|a, b| b.risk_score.cmp(&a.risk_score));

    debug!(
        total = summary.total,
        flagged = summary.flagged,
        suspicious = summary.suspicious,
        safe = summary.safe,
        "Batch classified"
    );

    BatchReport {
        items: ranked,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::cascade::Method;

    fn item(label: RiskLabel, score: u8) -> BatchItem {
        BatchItem {
            id: None,
            text: String::new(),
            author: None,
            likes: 0,
            reposts: 0,
            replies: 0,
            hashtags: vec![],
            mentions: vec![],
            analysis: Verdict {
                label,
                score,
                method: Method::EmptyInput,
                text: String::new(),
            },
            risk_score: score,
            classification: label,
        }
    }

    #[test]
    fn summary_counts_sum_to_total() {
        let items = vec![
            item(RiskLabel::Flagged, 99),
            item(RiskLabel::Suspicious, 60),
            item(RiskLabel::Safe, 0),
            item(RiskLabel::Safe, 10),
        ];
        let s = BatchSummary::from_items(&items);
        assert_eq!(s.total, 4);
        assert_eq!(s.flagged + s.suspicious + s.safe, s.total);
        assert_eq!(s.flagged_pct, 25.0);
        assert_eq!(s.suspicious_pct, 25.0);
        assert_eq!(s.safe_pct, 50.0);
    }

    #[test]
    fn summary_percentages_round_to_two_decimals() {
        let items = vec![
            item(RiskLabel::Flagged, 99),
            item(RiskLabel::Safe, 0),
            item(RiskLabel::Safe, 0),
        ];
        let s = BatchSummary::from_items(&items);
        // 1/3 = 33.333... rounds to 33.33
        assert_eq!(s.flagged_pct, 33.33);
        assert_eq!(s.safe_pct, 66.67);
    }

    #[test]
    fn empty_batch_has_zero_percentages() {
        let s = BatchSummary::from_items(&[]);
        assert_eq!(s.total, 0);
        assert_eq!(s.flagged_pct, 0.0);
        assert_eq!(s.suspicious_pct, 0.0);
        assert_eq!(s.safe_pct, 0.0);
    }

    #[test]
    fn high_risk_view_is_label_independent() {
        let report = BatchReport {
            items: vec![
                item(RiskLabel::Flagged, 99),
                item(RiskLabel::Suspicious, 65),
                item(RiskLabel::Suspicious, 60),
                item(RiskLabel::Safe, 10),
            ],
            summary: BatchSummary::from_items(&[]),
        };
        let high = report.high_risk();
        // 99 and 65 qualify; 60 does not (strictly greater than)
        assert_eq!(high.len(), 2);
        assert!(high.iter().all(|i| i.risk_score > HIGH_RISK_SCORE));
    }
}
