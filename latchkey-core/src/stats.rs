//! Derived batch statistics.
//!
//! The statistics snapshot is a pure function of the article set. The
//! engine recomputes it on ingest and after every accepted mutation; it is
//! never an independent source of truth.

use serde::{Deserialize, Serialize};

use crate::article::{Article, CollaborationFit};
use crate::filter::ConfidenceBand;

/// Summary counts and averages for one batch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchStats {
    pub total_processed: usize,
    pub high_confidence: usize,
    pub medium_confidence: usize,
    pub low_confidence: usize,
    /// Arithmetic mean of the voice overall scores; 0.0 for an empty batch.
    pub avg_voice_score: f64,
    /// Share of articles rated HIGH for collaboration fit, as a whole
    /// percentage rounded to the nearest integer.
    pub collaboration_alignment: u8,
}

impl BatchStats {
    pub fn compute(articles: &[Article]) -> Self {
        let total = articles.len();
        if total == 0 {
            return Self::default();
        }

        let mut high = 0;
        let mut medium = 0;
        let mut low = 0;
        let mut voice_sum = 0.0;
        let mut fit_high = 0;

        for article in articles {
            match ConfidenceBand::of(article.confidence) {
                ConfidenceBand::High => high += 1,
                ConfidenceBand::Medium => medium += 1,
                ConfidenceBand::Low => low += 1,
            }
            voice_sum += article.voice_score.overall_score;
            if article.collaboration_fit == CollaborationFit::High {
                fit_high += 1;
            }
        }

        Self {
            total_processed: total,
            high_confidence: high,
            medium_confidence: medium,
            low_confidence: low,
            avg_voice_score: voice_sum / total as f64,
            collaboration_alignment: (fit_high as f64 / total as f64 * 100.0).round() as u8,
        }
    }
}
