//! Reviewer-chosen filter over a batch.
//!
//! Three independent axes (confidence band, disposition, source), ANDed
//! together. Exactly one bucket is active per axis.

use serde::{Deserialize, Serialize};

use crate::article::{Article, ReviewStatus};

/// Confidence band for an upstream confidence score.
///
/// Boundary values belong to the higher band: exactly 0.7 is High, exactly
/// 0.4 is Medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl ConfidenceBand {
    /// Band a confidence score. Total: NaN falls through to Low.
    pub fn of(confidence: f64) -> Self {
        if confidence >= 0.7 {
            Self::High
        } else if confidence >= 0.4 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Confidence axis of the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceFilter {
    #[default]
    All,
    High,
    Medium,
    Low,
}

impl ConfidenceFilter {
    fn matches(&self, confidence: f64) -> bool {
        match self {
            Self::All => true,
            Self::High => ConfidenceBand::of(confidence) == ConfidenceBand::High,
            Self::Medium => ConfidenceBand::of(confidence) == ConfidenceBand::Medium,
            Self::Low => ConfidenceBand::of(confidence) == ConfidenceBand::Low,
        }
    }
}

/// Disposition axis of the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Only(ReviewStatus),
}

/// Source axis of the filter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFilter {
    #[default]
    All,
    Only(String),
}

/// The reviewer's current filter configuration. Default passes everything.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterConfig {
    #[serde(default)]
    pub confidence: ConfidenceFilter,
    #[serde(default)]
    pub status: StatusFilter,
    #[serde(default)]
    pub source: SourceFilter,
}

impl FilterConfig {
    /// Pure, total predicate: does this article pass all three axes?
    pub fn matches(&self, article: &Article) -> bool {
        if !self.confidence.matches(article.confidence) {
            return false;
        }
        if let StatusFilter::Only(status) = self.status {
            if article.status != status {
                return false;
            }
        }
        if let SourceFilter::Only(source) = &self.source {
            if &article.source != source {
                return false;
            }
        }
        true
    }
}
