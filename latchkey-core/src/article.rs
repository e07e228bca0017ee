//! Article and batch types for the editorial review desk.
//!
//! An [`Article`] is one annotated newsletter candidate delivered by the
//! upstream annotation agent. The annotation payload is immutable once
//! ingested; the reviewer only ever touches the disposition, the proposed
//! point-of-view text, and (indirectly) the edit record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::stats::BatchStats;

/// Newtype for an article's stable identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(pub String);

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ArticleId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ArticleId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Newtype for a batch identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(pub String);

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for BatchId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for BatchId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The reviewer's decision state for an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    /// Not yet reviewed (initial state).
    #[default]
    Pending,
    /// Approved for the newsletter.
    Approved,
    /// Rejected.
    Rejected,
    /// Saved for a later pass.
    Saved,
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Saved => "saved",
        };
        write!(f, "{}", s)
    }
}

/// Upstream rating of how well the human/AI contribution blends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CollaborationFit {
    High,
    Medium,
    Low,
}

/// Strength of a stylistic pattern in the voice rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternStrength {
    Strong,
    Weak,
    Missing,
}

/// Boolean sub-elements of the voice rubric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceElements {
    pub confident_grounded_tone: bool,
    pub colleague_approach: bool,
    pub parenthetical_honesty: bool,
    pub avoid_hype_language: bool,
    pub three_element_list: bool,
    pub build_to_revelation: bool,
    pub cultural_reference: bool,
}

/// Graded patterns of the voice rubric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoicePatterns {
    pub communication_first: bool,
    pub collaboration_metaphor: PatternStrength,
    pub figure_it_out_ethos: bool,
    pub pragmatic_skepticism: bool,
    pub experience_validation: PatternStrength,
}

/// Upstream assessment of the proposed text against the house voice rubric.
///
/// `overall_score` is on a 0-10 scale. The sub-elements and patterns are
/// opaque to the engine; only `overall_score` feeds into batch statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceScore {
    pub overall_score: f64,
    pub elements: VoiceElements,
    pub patterns: VoicePatterns,
    pub suggestions: Vec<String>,
}

/// Upstream quality check of the proposed point-of-view blurb.
///
/// Absent when upstream analysis was disabled for the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PovQuality {
    pub score: f64,
    pub issues: Vec<String>,
    pub hook_detected: bool,
    pub character_count: usize,
    pub tone_match: bool,
}

/// Breakdown of the human/AI collaboration behind an annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaborationAnalysis {
    pub human_contribution: String,
    pub ai_contribution: String,
    pub result_multiplier: String,
    pub quality: CollaborationFit,
}

/// Record of the reviewer's edit to the proposed point-of-view text.
///
/// Single slot: `original_pov` is captured once, at the first edit of the
/// session, and is never overwritten by later edits. `edited_pov` and the
/// timestamp always reflect the most recent edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRecord {
    #[serde(rename = "originalPOV")]
    pub original_pov: String,
    #[serde(rename = "editedPOV")]
    pub edited_pov: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub edit_timestamp: DateTime<Utc>,
}

/// One annotated newsletter candidate.
///
/// Everything except `status`, `proposed_pov`, and `edit` is produced
/// upstream and never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    /// Publication the article came from (e.g. "Harvard Business Review").
    pub source: String,
    pub url: String,
    /// Annotation reliability, in [0, 1].
    pub confidence: f64,
    /// Audience affinity, in [0, 100].
    pub audience_score: f64,
    pub collaboration_fit: CollaborationFit,
    /// Reviewer-editable. The UI surfaces a 200-character guideline; the
    /// engine accepts any length.
    #[serde(rename = "proposedPOV")]
    pub proposed_pov: String,
    pub pain_points: Vec<String>,
    pub suggested_headlines: Vec<String>,
    pub full_analysis: String,
    #[serde(default)]
    pub status: ReviewStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pov_quality: Option<PovQuality>,
    pub collaboration: CollaborationAnalysis,
    pub voice_score: VoiceScore,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub processing_timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit: Option<EditRecord>,
}

impl Article {
    /// Apply a point-of-view edit, preserving the session's original
    /// baseline across repeated edits.
    pub fn apply_pov_edit(&mut self, new_text: String, at: DateTime<Utc>) {
        match &mut self.edit {
            Some(record) => {
                record.edited_pov = new_text.clone();
                record.edit_timestamp = at;
            }
            None => {
                self.edit = Some(EditRecord {
                    original_pov: self.proposed_pov.clone(),
                    edited_pov: new_text.clone(),
                    edit_timestamp: at,
                });
            }
        }
        self.proposed_pov = new_text;
    }
}

/// Where a batch came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BatchOrigin {
    /// Delivered by the upstream annotation agent.
    ExternalAgent,
    /// Assembled by hand.
    Manual,
}

/// One ingested collection of annotated articles.
///
/// `articles` keeps ingestion order; display order is derived by the
/// projection. `stats` is always a function of `articles` — it is
/// recomputed on ingest and after every mutation, never trusted from
/// upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub id: BatchId,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub origin: BatchOrigin,
    pub articles: Vec<Article>,
    #[serde(default)]
    pub stats: BatchStats,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl Batch {
    /// Assemble a batch at the ingestion boundary, stamping the ingestion
    /// time and deriving statistics.
    pub fn new(
        id: BatchId,
        origin: BatchOrigin,
        articles: Vec<Article>,
        errors: Vec<String>,
    ) -> Self {
        let stats = BatchStats::compute(&articles);
        Self {
            id,
            timestamp: Utc::now(),
            origin,
            articles,
            stats,
            errors,
        }
    }

    pub fn find_article(&self, id: &ArticleId) -> Option<&Article> {
        self.articles.iter().find(|a| &a.id == id)
    }

    pub fn find_article_mut(&mut self, id: &ArticleId) -> Option<&mut Article> {
        self.articles.iter_mut().find(|a| &a.id == id)
    }

    /// Re-derive the statistics snapshot from the current article set.
    /// Must be called after every article mutation.
    pub fn recompute_stats(&mut self) {
        self.stats = BatchStats::compute(&self.articles);
    }

    /// Articles the reviewer has approved, in ingestion order.
    pub fn approved(&self) -> impl Iterator<Item = &Article> {
        self.articles
            .iter()
            .filter(|a| a.status == ReviewStatus::Approved)
    }

    pub fn approved_count(&self) -> usize {
        self.approved().count()
    }
}
