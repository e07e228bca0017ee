//! Decision export.
//!
//! Flattens the current batch into one record per article for the external
//! sink: the disposition, the original and (if any) edited proposed text,
//! and the two scores a downstream consumer cares about. Pure read.

use chrono::NaiveDate;
use serde::Serialize;

use crate::article::{Batch, ReviewStatus};

/// One exported editorial decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionRecord {
    pub id: String,
    pub title: String,
    pub status: ReviewStatus,
    /// The proposed text before any reviewer edit (the edit-session
    /// baseline when an edit exists, otherwise the current text).
    #[serde(rename = "originalPOV")]
    pub original_pov: String,
    /// The reviewer's edited text; omitted when the article was never
    /// edited.
    #[serde(rename = "modifiedPOV", skip_serializing_if = "Option::is_none")]
    pub modified_pov: Option<String>,
    pub confidence: f64,
    pub voice_score: f64,
}

/// Flatten the batch into decision records, in ingestion order.
pub fn decisions(batch: &Batch) -> Vec<DecisionRecord> {
    batch
        .articles
        .iter()
        .map(|article| {
            let (original_pov, modified_pov) = match &article.edit {
                Some(edit) => (edit.original_pov.clone(), Some(edit.edited_pov.clone())),
                None => (article.proposed_pov.clone(), None),
            };
            DecisionRecord {
                id: article.id.0.clone(),
                title: article.title.clone(),
                status: article.status,
                original_pov,
                modified_pov,
                confidence: article.confidence,
                voice_score: article.voice_score.overall_score,
            }
        })
        .collect()
}

/// Serialize records as the pretty-printed JSON artifact.
pub fn to_pretty_json(records: &[DecisionRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}

/// Artifact filename for an export performed on `date` (date-only, no time
/// component).
pub fn export_filename(date: NaiveDate) -> String {
    format!("latchkey-decisions-{}.json", date.format("%Y-%m-%d"))
}
