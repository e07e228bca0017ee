//! Events that trigger session transitions.
//!
//! Events represent things that happened: reviewer actions arriving from
//! the UI boundary, batches delivered by the ingestion boundary, and
//! completion results fed back by the effect interpreter. They are inputs
//! to the pure transition function, so anything time- or I/O-dependent
//! (edit timestamps, fetched batches) rides on the event itself.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use latchkey_core::{ArticleId, Batch, FilterConfig, ReviewStatus};

/// All events that can drive a review session.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    // =========================================================================
    // Ingestion and view events
    // =========================================================================
    /// A batch arrived from the ingestion boundary.
    BatchIngested { batch: Batch },

    /// The reviewer changed the filter configuration.
    FilterChanged { filter: FilterConfig },

    /// The reviewer focused an article in the visible list.
    ArticleSelected { article_id: ArticleId },

    /// The reviewer toggled the POV-quality panel.
    PovQualityToggled { enabled: bool },

    /// The reviewer toggled the voice-analysis panel.
    VoiceAnalysisToggled { enabled: bool },

    // =========================================================================
    // Review mutations
    // =========================================================================
    /// The reviewer assigned a disposition to an article.
    StatusChangeRequested {
        article_id: ArticleId,
        status: ReviewStatus,
    },

    /// The reviewer edited an article's proposed point-of-view text.
    /// `edited_at` is stamped at the boundary.
    PovEditRequested {
        article_id: ArticleId,
        text: String,
        edited_at: DateTime<Utc>,
    },

    /// The reviewer archived the current batch.
    ArchiveRequested,

    // =========================================================================
    // Inbound sync (refresh)
    // =========================================================================
    /// The reviewer asked for a refresh from the annotation agent.
    RefreshRequested,

    /// The refresh completed; `None` means nothing new was available.
    RefreshSucceeded { batch: Option<Batch> },

    /// The refresh failed; the inbound machine goes offline.
    RefreshFailed { reason: String },

    // =========================================================================
    // Outbound sync (publish)
    // =========================================================================
    /// The reviewer asked to publish the approved articles.
    PublishRequested,

    /// The publish completed.
    PublishSucceeded { published: usize },

    /// The publish failed; the outbound machine enters its error state.
    PublishFailed { reason: String },

    // =========================================================================
    // Decision export
    // =========================================================================
    /// The reviewer asked for a decisions export.
    ExportRequested,

    /// The decisions artifact was written.
    ExportWritten { path: PathBuf },

    /// Writing the decisions artifact failed.
    ExportFailed { reason: String },
}

impl Event {
    /// Short form for dispatch logging.
    pub fn log_summary(&self) -> String {
        match self {
            Event::BatchIngested { batch } => {
                format!("BatchIngested({}, {} articles)", batch.id, batch.articles.len())
            }
            Event::FilterChanged { .. } => "FilterChanged".to_string(),
            Event::ArticleSelected { article_id } => format!("ArticleSelected({})", article_id),
            Event::PovQualityToggled { enabled } => format!("PovQualityToggled({})", enabled),
            Event::VoiceAnalysisToggled { enabled } => {
                format!("VoiceAnalysisToggled({})", enabled)
            }
            Event::StatusChangeRequested { article_id, status } => {
                format!("StatusChangeRequested({}, {})", article_id, status)
            }
            Event::PovEditRequested { article_id, .. } => {
                format!("PovEditRequested({})", article_id)
            }
            Event::ArchiveRequested => "ArchiveRequested".to_string(),
            Event::RefreshRequested => "RefreshRequested".to_string(),
            Event::RefreshSucceeded { batch } => match batch {
                Some(batch) => format!("RefreshSucceeded({} articles)", batch.articles.len()),
                None => "RefreshSucceeded(no new articles)".to_string(),
            },
            Event::RefreshFailed { reason } => format!("RefreshFailed({})", reason),
            Event::PublishRequested => "PublishRequested".to_string(),
            Event::PublishSucceeded { published } => {
                format!("PublishSucceeded({} articles)", published)
            }
            Event::PublishFailed { reason } => format!("PublishFailed({})", reason),
            Event::ExportRequested => "ExportRequested".to_string(),
            Event::ExportWritten { path } => format!("ExportWritten({})", path.display()),
            Event::ExportFailed { reason } => format!("ExportFailed({})", reason),
        }
    }
}
