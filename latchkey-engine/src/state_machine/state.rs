//! State types for the review-session state machine.
//!
//! One [`SessionState`] value owns everything a review session knows: the
//! current batch, the reviewer's filter, the focused selection, the two
//! sync enumerations, and the analysis display toggles. All mutation goes
//! through the transition function so that statistics recomputation and
//! selection resolution are never skipped.

use std::fmt;

use latchkey_core::{Article, ArticleId, Batch, FilterConfig, ReviewStatus};
use serde::Serialize;
use uuid::Uuid;

/// Identifier for one review session in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Inbound sync machine: the refresh-from-agent operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InboundStatus {
    #[default]
    Online,
    Offline,
    Processing,
}

/// Outbound sync machine: the publish-to-assembly operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutboundStatus {
    #[default]
    Ready,
    Busy,
    Error,
}

/// Whole state of one review session.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub batch: Option<Batch>,
    pub filter: FilterConfig,
    /// Focused article, always valid against the visible list (or None
    /// when the visible list is empty).
    pub selected: Option<ArticleId>,
    pub inbound: InboundStatus,
    pub outbound: OutboundStatus,
    pub pov_quality_enabled: bool,
    pub voice_analysis_enabled: bool,
}

impl SessionState {
    /// Fresh session: no batch, all-pass filter, both analyses shown.
    pub fn initial() -> Self {
        Self {
            pov_quality_enabled: true,
            voice_analysis_enabled: true,
            ..Self::default()
        }
    }

    /// The reviewer-visible list: filtered, confidence-descending, stable.
    pub fn visible(&self) -> Vec<&Article> {
        match &self.batch {
            Some(batch) => latchkey_core::project(&batch.articles, &self.filter),
            None => Vec::new(),
        }
    }

    /// The focused article, if any.
    pub fn selected_article(&self) -> Option<&Article> {
        let id = self.selected.as_ref()?;
        self.batch.as_ref()?.find_article(id)
    }

    pub fn approved_count(&self) -> usize {
        self.batch.as_ref().map_or(0, Batch::approved_count)
    }

    /// Number of articles still pending review.
    pub fn pending_count(&self) -> usize {
        self.batch.as_ref().map_or(0, |batch| {
            batch
                .articles
                .iter()
                .filter(|a| a.status == ReviewStatus::Pending)
                .count()
        })
    }
}
