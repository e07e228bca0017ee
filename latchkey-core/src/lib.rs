//! Domain model and pure logic for the latchkey editorial review desk.
//!
//! This crate holds everything that needs no I/O and no state: the article
//! and batch schema, the filter predicate, the sort/projection pipeline,
//! the derived batch statistics, and the decision-export records. The
//! stateful review session lives in `latchkey-engine`.

pub mod article;
pub mod export;
pub mod filter;
pub mod projection;
pub mod stats;

#[cfg(test)]
pub(crate) mod testutil;

pub use article::{
    Article, ArticleId, Batch, BatchId, BatchOrigin, CollaborationAnalysis, CollaborationFit,
    EditRecord, PatternStrength, PovQuality, ReviewStatus, VoiceElements, VoicePatterns,
    VoiceScore,
};
pub use export::{decisions, export_filename, to_pretty_json, DecisionRecord};
pub use filter::{ConfidenceBand, ConfidenceFilter, FilterConfig, SourceFilter, StatusFilter};
pub use projection::{project, resolve_selection};
pub use stats::BatchStats;
