//! Effects (side effects as data).
//!
//! Effects describe what should happen as a result of a session transition.
//! They are pure data; the interpreter executes them against the attached
//! collaborators. This separation keeps the transition function testable
//! without mocking any I/O.

use latchkey_core::{Article, DecisionRecord};

use crate::notify::Notification;

/// All effects a transition can produce.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Deliver one user-facing notification.
    Notify(Notification),

    /// Start the inbound refresh against the annotation source. The
    /// completion feeds back as `RefreshSucceeded`/`RefreshFailed`.
    BeginRefresh,

    /// Start the outbound publish of the approved articles. The completion
    /// feeds back as `PublishSucceeded`/`PublishFailed`.
    BeginPublish { articles: Vec<Article> },

    /// Write the decisions artifact. The completion feeds back as
    /// `ExportWritten`/`ExportFailed`.
    WriteDecisions { records: Vec<DecisionRecord> },

    /// Log a message through tracing.
    Log { level: LogLevel, message: String },
}

/// Log level for logging effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}
