//! The latchkey review-session engine.
//!
//! Owns the session state machine for the editorial review desk: batch
//! ingestion, the filter/sort projection and focused selection, disposition
//! and point-of-view mutations with derived statistics, the two sync state
//! machines gating refresh and publish, and the decisions export. All
//! mutation flows through a pure transition function; I/O happens in the
//! effect interpreter against swappable collaborators.

pub mod collaborators;
pub mod config;
pub mod notify;
pub mod state_machine;

#[cfg(test)]
pub(crate) mod testutil;

pub use collaborators::{AnnotationSource, PublishSink, SimulatedAgent, SimulatedAssembly};
pub use config::EngineConfig;
pub use notify::{ChannelNotifier, LogNotifier, Notification, Notifier, Severity};
pub use state_machine::{
    Effect, Event, InboundStatus, InterpreterContext, OutboundStatus, SessionId, SessionState,
    SessionStore, TransitionResult,
};
