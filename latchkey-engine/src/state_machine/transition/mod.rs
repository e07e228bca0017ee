//! Pure session transition function.
//!
//! The transition function takes the current session state and an event,
//! and returns the new state and a list of effects. It has NO side
//! effects; anything impure (timestamps, fetched batches, written files)
//! arrives on the event or leaves as an effect.
//!
//! Handlers are split by event family, each with co-located tests:
//! - `review`: ingestion, filter, selection, dispositions, POV edits,
//!   display toggles, archiving
//! - `sync`: the inbound refresh machine, the outbound publish machine,
//!   and the decisions export

mod review;
mod sync;

use super::effect::Effect;
use super::event::Event;
use super::state::SessionState;

/// Result of a session transition.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub state: SessionState,
    /// Effects to execute.
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SessionState, effects: Vec<Effect>) -> Self {
        Self { state, effects }
    }

    /// Silent no-op: the state is returned unchanged and nothing happens.
    pub fn no_change(state: SessionState) -> Self {
        Self {
            state,
            effects: vec![],
        }
    }
}

/// Pure session transition function.
///
/// Given the current state and an event, returns the new state and the
/// effects to execute.
pub fn transition(state: SessionState, event: Event) -> TransitionResult {
    match event {
        Event::BatchIngested { .. }
        | Event::FilterChanged { .. }
        | Event::ArticleSelected { .. }
        | Event::PovQualityToggled { .. }
        | Event::VoiceAnalysisToggled { .. }
        | Event::StatusChangeRequested { .. }
        | Event::PovEditRequested { .. }
        | Event::ArchiveRequested => review::handle(state, event),

        Event::RefreshRequested
        | Event::RefreshSucceeded { .. }
        | Event::RefreshFailed { .. }
        | Event::PublishRequested
        | Event::PublishSucceeded { .. }
        | Event::PublishFailed { .. }
        | Event::ExportRequested
        | Event::ExportWritten { .. }
        | Event::ExportFailed { .. } => sync::handle(state, event),
    }
}

/// Re-resolve the focused selection against the current visible list.
///
/// Runs after every transition that can change the visible list's
/// membership: ingest, filter change, disposition change, refresh-replace.
pub(crate) fn with_resolved_selection(mut state: SessionState) -> SessionState {
    let resolved = {
        let visible = state.visible();
        latchkey_core::resolve_selection(&visible, state.selected.as_ref())
    };
    state.selected = resolved;
    state
}
