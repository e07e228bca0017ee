//! Session store.
//!
//! Thread-safe owner of the review-session states. The store is the only
//! writer: every mutation goes through [`SessionStore::process_event`],
//! which runs the transition function, executes effects, feeds result
//! events back, and stores the final state as one whole-state replacement.
//! A store-wide dispatch lock serializes event processing, so a reader can
//! never observe a batch with stale statistics.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use chrono::Utc;
use latchkey_core::{ArticleId, Batch, FilterConfig, ReviewStatus};
use tokio::sync::{Mutex, RwLock};
use tracing::info;

use super::event::Event;
use super::interpreter::{execute_effects, InterpreterContext};
use super::state::{SessionId, SessionState};
use super::transition::{transition, TransitionResult};

/// Thread-safe store for review sessions.
pub struct SessionStore {
    states: RwLock<HashMap<SessionId, SessionState>>,
    /// Serializes dispatch: one event is fully processed (transition,
    /// effects, result events, state replacement) before the next begins.
    dispatch_guard: Mutex<()>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            states: RwLock::new(HashMap::new()),
            dispatch_guard: Mutex::new(()),
        }
    }

    /// Current state for a session, if it exists.
    pub async fn get(&self, session_id: SessionId) -> Option<SessionState> {
        let states = self.states.read().await;
        states.get(&session_id).cloned()
    }

    /// Current state for a session, creating the initial state if needed.
    pub async fn get_or_init(&self, session_id: SessionId) -> SessionState {
        {
            let states = self.states.read().await;
            if let Some(state) = states.get(&session_id) {
                return state.clone();
            }
        }
        let state = SessionState::initial();
        self.set(session_id, state.clone()).await;
        state
    }

    async fn set(&self, session_id: SessionId, state: SessionState) {
        let mut states = self.states.write().await;
        states.insert(session_id, state);
    }

    /// Drop a session (e.g. when the reviewer closes the desk).
    pub async fn remove(&self, session_id: SessionId) -> Option<SessionState> {
        let mut states = self.states.write().await;
        states.remove(&session_id)
    }

    /// Process an event for the session named in `ctx`.
    ///
    /// 1. Takes the dispatch lock
    /// 2. Runs the transition function
    /// 3. Executes effects via the interpreter
    /// 4. Feeds result events back into the loop
    /// 5. Stores the final state
    ///
    /// Returns the final state after all transitions.
    pub fn process_event<'a>(
        &'a self,
        event: Event,
        ctx: &'a InterpreterContext,
    ) -> Pin<Box<dyn Future<Output = SessionState> + Send + 'a>> {
        Box::pin(async move {
            let _guard = self.dispatch_guard.lock().await;
            let session_id = ctx.session_id;
            let mut current_state = self.get_or_init(session_id).await;

            let mut events_to_process = vec![event];

            while let Some(event) = events_to_process.pop() {
                info!(
                    "processing event {} for session {}",
                    event.log_summary(),
                    session_id
                );

                let TransitionResult { state, effects } = transition(current_state, event);
                current_state = state;

                if !effects.is_empty() {
                    let result_events = execute_effects(ctx, effects).await;

                    // Queue result events in order (the queue pops from the back).
                    for result_event in result_events.into_iter().rev() {
                        events_to_process.push(result_event);
                    }
                }
            }

            self.set(session_id, current_state.clone()).await;
            current_state
        })
    }

    // =========================================================================
    // Session operations
    // =========================================================================

    /// Deliver a batch from the ingestion boundary.
    pub async fn ingest_batch(&self, ctx: &InterpreterContext, batch: Batch) -> SessionState {
        self.process_event(Event::BatchIngested { batch }, ctx).await
    }

    /// Replace the reviewer's filter configuration.
    pub async fn change_filter(
        &self,
        ctx: &InterpreterContext,
        filter: FilterConfig,
    ) -> SessionState {
        self.process_event(Event::FilterChanged { filter }, ctx).await
    }

    /// Focus an article in the visible list.
    pub async fn select_article(
        &self,
        ctx: &InterpreterContext,
        article_id: ArticleId,
    ) -> SessionState {
        self.process_event(Event::ArticleSelected { article_id }, ctx)
            .await
    }

    /// Assign a disposition to an article.
    pub async fn set_status(
        &self,
        ctx: &InterpreterContext,
        article_id: ArticleId,
        status: ReviewStatus,
    ) -> SessionState {
        self.process_event(Event::StatusChangeRequested { article_id, status }, ctx)
            .await
    }

    /// Edit an article's proposed point-of-view text. The edit timestamp
    /// is stamped here, at the boundary.
    pub async fn edit_pov(
        &self,
        ctx: &InterpreterContext,
        article_id: ArticleId,
        text: String,
    ) -> SessionState {
        self.process_event(
            Event::PovEditRequested {
                article_id,
                text,
                edited_at: Utc::now(),
            },
            ctx,
        )
        .await
    }

    pub async fn toggle_pov_quality(
        &self,
        ctx: &InterpreterContext,
        enabled: bool,
    ) -> SessionState {
        self.process_event(Event::PovQualityToggled { enabled }, ctx)
            .await
    }

    pub async fn toggle_voice_analysis(
        &self,
        ctx: &InterpreterContext,
        enabled: bool,
    ) -> SessionState {
        self.process_event(Event::VoiceAnalysisToggled { enabled }, ctx)
            .await
    }

    /// Request a refresh from the annotation agent.
    pub async fn refresh(&self, ctx: &InterpreterContext) -> SessionState {
        self.process_event(Event::RefreshRequested, ctx).await
    }

    /// Request a publish of the approved articles.
    pub async fn publish(&self, ctx: &InterpreterContext) -> SessionState {
        self.process_event(Event::PublishRequested, ctx).await
    }

    /// Request a decisions export.
    pub async fn export_decisions(&self, ctx: &InterpreterContext) -> SessionState {
        self.process_event(Event::ExportRequested, ctx).await
    }

    /// Archive the current batch.
    pub async fn archive_batch(&self, ctx: &InterpreterContext) -> SessionState {
        self.process_event(Event::ArchiveRequested, ctx).await
    }
}
