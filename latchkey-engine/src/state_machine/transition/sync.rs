//! Sync transitions: the inbound refresh machine, the outbound publish
//! machine, and the decisions export.
//!
//! Each machine guards against concurrent re-entry: a request that arrives
//! while its operation is already in flight is ignored without a state
//! change. The publish machine additionally refuses outright, before any
//! transition, when there is nothing approved to publish.

use super::{with_resolved_selection, TransitionResult};
use crate::notify::Notification;
use crate::state_machine::effect::{Effect, LogLevel};
use crate::state_machine::event::Event;
use crate::state_machine::state::{InboundStatus, OutboundStatus, SessionState};

/// Handle refresh, publish, and export events.
pub fn handle(mut state: SessionState, event: Event) -> TransitionResult {
    match event {
        // =====================================================================
        // Inbound: online/offline -> processing -> online (offline on failure)
        // =====================================================================
        Event::RefreshRequested => match state.inbound {
            InboundStatus::Processing => TransitionResult::new(
                state,
                vec![Effect::Log {
                    level: LogLevel::Debug,
                    message: "refresh already in flight; request ignored".to_string(),
                }],
            ),
            InboundStatus::Online | InboundStatus::Offline => {
                state.inbound = InboundStatus::Processing;
                TransitionResult::new(
                    state,
                    vec![
                        Effect::Notify(Notification::info(
                            "Refreshing Annotations",
                            "Fetching latest articles...",
                        )),
                        Effect::BeginRefresh,
                    ],
                )
            }
        },

        Event::RefreshSucceeded { batch } => {
            if state.inbound != InboundStatus::Processing {
                return TransitionResult::new(
                    state,
                    vec![Effect::Log {
                        level: LogLevel::Warn,
                        message: "refresh completion arrived while not processing".to_string(),
                    }],
                );
            }
            state.inbound = InboundStatus::Online;
            match batch {
                None => TransitionResult::new(
                    state,
                    vec![Effect::Notify(Notification::info(
                        "Sync Complete",
                        "No new articles available",
                    ))],
                ),
                Some(mut batch) => {
                    batch.recompute_stats();
                    let count = batch.articles.len();
                    state.batch = Some(batch);
                    TransitionResult::new(
                        with_resolved_selection(state),
                        vec![Effect::Notify(Notification::info(
                            "Sync Complete",
                            format!("Received {} articles", count),
                        ))],
                    )
                }
            }
        }

        Event::RefreshFailed { reason } => {
            if state.inbound != InboundStatus::Processing {
                return TransitionResult::new(
                    state,
                    vec![Effect::Log {
                        level: LogLevel::Warn,
                        message: "refresh failure arrived while not processing".to_string(),
                    }],
                );
            }
            state.inbound = InboundStatus::Offline;
            TransitionResult::new(
                state,
                vec![Effect::Notify(Notification::error("Sync Failed", reason))],
            )
        }

        // =====================================================================
        // Outbound: ready/error -> busy -> ready (error on failure)
        // =====================================================================
        Event::PublishRequested => {
            if state.outbound == OutboundStatus::Busy {
                return TransitionResult::new(
                    state,
                    vec![Effect::Log {
                        level: LogLevel::Debug,
                        message: "publish already in flight; request ignored".to_string(),
                    }],
                );
            }
            if state.batch.is_none() {
                return TransitionResult::no_change(state);
            }
            let approved: Vec<_> = state
                .batch
                .as_ref()
                .map(|batch| batch.approved().cloned().collect())
                .unwrap_or_default();
            if approved.is_empty() {
                // Refusal happens before any state transition.
                return TransitionResult::new(
                    state,
                    vec![Effect::Notify(Notification::error(
                        "No Articles to Sync",
                        "Please approve some articles first",
                    ))],
                );
            }
            state.outbound = OutboundStatus::Busy;
            let count = approved.len();
            TransitionResult::new(
                state,
                vec![
                    Effect::Notify(Notification::info(
                        "Syncing to Newsletter",
                        format!("Exporting {} approved articles...", count),
                    )),
                    Effect::BeginPublish { articles: approved },
                ],
            )
        }

        Event::PublishSucceeded { published } => {
            if state.outbound != OutboundStatus::Busy {
                return TransitionResult::new(
                    state,
                    vec![Effect::Log {
                        level: LogLevel::Warn,
                        message: "publish completion arrived while not busy".to_string(),
                    }],
                );
            }
            state.outbound = OutboundStatus::Ready;
            TransitionResult::new(
                state,
                vec![Effect::Notify(
                    Notification::info(
                        "Export Complete",
                        format!(
                            "Successfully exported {} articles to the assembly desk",
                            published
                        ),
                    )
                    .with_duration(3_000),
                )],
            )
        }

        Event::PublishFailed { reason } => {
            if state.outbound != OutboundStatus::Busy {
                return TransitionResult::new(
                    state,
                    vec![Effect::Log {
                        level: LogLevel::Warn,
                        message: "publish failure arrived while not busy".to_string(),
                    }],
                );
            }
            state.outbound = OutboundStatus::Error;
            TransitionResult::new(
                state,
                vec![Effect::Notify(Notification::error(
                    "Publish Failed",
                    reason,
                ))],
            )
        }

        // =====================================================================
        // Decisions export
        // =====================================================================
        Event::ExportRequested => match &state.batch {
            None => TransitionResult::no_change(state),
            Some(batch) => {
                let records = latchkey_core::decisions(batch);
                TransitionResult::new(state, vec![Effect::WriteDecisions { records }])
            }
        },

        Event::ExportWritten { path } => TransitionResult::new(
            state,
            vec![Effect::Notify(Notification::info(
                "Decisions Exported",
                format!("Editorial decisions written to {}", path.display()),
            ))],
        ),

        Event::ExportFailed { reason } => TransitionResult::new(
            state,
            vec![Effect::Notify(Notification::error("Export Failed", reason))],
        ),

        other => TransitionResult::new(
            state,
            vec![Effect::Log {
                level: LogLevel::Warn,
                message: format!("sync handler ignoring {}", other.log_summary()),
            }],
        ),
    }
}
