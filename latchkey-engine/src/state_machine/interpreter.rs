//! Effect interpreter.
//!
//! The interpreter is the boundary between the pure state machine and the
//! impure world: it executes effects against the attached collaborators
//! and returns result events. Long-running collaborator calls (refresh,
//! publish) are spawned; their completion events re-enter the store from
//! the spawned task, so the dispatch loop never blocks on them.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use latchkey_core::{export, DecisionRecord};
use tracing::{debug, error, info, warn};

use super::effect::{Effect, LogLevel};
use super::event::Event;
use super::state::SessionId;
use super::store::SessionStore;
use crate::collaborators::{AnnotationSource, PublishSink};
use crate::notify::Notifier;

/// Everything the interpreter needs to execute effects for one session.
#[derive(Clone)]
pub struct InterpreterContext {
    pub session_id: SessionId,
    pub store: Arc<SessionStore>,
    pub source: Arc<dyn AnnotationSource>,
    pub sink: Arc<dyn PublishSink>,
    pub notifier: Arc<dyn Notifier>,
    pub export_dir: PathBuf,
}

/// Result of executing a single effect.
#[derive(Debug)]
pub enum EffectResult {
    /// Effect completed, produced result events.
    Ok(Vec<Event>),
    /// Effect failed with an error.
    Err(String),
}

impl EffectResult {
    pub fn single(event: Event) -> Self {
        Self::Ok(vec![event])
    }

    pub fn none() -> Self {
        Self::Ok(vec![])
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self::Err(msg.into())
    }
}

/// Execute a list of effects and collect result events.
///
/// Effects are executed sequentially. If one fails, execution continues
/// with the remaining effects and the error is logged.
pub async fn execute_effects(ctx: &InterpreterContext, effects: Vec<Effect>) -> Vec<Event> {
    let mut result_events = Vec::new();

    for effect in effects {
        match execute_effect(ctx, effect).await {
            EffectResult::Ok(events) => result_events.extend(events),
            EffectResult::Err(err) => {
                error!("effect execution failed: {}", err);
            }
        }
    }

    result_events
}

async fn execute_effect(ctx: &InterpreterContext, effect: Effect) -> EffectResult {
    match effect {
        Effect::Notify(notification) => {
            ctx.notifier.notify(notification).await;
            EffectResult::none()
        }

        Effect::Log { level, message } => {
            match level {
                LogLevel::Debug => debug!("{}", message),
                LogLevel::Info => info!("{}", message),
                LogLevel::Warn => warn!("{}", message),
                LogLevel::Error => error!("{}", message),
            }
            EffectResult::none()
        }

        Effect::BeginRefresh => {
            let ctx = ctx.clone();
            tokio::spawn(async move {
                let event = match ctx.source.fetch_latest().await {
                    Ok(batch) => Event::RefreshSucceeded { batch },
                    Err(err) => Event::RefreshFailed {
                        reason: format!("{:#}", err),
                    },
                };
                ctx.store.clone().process_event(event, &ctx).await;
            });
            EffectResult::none()
        }

        Effect::BeginPublish { articles } => {
            let ctx = ctx.clone();
            tokio::spawn(async move {
                let event = match ctx.sink.publish(&articles).await {
                    Ok(()) => Event::PublishSucceeded {
                        published: articles.len(),
                    },
                    Err(err) => Event::PublishFailed {
                        reason: format!("{:#}", err),
                    },
                };
                ctx.store.clone().process_event(event, &ctx).await;
            });
            EffectResult::none()
        }

        Effect::WriteDecisions { records } => {
            match write_artifact(&ctx.export_dir, &records).await {
                Ok(path) => EffectResult::single(Event::ExportWritten { path }),
                Err(err) => EffectResult::single(Event::ExportFailed {
                    reason: format!("{:#}", err),
                }),
            }
        }
    }
}

/// Write the decisions artifact into `dir`, named for today's date.
async fn write_artifact(dir: &Path, records: &[DecisionRecord]) -> anyhow::Result<PathBuf> {
    let filename = export::export_filename(Utc::now().date_naive());
    let path = dir.join(filename);
    let json = export::to_pretty_json(records).context("serializing decision records")?;
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("creating export directory {}", dir.display()))?;
    tokio::fs::write(&path, json)
        .await
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}
