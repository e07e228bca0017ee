//! Review transitions: ingestion, the working view, and article mutation.

use latchkey_core::ReviewStatus;

use super::{with_resolved_selection, TransitionResult};
use crate::notify::Notification;
use crate::state_machine::effect::{Effect, LogLevel};
use crate::state_machine::event::Event;
use crate::state_machine::state::SessionState;

/// Notification text for each disposition, keyed by the new status value.
fn status_message(status: ReviewStatus) -> &'static str {
    match status {
        ReviewStatus::Approved => "Article approved for newsletter",
        ReviewStatus::Rejected => "Article rejected",
        ReviewStatus::Saved => "Article saved for later review",
        ReviewStatus::Pending => "Article moved back to pending",
    }
}

/// Handle ingestion, view, and mutation events.
///
/// Mutations against a missing batch or an unknown article id are silent
/// no-ops: the reviewer list and the batch can transiently disagree, and
/// that race is benign.
pub fn handle(mut state: SessionState, event: Event) -> TransitionResult {
    match event {
        Event::BatchIngested { mut batch } => {
            // Upstream-supplied stats are never trusted.
            batch.recompute_stats();
            let count = batch.articles.len();
            let id = batch.id.clone();
            state.batch = Some(batch);
            TransitionResult::new(
                with_resolved_selection(state),
                vec![Effect::Log {
                    level: LogLevel::Info,
                    message: format!("ingested batch {} with {} articles", id, count),
                }],
            )
        }

        Event::FilterChanged { filter } => {
            state.filter = filter;
            TransitionResult::no_change(with_resolved_selection(state))
        }

        Event::ArticleSelected { article_id } => {
            let is_visible = state.visible().iter().any(|a| a.id == article_id);
            if is_visible {
                state.selected = Some(article_id);
            }
            TransitionResult::no_change(state)
        }

        Event::PovQualityToggled { enabled } => {
            state.pov_quality_enabled = enabled;
            TransitionResult::no_change(state)
        }

        Event::VoiceAnalysisToggled { enabled } => {
            state.voice_analysis_enabled = enabled;
            TransitionResult::no_change(state)
        }

        Event::StatusChangeRequested { article_id, status } => {
            let Some(batch) = state.batch.as_mut() else {
                return TransitionResult::no_change(state);
            };
            let Some(article) = batch.find_article_mut(&article_id) else {
                return TransitionResult::no_change(state);
            };
            article.status = status;
            batch.recompute_stats();
            TransitionResult::new(
                with_resolved_selection(state),
                vec![Effect::Notify(Notification::info(
                    "Status Updated",
                    status_message(status),
                ))],
            )
        }

        Event::PovEditRequested {
            article_id,
            text,
            edited_at,
        } => {
            let Some(batch) = state.batch.as_mut() else {
                return TransitionResult::no_change(state);
            };
            let Some(article) = batch.find_article_mut(&article_id) else {
                return TransitionResult::no_change(state);
            };
            article.apply_pov_edit(text, edited_at);
            batch.recompute_stats();
            TransitionResult::new(
                state,
                vec![Effect::Notify(Notification::info(
                    "POV Updated",
                    "Proposed point of view has been modified",
                ))],
            )
        }

        Event::ArchiveRequested => TransitionResult::new(
            state,
            vec![Effect::Notify(Notification::info(
                "Batch Archived",
                "Current batch has been archived",
            ))],
        ),

        other => {
            // Dispatched here in error; leave the state alone.
            TransitionResult::new(
                state,
                vec![Effect::Log {
                    level: LogLevel::Warn,
                    message: format!("review handler ignoring {}", other.log_summary()),
                }],
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_machine::transition::transition;
    use crate::testutil::{article, batch, state_with_batch};
    use chrono::{TimeZone, Utc};
    use latchkey_core::{
        ArticleId, ConfidenceFilter, FilterConfig, StatusFilter,
    };

    fn notify_effects(result: &TransitionResult) -> Vec<&Notification> {
        result
            .effects
            .iter()
            .filter_map(|e| match e {
                Effect::Notify(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn ingest_replaces_batch_recomputes_stats_and_selects_first() {
        let state = SessionState::initial();
        let mut b = batch(vec![article("a", 0.5), article("b", 0.9)]);
        // Poison the upstream stats to prove they are recomputed.
        b.stats.total_processed = 999;

        let result = transition(state, Event::BatchIngested { batch: b });

        let batch = result.state.batch.as_ref().unwrap();
        assert_eq!(batch.stats.total_processed, 2);
        // First of the visible (confidence-descending) list.
        assert_eq!(result.state.selected, Some(ArticleId::from("b")));
        assert!(notify_effects(&result).is_empty());
    }

    #[test]
    fn filter_change_reresolves_selection() {
        let mut state = state_with_batch(vec![article("a", 0.85), article("b", 0.45)]);
        state.selected = Some(ArticleId::from("b"));

        let filter = FilterConfig {
            confidence: ConfidenceFilter::High,
            ..FilterConfig::default()
        };
        let result = transition(state, Event::FilterChanged { filter });

        // "b" fell out of the visible list; focus moves to the new first.
        assert_eq!(result.state.selected, Some(ArticleId::from("a")));
        assert!(result.effects.is_empty());
    }

    #[test]
    fn filter_change_to_empty_list_clears_selection() {
        let state = state_with_batch(vec![article("a", 0.85)]);
        let filter = FilterConfig {
            confidence: ConfidenceFilter::Low,
            ..FilterConfig::default()
        };
        let result = transition(state, Event::FilterChanged { filter });
        assert_eq!(result.state.selected, None);
    }

    #[test]
    fn selecting_a_visible_article_focuses_it() {
        let state = state_with_batch(vec![article("a", 0.85), article("b", 0.45)]);
        let result = transition(
            state,
            Event::ArticleSelected {
                article_id: ArticleId::from("b"),
            },
        );
        assert_eq!(result.state.selected, Some(ArticleId::from("b")));
    }

    #[test]
    fn selecting_a_non_visible_article_is_a_silent_no_op() {
        let mut state = state_with_batch(vec![article("a", 0.85), article("b", 0.45)]);
        state.filter.confidence = ConfidenceFilter::High;
        state = with_resolved_selection(state);
        let before = state.clone();

        let result = transition(
            state,
            Event::ArticleSelected {
                article_id: ArticleId::from("b"),
            },
        );
        assert_eq!(result.state, before);
        assert!(result.effects.is_empty());
    }

    #[test]
    fn status_change_overwrites_and_notifies() {
        let state = state_with_batch(vec![article("a", 0.85)]);
        let result = transition(
            state,
            Event::StatusChangeRequested {
                article_id: ArticleId::from("a"),
                status: ReviewStatus::Approved,
            },
        );

        let batch = result.state.batch.as_ref().unwrap();
        assert_eq!(batch.articles[0].status, ReviewStatus::Approved);

        let notifications = notify_effects(&result);
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].title, "Status Updated");
        assert_eq!(notifications[0].message, "Article approved for newsletter");
    }

    #[test]
    fn each_status_gets_its_own_message() {
        for (status, message) in [
            (ReviewStatus::Approved, "Article approved for newsletter"),
            (ReviewStatus::Rejected, "Article rejected"),
            (ReviewStatus::Saved, "Article saved for later review"),
            (ReviewStatus::Pending, "Article moved back to pending"),
        ] {
            let state = state_with_batch(vec![article("a", 0.85)]);
            let result = transition(
                state,
                Event::StatusChangeRequested {
                    article_id: ArticleId::from("a"),
                    status,
                },
            );
            assert_eq!(notify_effects(&result)[0].message, message);
        }
    }

    #[test]
    fn status_change_is_idempotent() {
        let state = state_with_batch(vec![article("a", 0.85), article("b", 0.45)]);
        let event = Event::StatusChangeRequested {
            article_id: ArticleId::from("a"),
            status: ReviewStatus::Approved,
        };

        let once = transition(state, event.clone());
        let twice = transition(once.state.clone(), event);

        assert_eq!(once.state, twice.state);
        let stats_once = &once.state.batch.as_ref().unwrap().stats;
        let stats_twice = &twice.state.batch.as_ref().unwrap().stats;
        assert_eq!(stats_once, stats_twice);
        // Re-application still notifies.
        assert_eq!(notify_effects(&twice).len(), 1);
    }

    #[test]
    fn status_change_without_batch_is_silent() {
        let state = SessionState::initial();
        let result = transition(
            state.clone(),
            Event::StatusChangeRequested {
                article_id: ArticleId::from("a"),
                status: ReviewStatus::Approved,
            },
        );
        assert_eq!(result.state, state);
        assert!(result.effects.is_empty());
    }

    #[test]
    fn status_change_for_unknown_id_is_silent() {
        let state = state_with_batch(vec![article("a", 0.85)]);
        let before = state.clone();
        let result = transition(
            state,
            Event::StatusChangeRequested {
                article_id: ArticleId::from("missing"),
                status: ReviewStatus::Rejected,
            },
        );
        assert_eq!(result.state, before);
        assert!(result.effects.is_empty());
    }

    #[test]
    fn status_change_updates_stats_and_selection_together() {
        // Viewing only pending articles; approving the focused one must
        // drop it from view and refocus in the same transition.
        let mut state = state_with_batch(vec![article("a", 0.85), article("b", 0.45)]);
        state.filter.status = StatusFilter::Only(ReviewStatus::Pending);
        state = with_resolved_selection(state);
        assert_eq!(state.selected, Some(ArticleId::from("a")));

        let result = transition(
            state,
            Event::StatusChangeRequested {
                article_id: ArticleId::from("a"),
                status: ReviewStatus::Approved,
            },
        );
        assert_eq!(result.state.selected, Some(ArticleId::from("b")));
    }

    #[test]
    fn pov_edit_keeps_the_session_baseline_across_edits() {
        let state = state_with_batch(vec![article("a", 0.85)]);
        let t1 = Utc.timestamp_millis_opt(1_000).unwrap();
        let t2 = Utc.timestamp_millis_opt(2_000).unwrap();

        let first = transition(
            state,
            Event::PovEditRequested {
                article_id: ArticleId::from("a"),
                text: "T1".to_string(),
                edited_at: t1,
            },
        );
        let second = transition(
            first.state,
            Event::PovEditRequested {
                article_id: ArticleId::from("a"),
                text: "T2".to_string(),
                edited_at: t2,
            },
        );

        let article = &second.state.batch.as_ref().unwrap().articles[0];
        let edit = article.edit.as_ref().unwrap();
        assert_eq!(edit.original_pov, "upstream POV");
        assert_eq!(edit.edited_pov, "T2");
        assert_eq!(article.proposed_pov, "T2");

        let notifications = notify_effects(&second);
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].title, "POV Updated");
    }

    #[test]
    fn pov_edit_accepts_any_length() {
        let state = state_with_batch(vec![article("a", 0.85)]);
        let long = "x".repeat(10_000);
        let result = transition(
            state,
            Event::PovEditRequested {
                article_id: ArticleId::from("a"),
                text: long.clone(),
                edited_at: Utc.timestamp_millis_opt(0).unwrap(),
            },
        );
        assert_eq!(
            result.state.batch.as_ref().unwrap().articles[0].proposed_pov,
            long
        );
    }

    #[test]
    fn pov_edit_for_unknown_id_is_silent() {
        let state = state_with_batch(vec![article("a", 0.85)]);
        let before = state.clone();
        let result = transition(
            state,
            Event::PovEditRequested {
                article_id: ArticleId::from("missing"),
                text: "T".to_string(),
                edited_at: Utc.timestamp_millis_opt(0).unwrap(),
            },
        );
        assert_eq!(result.state, before);
        assert!(result.effects.is_empty());
    }

    #[test]
    fn archive_notifies_without_touching_state() {
        let state = state_with_batch(vec![article("a", 0.85)]);
        let before = state.clone();
        let result = transition(state, Event::ArchiveRequested);
        assert_eq!(result.state, before);
        let notifications = notify_effects(&result);
        assert_eq!(notifications[0].title, "Batch Archived");
    }

    #[test]
    fn toggles_set_their_flags() {
        let state = SessionState::initial();
        let result = transition(state, Event::PovQualityToggled { enabled: false });
        assert!(!result.state.pov_quality_enabled);
        let result = transition(result.state, Event::VoiceAnalysisToggled { enabled: false });
        assert!(!result.state.voice_analysis_enabled);
    }
}
