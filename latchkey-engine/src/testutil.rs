//! Fixture builders shared by the engine's unit tests.

use chrono::{TimeZone, Utc};
use latchkey_core::{
    Article, ArticleId, Batch, BatchId, BatchOrigin, CollaborationAnalysis, CollaborationFit,
    PatternStrength, ReviewStatus, VoiceElements, VoicePatterns, VoiceScore,
};

use crate::state_machine::event::Event;
use crate::state_machine::state::SessionState;
use crate::state_machine::transition::transition;

/// A pending article with the given id and confidence and neutral values
/// everywhere else.
pub fn article(id: &str, confidence: f64) -> Article {
    Article {
        id: ArticleId::from(id),
        title: format!("Article {}", id),
        source: "Example Wire".to_string(),
        url: format!("https://example.com/{}", id),
        confidence,
        audience_score: 60.0,
        collaboration_fit: CollaborationFit::Medium,
        proposed_pov: "upstream POV".to_string(),
        pain_points: vec![],
        suggested_headlines: vec![],
        full_analysis: String::new(),
        status: ReviewStatus::Pending,
        pov_quality: None,
        collaboration: CollaborationAnalysis {
            human_contribution: "editorial judgment".to_string(),
            ai_contribution: "research aggregation".to_string(),
            result_multiplier: "2x".to_string(),
            quality: CollaborationFit::Medium,
        },
        voice_score: VoiceScore {
            overall_score: 7.5,
            elements: VoiceElements {
                confident_grounded_tone: true,
                colleague_approach: true,
                parenthetical_honesty: false,
                avoid_hype_language: true,
                three_element_list: false,
                build_to_revelation: true,
                cultural_reference: false,
            },
            patterns: VoicePatterns {
                communication_first: true,
                collaboration_metaphor: PatternStrength::Weak,
                figure_it_out_ethos: true,
                pragmatic_skepticism: true,
                experience_validation: PatternStrength::Strong,
            },
            suggestions: vec![],
        },
        processing_timestamp: Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
        edit: None,
    }
}

/// A batch around the given articles.
pub fn batch(articles: Vec<Article>) -> Batch {
    Batch::new(
        BatchId::from("batch-test"),
        BatchOrigin::ExternalAgent,
        articles,
        vec![],
    )
}

/// A session that has already ingested the given articles (stats derived,
/// selection resolved), produced through the real transition path.
pub fn state_with_batch(articles: Vec<Article>) -> SessionState {
    transition(
        SessionState::initial(),
        Event::BatchIngested {
            batch: batch(articles),
        },
    )
    .state
}
