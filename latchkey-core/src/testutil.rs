//! Fixture builders shared by the unit tests.

use chrono::{TimeZone, Utc};

use crate::article::{
    Article, ArticleId, CollaborationAnalysis, CollaborationFit, PatternStrength, ReviewStatus,
    VoiceElements, VoicePatterns, VoiceScore,
};

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
