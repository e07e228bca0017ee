//! The reviewer-visible view of a batch.
//!
//! The projection composes the filter predicate with the sort policy to
//! produce the canonical visible list, and resolves the focused selection
//! against that list.

use crate::article::{Article, ArticleId};
use crate::filter::FilterConfig;

/// Filter then sort: confidence descending, ties keeping ingestion order.
///
/// The sort must be stable — confidence ties are common with
/// round-numbered scores, and the relative ingestion order of tied
/// articles is part of the contract. `slice::sort_by` is stable, and
/// `total_cmp` keeps the comparator total even for NaN.
pub fn project<'a>(articles: &'a [Article], filter: &FilterConfig) -> Vec<&'a Article> {
    let mut visible: Vec<&Article> = articles.iter().filter(|a| filter.matches(a)).collect();
    visible.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    visible
}

/// Resolve the focused selection against the visible list.
///
/// - empty list: no selection;
/// - current selection still visible: unchanged;
/// - otherwise: the first visible article.
///
/// Callers re-run this whenever the visible list's membership may have
/// changed, not only on explicit selection.
pub fn resolve_selection(
    visible: &[&Article],
    current: Option<&ArticleId>,
) -> Option<ArticleId> {
    if visible.is_empty() {
        return None;
    }
    if let Some(id) = current {
        if visible.iter().any(|a| &a.id == id) {
            return Some(id.clone());
        }
    }
    Some(visible[0].id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::ReviewStatus;
    use crate::filter::{ConfidenceFilter, StatusFilter};
    use crate::testutil::article;

    fn ids(visible: &[&Article]) -> Vec<String> {
        visible.iter().map(|a| a.id.0.clone()).collect()
    }

    #[test]
    fn orders_by_confidence_descending() {
        let articles = vec![
            article("a", 0.45),
            article("b", 0.85),
            article("c", 0.72),
        ];
        let visible = project(&articles, &FilterConfig::default());
        assert_eq!(ids(&visible), vec!["b", "c", "a"]);
    }

    #[test]
    fn ties_keep_ingestion_order() {
        let articles = vec![
            article("first", 0.7),
            article("second", 0.7),
            article("third", 0.9),
            article("fourth", 0.7),
        ];
        let visible = project(&articles, &FilterConfig::default());
        assert_eq!(ids(&visible), vec!["third", "first", "second", "fourth"]);
    }

    #[test]
    fn filter_applies_before_sort() {
        let articles = vec![
            article("a", 0.85),
            article("b", 0.72),
            article("c", 0.45),
            article("d", 0.78),
            article("e", 0.68),
        ];
        let filter = FilterConfig {
            confidence: ConfidenceFilter::High,
            ..FilterConfig::default()
        };
        let visible = project(&articles, &filter);
        assert_eq!(ids(&visible), vec!["a", "d"]);
    }

    #[test]
    fn selects_first_when_nothing_selected() {
        let articles = vec![article("a", 0.5), article("b", 0.9)];
        let visible = project(&articles, &FilterConfig::default());
        assert_eq!(resolve_selection(&visible, None), Some("b".into()));
    }

    #[test]
    fn keeps_a_still_visible_selection() {
        let articles = vec![article("a", 0.5), article("b", 0.9)];
        let visible = project(&articles, &FilterConfig::default());
        let current = ArticleId::from("a");
        assert_eq!(
            resolve_selection(&visible, Some(&current)),
            Some("a".into())
        );
    }

    #[test]
    fn reselects_first_when_selection_is_filtered_out() {
        let mut articles = vec![article("a", 0.5), article("b", 0.9)];
        articles[0].status = ReviewStatus::Rejected;
        let filter = FilterConfig {
            status: StatusFilter::Only(ReviewStatus::Pending),
            ..FilterConfig::default()
        };
        let visible = project(&articles, &filter);
        let current = ArticleId::from("a");
        assert_eq!(
            resolve_selection(&visible, Some(&current)),
            Some("b".into())
        );
    }

    #[test]
    fn clears_selection_when_list_becomes_empty() {
        let articles: Vec<Article> = vec![];
        let visible = project(&articles, &FilterConfig::default());
        let current = ArticleId::from("a");
        assert_eq!(resolve_selection(&visible, Some(&current)), None);
    }
}
