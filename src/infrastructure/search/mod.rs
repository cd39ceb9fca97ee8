use std::sync::Arc;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

/// A service that performs fuzzy searching using the Skim algorithm.
#[derive(Clone)]
pub struct FuzzySearcher {
    matcher: Arc<SkimMatcherV2>,
}

impl Default for FuzzySearcher {
    fn default() -> Self {
        Self {
            matcher: Arc::new(SkimMatcherV2::default().ignore_case()),
        }
    }
}

impl std::fmt::Debug for FuzzySearcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FuzzySearcher").finish_non_exhaustive()
    }
}

impl FuzzySearcher {
    /// Creates a searcher with the default skim scoring.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Match score of `pattern` in `choice`, `None` when it does not match.
    #[must_use]
    pub fn score(&self, choice: &str, pattern: &str) -> Option<i64> {
        self.matcher.fuzzy_match(choice, pattern)
    }

    /// Indices of `labels` matching `pattern`, best match first.
    ///
    /// A blank pattern keeps every label in its original order.
    #[must_use]
    pub fn rank<S: AsRef<str>>(&self, labels: &[S], pattern: &str) -> Vec<usize> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return (0..labels.len()).collect();
        }

        let mut scored: Vec<(usize, i64)> = labels
            .iter()
            .enumerate()
            .filter_map(|(i, label)| self.score(label.as_ref(), pattern).map(|s| (i, s)))
            .collect();
        scored.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        scored.into_iter().map(|(i, _)| i).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_pattern_keeps_order() {
        let searcher = FuzzySearcher::new();
        let labels = ["Booked", "Declined", "No answer"];

        assert_eq!(searcher.rank(&labels, "  "), vec![0, 1, 2]);
    }

    #[test]
    fn test_rank_filters_and_orders() {
        let searcher = FuzzySearcher::new();
        let labels = [
            "[C1] - Ann Smith - ann@mail.com",
            "[C2] - Bob Jones",
            "[C3] - Smithers",
        ];

        let ranked = searcher.rank(&labels, "smith");

        assert_eq!(ranked.len(), 2);
        assert!(ranked.contains(&0));
        assert!(ranked.contains(&2));
        assert!(!ranked.contains(&1));
    }
}
