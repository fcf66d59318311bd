//! Cross-sectional stock selection.
//!
//! Ranks a score vector and takes the top percentile. Ties keep their
//! panel order, so a rerun over the same panel always selects the same
//! names.

use levante_traits::RankDirection;

/// Number of names a `top_pct` selection takes from a universe of `n`.
///
/// Rounds up, so any positive percentage of a non-empty universe selects
/// at least one name.
#[must_use]
pub fn selection_count(n: usize, top_pct: usize) -> usize {
    (n as f64 * (top_pct as f64 / 100.0)).ceil() as usize
}

/// Indices of the top `top_pct` percent of `scores`, best first.
///
/// `direction` decides what "best" means: [`RankDirection::Descending`]
/// takes the highest scores, [`RankDirection::Ascending`] the lowest.
/// The sort is stable, so equal scores resolve to the earlier index.
#[must_use]
pub fn select_top(scores: &[f64], direction: RankDirection, top_pct: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| match direction {
        RankDirection::Ascending => scores[a].total_cmp(&scores[b]),
        RankDirection::Descending => scores[b].total_cmp(&scores[a]),
    });
    order.truncate(selection_count(scores.len(), top_pct));
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_rounds_up() {
        assert_eq!(selection_count(5, 40), 2);
        assert_eq!(selection_count(5, 50), 3);
        assert_eq!(selection_count(4, 50), 2);
        assert_eq!(selection_count(1, 1), 1);
        assert_eq!(selection_count(10, 100), 10);
        assert_eq!(selection_count(3, 0), 0);
    }

    #[test]
    fn test_descending_takes_highest() {
        let scores = [1.0, 5.0, -2.0, 3.0];
        let picked = select_top(&scores, RankDirection::Descending, 50);
        assert_eq!(picked, vec![1, 3]);
    }

    #[test]
    fn test_ascending_takes_lowest() {
        let scores = [1.0, 5.0, -2.0, 3.0];
        let picked = select_top(&scores, RankDirection::Ascending, 50);
        assert_eq!(picked, vec![2, 0]);
    }

    #[test]
    fn test_ties_keep_earlier_index_first() {
        let scores = [2.0, 2.0, 2.0, 2.0];
        let picked = select_top(&scores, RankDirection::Descending, 50);
        assert_eq!(picked, vec![0, 1]);
        let picked = select_top(&scores, RankDirection::Ascending, 75);
        assert_eq!(picked, vec![0, 1, 2]);
    }

    #[test]
    fn test_full_percentile_takes_everything() {
        let scores = [0.5, -0.5, 0.0];
        let picked = select_top(&scores, RankDirection::Ascending, 100);
        assert_eq!(picked.len(), 3);
        assert_eq!(picked, vec![1, 2, 0]);
    }

    #[test]
    fn test_zero_percent_selects_nothing() {
        let scores = [1.0, 2.0];
        assert!(select_top(&scores, RankDirection::Descending, 0).is_empty());
    }
}
