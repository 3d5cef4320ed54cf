// ==========================================
// Vegetation Cut - cut priority sorter
// ==========================================
// Input: (area, DerivedStatus) pairs
// Output: same pairs, most days since cut first
// ==========================================
// Ties keep input order (stable sort) so reports are reproducible
// ==========================================

use crate::domain::cut::DerivedStatus;
use std::cmp::Ordering;

// ==========================================
// PrioritySorter
// ==========================================
pub struct PrioritySorter {
    // stateless, no dependencies
}

impl PrioritySorter {
    pub fn new() -> Self {
        Self {}
    }

    /// Sort descending by `days_since_cut`, ties in original order
    pub fn rank_by_priority<T>(&self, mut statuses: Vec<(T, DerivedStatus)>) -> Vec<(T, DerivedStatus)> {
        // Vec::sort_by is stable
        statuses.sort_by(|a, b| self.compare(&a.1, &b.1));
        statuses
    }

    /// Keep only entries with at least `min_days` since the cut
    pub fn filter_min_days<T>(
        &self,
        statuses: Vec<(T, DerivedStatus)>,
        min_days: i64,
    ) -> Vec<(T, DerivedStatus)> {
        statuses
            .into_iter()
            .filter(|(_, status)| status.days_since_cut >= min_days)
            .collect()
    }

    fn compare(&self, a: &DerivedStatus, b: &DerivedStatus) -> Ordering {
        b.days_since_cut.cmp(&a.days_since_cut)
    }
}

impl Default for PrioritySorter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{CutStatus, Period};

    fn status(days: i64) -> DerivedStatus {
        DerivedStatus {
            days_since_cut: days,
            period: Period::Rainy,
            active_interval_days: 30,
            status: if days > 30 {
                CutStatus::Overdue
            } else {
                CutStatus::OnSchedule
            },
            color: "#000000".to_string(),
        }
    }

    #[test]
    fn test_rank_is_descending_and_stable() {
        let sorter = PrioritySorter::new();
        let input = vec![(1, status(10)), (2, status(30)), (3, status(30)), (4, status(5))];

        let ranked = sorter.rank_by_priority(input);
        let ids: Vec<u32> = ranked.iter().map(|(id, _)| *id).collect();

        assert_eq!(ids, vec![2, 3, 1, 4]);
    }

    #[test]
    fn test_rank_all_ties_keeps_input_order() {
        let sorter = PrioritySorter::new();
        let input: Vec<(u32, DerivedStatus)> = (1..=6).map(|id| (id, status(7))).collect();

        let ranked = sorter.rank_by_priority(input);
        let ids: Vec<u32> = ranked.iter().map(|(id, _)| *id).collect();

        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_rank_empty() {
        let sorter = PrioritySorter::new();
        let ranked: Vec<(u32, DerivedStatus)> = sorter.rank_by_priority(Vec::new());
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_rank_negative_days_last() {
        let sorter = PrioritySorter::new();
        let ranked = sorter.rank_by_priority(vec![(1, status(-2)), (2, status(0))]);
        assert_eq!(ranked[0].0, 2);
        assert_eq!(ranked[1].0, 1);
    }

    #[test]
    fn test_filter_min_days() {
        let sorter = PrioritySorter::new();
        let input = vec![(1, status(10)), (2, status(30)), (3, status(9))];

        let kept = sorter.filter_min_days(input, 10);
        let ids: Vec<u32> = kept.iter().map(|(id, _)| *id).collect();

        assert_eq!(ids, vec![1, 2]);
    }
}
