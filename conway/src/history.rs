// history.rs - Bounded most-recent-first buffer of past generations

use std::collections::VecDeque;

use crate::grid::SparseGrid;

/// Keeps the last `limit` alive-sets, newest at the front.
#[derive(Debug, Clone)]
pub struct HistoryRing {
    entries: VecDeque<SparseGrid>,
    limit: usize,
}

impl HistoryRing {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit,
        }
    }

    /// Pushes to the front and evicts from the tail past `limit`.
    pub fn push(&mut self, grid: SparseGrid) {
        self.entries.push_front(grid);
        self.entries.truncate(self.limit);
    }

    /// True if `grid` equals any remembered generation.
    pub fn contains(&self, grid: &SparseGrid) -> bool {
        self.entries.iter().any(|past| past == grid)
    }

    pub fn latest(&self) -> Option<&SparseGrid> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SparseGrid> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(x: i32) -> SparseGrid {
        [(x, 0)].into_iter().collect()
    }

    #[test]
    fn evicts_oldest_past_limit() {
        let mut history = HistoryRing::new(3);
        for x in 0..5 {
            history.push(single(x));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.latest(), Some(&single(4)));
        assert!(history.contains(&single(2)));
        assert!(!history.contains(&single(1)));
        let order: Vec<_> = history.iter().cloned().collect();
        assert_eq!(order, vec![single(4), single(3), single(2)]);
    }

    #[test]
    fn zero_limit_remembers_nothing() {
        let mut history = HistoryRing::new(0);
        history.push(single(0));
        assert!(history.is_empty());
        assert!(!history.contains(&single(0)));
    }

    #[test]
    fn unbounded_limit_allocates_lazily() {
        let mut history = HistoryRing::new(usize::MAX);
        history.push(single(0));
        history.push(single(1));
        assert_eq!(history.len(), 2);
        assert_eq!(history.limit(), usize::MAX);
    }

    #[test]
    fn comparison_is_set_equality() {
        let mut history = HistoryRing::new(2);
        history.push([(0, 0), (1, 0)].into_iter().collect());
        assert!(history.contains(&[(1, 0), (0, 0)].into_iter().collect()));
        history.clear();
        assert!(history.is_empty());
    }
}
