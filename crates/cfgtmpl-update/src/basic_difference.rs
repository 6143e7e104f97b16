//! Set difference over plain ids

use indexmap::IndexSet;
use std::hash::Hash;

/// Added / removed / common elements between two lists
///
/// Duplicates are collapsed; each result keeps first-seen order.
#[derive(Debug, Clone)]
pub struct BasicDifference<T: Eq + Hash + Clone> {
    before: IndexSet<T>,
    after: IndexSet<T>,
}

impl<T: Eq + Hash + Clone> BasicDifference<T> {
    #[must_use]
    pub fn new(before: impl IntoIterator<Item = T>, after: impl IntoIterator<Item = T>) -> Self {
        Self {
            before: before.into_iter().collect(),
            after: after.into_iter().collect(),
        }
    }

    /// In `after` only
    #[must_use]
    pub fn added(&self) -> Vec<T> {
        self.after.difference(&self.before).cloned().collect()
    }

    /// In `before` only
    #[must_use]
    pub fn removed(&self) -> Vec<T> {
        self.before.difference(&self.after).cloned().collect()
    }

    /// In both
    #[must_use]
    pub fn common(&self) -> Vec<T> {
        self.before.intersection(&self.after).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn added_removed_common() {
        let diff = BasicDifference::new(vec![1, 2, 3], vec![3, 4, 1, 5]);
        assert_eq!(diff.added(), vec![4, 5]);
        assert_eq!(diff.removed(), vec![2]);
        assert_eq!(diff.common(), vec![1, 3]);
    }

    #[test]
    fn duplicates_collapse() {
        let diff = BasicDifference::new(vec![1, 1], vec![2, 2, 1]);
        assert_eq!(diff.added(), vec![2]);
        assert!(diff.removed().is_empty());
    }

    #[test]
    fn empty_inputs() {
        let diff = BasicDifference::<i64>::new(vec![], vec![]);
        assert!(diff.added().is_empty());
        assert!(diff.removed().is_empty());
        assert!(diff.common().is_empty());
    }
}
