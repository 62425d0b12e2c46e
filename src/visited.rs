use rustc_hash::FxHashSet;

use crate::space::State;

/// States generated so far.
///
/// States are marked when they are generated, not when they are expanded, so
/// the first path found to a state is the only one ever considered.
#[derive(Debug)]
pub struct VisitedSet<St>
where
    St: State,
{
    states: FxHashSet<St>,
}

impl<St> VisitedSet<St>
where
    St: State,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            states: FxHashSet::default(),
        }
    }

    #[inline(always)]
    #[must_use]
    pub fn contains(&self, s: &St) -> bool {
        self.states.contains(s)
    }

    /// Marks a state.
    ///
    /// Returns whether the state was new.
    #[inline(always)]
    pub fn insert(&mut self, s: St) -> bool {
        self.states.insert(s)
    }

    pub fn insert_all<I>(&mut self, states: I)
    where
        I: IntoIterator<Item = St>,
    {
        self.states.extend(states);
    }

    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
    #[inline(always)]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.states.capacity()
    }
}

impl<St> Default for VisitedSet<St>
where
    St: State,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_reports_novelty() {
        let mut v = VisitedSet::new();
        assert!(v.insert(3));
        assert!(!v.insert(3));
        assert!(v.contains(&3));
        assert!(!v.contains(&4));
        assert_eq!(v.len(), 1);
    }

    #[test]
    fn insert_all_collapses_duplicates() {
        let mut v = VisitedSet::new();
        v.insert_all(["a", "b", "a", "c"]);
        assert_eq!(v.len(), 3);
        assert!(v.contains(&"a"));
        assert!(v.contains(&"c"));
        assert!(!v.is_empty());
    }
}
