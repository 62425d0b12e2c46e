use std::fmt::Debug;
use std::hash::Hash;

/// A point in the search space.
///
/// States are opaque to the search. They only need value equality and a
/// stable hash so they can be deduplicated, and `Clone` so the search tree and
/// the visited set can each keep their own copy.
pub trait State: Clone + Debug + Eq + Hash {}
impl<T> State for T where T: Clone + Debug + Eq + Hash {}

/// A sequence of states from a start to a goal, both included.
///
/// Consecutive states are related by one application of the neighbour
/// operator that produced them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path<St>
where
    St: State,
{
    states: Vec<St>,
}

impl<St> Path<St>
where
    St: State,
{
    /// Wraps states ordered from start to goal.
    #[inline(always)]
    pub(crate) fn from_states(states: Vec<St>) -> Self {
        debug_assert!(!states.is_empty(), "Paths have at least the start state");
        Self { states }
    }

    #[inline(always)]
    #[must_use]
    pub fn start(&self) -> Option<&St> {
        self.states.first()
    }

    #[inline(always)]
    #[must_use]
    pub fn end(&self) -> Option<&St> {
        self.states.last()
    }

    /// Number of states on the path.
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

    /// Number of edges traversed, that is, the depth of the goal.
    #[inline(always)]
    #[must_use]
    pub fn steps(&self) -> usize {
        self.states.len().saturating_sub(1)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, St> {
        self.states.iter()
    }

    #[must_use]
    pub fn into_states(self) -> Vec<St> {
        self.states
    }
}

impl<St> AsRef<[St]> for Path<St>
where
    St: State,
{
    fn as_ref(&self) -> &[St] {
        &self.states
    }
}

impl<St> IntoIterator for Path<St>
where
    St: State,
{
    type Item = St;
    type IntoIter = std::vec::IntoIter<St>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.into_iter()
    }
}

impl<'a, St> IntoIterator for &'a Path<St>
where
    St: State,
{
    type Item = &'a St;
    type IntoIter = std::slice::Iter<'a, St>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}

impl<St> std::fmt::Display for Path<St>
where
    St: State,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match (self.start(), self.end()) {
            (Some(start), Some(end)) => {
                write!(
                    f,
                    "Path({}, {:?}:{:?}:{:?})",
                    self.steps(),
                    start,
                    self.states.iter().take(20).collect::<Vec<_>>(),
                    end
                )
            }
            _ => write!(f, "Path()"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_state_path() {
        let p = Path::from_states(vec![0i32]);
        assert_eq!(p.start(), Some(&0));
        assert_eq!(p.end(), Some(&0));
        assert_eq!(p.len(), 1);
        assert_eq!(p.steps(), 0);
    }

    #[test]
    fn steps_count_edges() {
        let p = Path::from_states(vec!['a', 'b', 'c']);
        assert_eq!(p.len(), 3);
        assert_eq!(p.steps(), 2);
        assert_eq!(p.iter().copied().collect::<String>(), "abc");
        assert_eq!(p.into_states(), vec!['a', 'b', 'c']);
    }

    #[test]
    fn display_mentions_endpoints() {
        let p = Path::from_states(vec![1u8, 2u8, 3u8]);
        assert_eq!(p.to_string(), "Path(2, 1:[1, 2, 3]:3)");
    }
}
