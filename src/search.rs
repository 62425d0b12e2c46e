use nonmax::NonMaxUsize;

use crate::distance::Distance;
use crate::space::Path;
use crate::space::State;

/// A reference to a `SearchTreeNode<St>`.
///
/// Nodes are never removed from the `SearchTree`, so indices stay valid for
/// the whole search. `NonMaxUsize` makes `Option<SearchTreeIndex>` as wide as
/// a `usize`, which keeps parent links free.
///
/// Indices are handed out in creation order, so they also tell which of two
/// nodes was generated first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchTreeIndex {
    index: NonMaxUsize,
}

impl SearchTreeIndex {
    #[inline(always)]
    fn new(index: usize) -> Self {
        debug_assert!(index != usize::MAX);
        // SAFETY: Indices come from `Vec::len()` over a non-zero-sized type,
        // which is bounded by `isize::MAX`.
        let index = unsafe { NonMaxUsize::new_unchecked(index) };
        Self { index }
    }

    #[inline(always)]
    #[must_use]
    pub fn get(&self) -> usize {
        self.index.get()
    }
}

/// A state as reached by the search.
///
/// Immutable once built. The heuristic `distance` is computed once, when the
/// state is first generated.
#[derive(Debug)]
#[cfg_attr(feature = "inspect", derive(Clone))]
pub struct SearchTreeNode<St>
where
    St: State,
{
    pub(crate) parent: Option<SearchTreeIndex>,
    pub(crate) state: St,
    pub(crate) distance: Distance,
    pub(crate) depth: usize,
}

impl<St> SearchTreeNode<St>
where
    St: State,
{
    /// The start node.
    pub fn new_root(state: St, distance: Distance) -> Self {
        Self {
            parent: None,
            state,
            distance,
            depth: 0usize,
        }
    }

    /// A node one step away from `parent`, which is at `parent_depth`.
    pub fn new_child(
        state: St,
        distance: Distance,
        parent: SearchTreeIndex,
        parent_depth: usize,
    ) -> Self {
        Self {
            parent: Some(parent),
            state,
            distance,
            depth: parent_depth + 1,
        }
    }

    #[inline(always)]
    pub fn state(&self) -> &St {
        &self.state
    }
    #[inline(always)]
    pub fn distance(&self) -> Distance {
        self.distance
    }
    #[inline(always)]
    pub fn depth(&self) -> usize {
        self.depth
    }
    #[inline(always)]
    pub fn parent(&self) -> Option<SearchTreeIndex> {
        self.parent
    }
    #[inline(always)]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// All the nodes created by a search.
///
/// An append-only arena. Children point at their parents by index, so many
/// siblings can share a parent and the whole tree is released at once when
/// the search is dropped.
pub struct SearchTree<St>
where
    St: State,
{
    nodes: Vec<SearchTreeNode<St>>,
}

impl<St> SearchTree<St>
where
    St: State,
{
    #[inline(always)]
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: vec![] }
    }

    #[inline(always)]
    pub fn push(&mut self, node: SearchTreeNode<St>) -> SearchTreeIndex {
        debug_assert!(
            node.parent.is_some() || self.nodes.is_empty(),
            "Only the first node may be a root"
        );
        debug_assert!(
            node.parent
                .is_none_or(|p| self.nodes[p.get()].depth + 1 == node.depth),
            "Children must be one level below their parent"
        );

        let index = SearchTreeIndex::new(self.nodes.len());
        self.nodes.push(node);
        index
    }

    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline(always)]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Reconstructs the path from the root to `node_index`.
    ///
    /// Walks the parent links back to the root and reverses them. The result
    /// holds `depth + 1` states.
    #[must_use]
    pub fn path(&self, mut node_index: SearchTreeIndex) -> Path<St> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("PathReconstruction");

        let goal = &self[node_index];
        let mut states = Vec::with_capacity(goal.depth + 1);
        states.push(goal.state.clone());

        while let Some(parent_index) = self[node_index].parent {
            debug_assert!(parent_index < node_index, "Parents are created first");
            let parent = &self[parent_index];
            debug_assert_eq!(parent.depth + 1, self[node_index].depth);

            states.push(parent.state.clone());
            node_index = parent_index;
        }
        debug_assert_eq!(states.len(), goal.depth + 1);

        states.reverse();
        Path::from_states(states)
    }
}

impl<St> Default for SearchTree<St>
where
    St: State,
{
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<St> std::ops::Index<SearchTreeIndex> for SearchTree<St>
where
    St: State,
{
    type Output = SearchTreeNode<St>;

    #[inline(always)]
    fn index(&self, index: SearchTreeIndex) -> &Self::Output {
        &self.nodes[index.get()]
    }
}

impl<St> std::fmt::Debug for SearchTree<St>
where
    St: State,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "SearchTree{{({} nodes)}}", self.len())
    }
}
