// The Frontier is an array-backed d-ary min-heap.
//
// ```text
//                 0
//       1      2      3      4
//    5 6 7 8  9 ...
// ```
//
// With arity `A` you can go up, to the first child and to the last child with,
//   - Up:          `(i-1) / A`
//   - First child: `(A*i) + 1`
//   - Last child:  `A*(i+1)`

use std::cmp::min;

use crate::distance::Distance;
use crate::search::SearchTreeIndex;

/// The ranking tuple for greedy best-first search.
///
/// We prefer states that look closer to a goal (`|distance|`), and tie break
/// for shallower, earlier-discovered ones.
///
/// ```
/// use greedy_search::distance::Distance;
/// use greedy_search::frontier::GreedyRank;
///
/// // Only the magnitude matters.
/// assert_eq!(
///     GreedyRank::new(Distance::new(-2.0), 3),
///     GreedyRank::new(Distance::new(2.0), 3),
/// );
/// // Closer goes first, regardless of depth.
/// assert!(GreedyRank::new(Distance::new(1.0), 9) < GreedyRank::new(Distance::new(2.0), 0));
/// // Shallower goes first on ties.
/// assert!(GreedyRank::new(Distance::new(2.0), 1) < GreedyRank::new(Distance::new(-2.0), 2));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GreedyRank {
    magnitude: Distance,
    depth: usize,
}

impl GreedyRank {
    #[inline(always)]
    #[must_use]
    pub fn new(distance: Distance, depth: usize) -> Self {
        Self {
            magnitude: distance.magnitude(),
            depth,
        }
    }

    #[inline(always)]
    pub fn magnitude(&self) -> Distance {
        self.magnitude
    }
    #[inline(always)]
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// An entry in the Frontier.
///
/// Ordered by rank, and then by node creation order. Nodes tied on both rank
/// keys come out first-in first-out.
// The derived `Ord` compares fields in declaration order, `rank` must stay
// before `node_index` for ties to come out first-in first-out.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct FrontierEntry {
    /// How promising the node is.
    pub rank: GreedyRank,
    /// The index of this node in the `SearchTree`.
    pub node_index: SearchTreeIndex,
}

const HEAP_ARITY: usize = 4usize;
#[inline(always)]
#[must_use]
fn up(i: usize) -> usize {
    (i - 1) / HEAP_ARITY
}
#[inline(always)]
#[must_use]
fn first_child(i: usize) -> usize {
    (HEAP_ARITY * i) + 1
}

/// Index of the smallest element of a non-empty slice.
#[inline(always)]
#[must_use]
fn min_index<T: Ord>(xs: &[T]) -> usize {
    debug_assert!(!xs.is_empty());

    let mut min_i = 0;
    for (i, x) in xs.iter().enumerate().skip(1) {
        if *x < xs[min_i] {
            min_i = i;
        }
    }
    min_i
}

/// Nodes generated but not yet expanded.
///
/// A min-heap over `FrontierEntry`, so `pop()` yields the most promising node.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: Vec<FrontierEntry>,
}

impl Frontier {
    #[must_use]
    pub fn new() -> Self {
        Self { heap: vec![] }
    }

    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
    #[inline(always)]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.heap.capacity()
    }

    pub fn push(&mut self, rank: GreedyRank, node_index: SearchTreeIndex) {
        #[cfg(feature = "coz_profile")]
        coz::scope!("FrontierPush");

        self.heap.push(FrontierEntry { rank, node_index });
        self.sift_up(self.heap.len() - 1);

        self.verify_heap();
    }

    /// Removes the best entry.
    pub fn pop(&mut self) -> Option<SearchTreeIndex> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("FrontierPop");

        let last = self.heap.pop()?;
        if self.heap.is_empty() {
            return Some(last.node_index);
        }

        let top = std::mem::replace(&mut self.heap[0], last);
        self.sift_down(0);

        self.verify_heap();
        Some(top.node_index)
    }

    /// Raises a node.
    /// Returns its new index.
    #[inline(always)]
    fn sift_up(&mut self, mut pos: usize) -> usize {
        debug_assert!(pos < self.heap.len(), "Index out of bounds");

        while pos > 0 {
            let parent = up(pos);
            if self.heap[parent] <= self.heap[pos] {
                break;
            }
            self.heap.swap(parent, pos);
            pos = parent;
        }
        pos
    }

    /// Lowers a node.
    /// Returns its new index.
    #[inline(always)]
    fn sift_down(&mut self, mut pos: usize) -> usize {
        let len = self.heap.len();
        debug_assert!(pos < len, "Index out of bounds");

        loop {
            let mut child = first_child(pos);
            if child >= len {
                break;
            }
            child += min_index(&self.heap[child..min(child + HEAP_ARITY, len)]);

            if self.heap[pos] <= self.heap[child] {
                break;
            }
            self.heap.swap(pos, child);
            pos = child;
        }
        pos
    }

    #[inline(always)]
    #[cfg(not(feature = "verify"))]
    pub(crate) fn verify_heap(&self) {
        // All good... (hopefully)
    }
    #[inline(always)]
    #[cfg(feature = "verify")]
    pub(crate) fn verify_heap(&self) {
        // Every entry goes after its parent entry, if any.
        for i in 1..self.heap.len() {
            let p = up(i);
            debug_assert!(
                self.heap[p] <= self.heap[i],
                "Entry[{p}]={:?} !<= child [{i}]={:?}. Out of heap of len={}",
                self.heap[p],
                self.heap[i],
                self.heap.len(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchTree;
    use crate::search::SearchTreeNode;

    /// A tree with `n` nodes to hand out indices.
    fn indices(n: usize) -> Vec<SearchTreeIndex> {
        let mut tree = SearchTree::new();
        let root = tree.push(SearchTreeNode::new_root(0usize, Distance::zero()));
        let mut v = vec![root];
        for i in 1..n {
            v.push(tree.push(SearchTreeNode::new_child(i, Distance::zero(), root, 0)));
        }
        v
    }

    fn rank(d: f64, depth: usize) -> GreedyRank {
        GreedyRank::new(Distance::new(d), depth)
    }

    #[test]
    fn ranking() {
        // Magnitude first.
        assert!(rank(0.0, 5) < rank(1.0, 0));
        assert!(rank(-1.0, 5) < rank(2.0, 0));
        assert!(rank(-3.0, 0) > rank(2.0, 0));

        // Same magnitude, needs tie-breaking on depth
        let shallow = rank(4.0, 1);
        let deep = rank(-4.0, 2);
        assert!(shallow < deep);
        assert!(shallow.magnitude() == deep.magnitude());
        assert!(shallow.depth() < deep.depth());
    }

    #[test]
    fn empty() {
        let mut f = Frontier::new();
        assert!(f.is_empty());
        assert_eq!(f.pop(), None);
    }

    #[test]
    fn pops_in_rank_order() {
        let ix = indices(10);
        let distances = [5.0, -1.0, 3.0, 0.5, -4.0, 2.0, 7.0, -0.25, 6.0, 1.5];
        let mut f = Frontier::new();
        for (i, d) in distances.iter().enumerate() {
            f.push(rank(*d, 1), ix[i]);
        }
        assert_eq!(f.len(), 10);

        let mut popped = vec![];
        while let Some(i) = f.pop() {
            popped.push(distances[i.get()].abs());
        }
        let mut sorted = popped.clone();
        sorted.sort_by(f64::total_cmp);
        assert_eq!(popped, sorted);
        assert!(f.is_empty());
    }

    #[test]
    fn shallower_first_on_ties() {
        let ix = indices(3);
        let mut f = Frontier::new();
        f.push(rank(2.0, 3), ix[0]);
        f.push(rank(-2.0, 1), ix[1]);
        f.push(rank(2.0, 2), ix[2]);

        assert_eq!(f.pop(), Some(ix[1]));
        assert_eq!(f.pop(), Some(ix[2]));
        assert_eq!(f.pop(), Some(ix[0]));
    }

    #[test]
    fn exact_ties_come_out_in_creation_order() {
        let ix = indices(20);
        let mut f = Frontier::new();
        for i in ix.iter().rev() {
            f.push(rank(1.0, 1), *i);
        }
        for i in &ix {
            assert_eq!(f.pop(), Some(*i));
        }
    }

    #[test]
    fn entries_order_by_rank_then_creation() {
        let ix = indices(2);
        let entry = |d, depth, i: usize| FrontierEntry {
            rank: rank(d, depth),
            node_index: ix[i],
        };
        // Rank decides before creation order.
        assert!(entry(1.0, 1, 1) < entry(2.0, 1, 0));
        assert!(entry(1.0, 1, 1) < entry(1.0, 2, 0));
        // Creation order only breaks exact rank ties.
        assert!(entry(1.0, 1, 0) < entry(-1.0, 1, 1));
    }

    #[test]
    fn interleaved_push_pop() {
        let ix = indices(5);
        let mut f = Frontier::new();
        f.push(rank(3.0, 0), ix[0]);
        f.push(rank(1.0, 1), ix[1]);
        assert_eq!(f.pop(), Some(ix[1]));
        f.push(rank(2.0, 2), ix[2]);
        f.push(rank(5.0, 2), ix[3]);
        assert_eq!(f.pop(), Some(ix[2]));
        f.push(rank(0.0, 3), ix[4]);
        assert_eq!(f.pop(), Some(ix[4]));
        assert_eq!(f.pop(), Some(ix[0]));
        assert_eq!(f.pop(), Some(ix[3]));
        assert_eq!(f.pop(), None);
        assert!(f.is_empty());
    }

    #[test]
    fn min_index_finds_first_minimum() {
        assert_eq!(min_index(&[3u8]), 0);
        assert_eq!(min_index(&[3u8, 1u8, 2u8, 1u8]), 1);
        assert_eq!(min_index(&[0u8, 1u8, 0u8]), 0);
    }
}
