use std::fmt::Debug;

use crate::distance::Distance;
use crate::frontier::Frontier;
use crate::frontier::GreedyRank;
use crate::search::SearchTree;
use crate::search::SearchTreeIndex;
use crate::search::SearchTreeNode;
use crate::space::Path;
use crate::space::State;
use crate::visited::VisitedSet;

/// Counters describing a search so far.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes created, the start included.
    pub generated: usize,
    /// Nodes whose neighbours were requested.
    pub expanded: usize,
    /// Nodes waiting in the Frontier.
    pub frontier: usize,
    /// Distinct states seen.
    pub visited: usize,
}

impl std::fmt::Display for SearchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use thousands::Separable;

        write!(
            f,
            "generated={} expanded={} frontier={} visited={}",
            self.generated.separate_with_commas(),
            self.expanded.separate_with_commas(),
            self.frontier.separate_with_commas(),
            self.visited.separate_with_commas(),
        )
    }
}

/// Greedy best-first search.
///
/// Always expands the node that looks closest to a goal according to
/// `|distance(state)|`, breaking ties towards shallower nodes. States are
/// marked visited as soon as they are generated, so the first path found to a
/// state is final.
///
/// This is not A*. Paths are not guaranteed to be the shortest, only to be
/// valid.
///
/// The search has no step limit. Bound it through `neighbours` (for example by
/// returning nothing past some depth) or by running it where it can be
/// cancelled.
pub struct GreedySearch<St, D, G, N>
where
    St: State,
{
    /// All the Search Nodes.
    search_tree: SearchTree<St>,

    /// Generated nodes that haven't been expanded yet.
    frontier: Frontier,

    /// Every state that got a node, including the start.
    visited: VisitedSet<St>,

    /// The last goal returned, which still needs expanding if the search
    /// resumes.
    pending_expansion: Option<SearchTreeIndex>,
    expanded: usize,

    distance: D,
    goal: G,
    neighbours: N,
}

impl<St, D, G, N, I> GreedySearch<St, D, G, N>
where
    St: State,
    D: FnMut(&St) -> f64,
    G: FnMut(&St) -> bool,
    N: FnMut(&St) -> I,
    I: IntoIterator<Item = St>,
{
    /// Seeds a search from `initial`.
    ///
    /// Only `distance` is called here, once for the start state.
    #[must_use]
    pub fn new(initial: St, mut distance: D, goal: G, neighbours: N) -> Self {
        let d = Distance::new(distance(&initial));

        let mut search = Self {
            search_tree: SearchTree::new(),
            frontier: Frontier::new(),
            visited: VisitedSet::new(),
            pending_expansion: None,
            expanded: 0usize,

            distance,
            goal,
            neighbours,
        };

        search.visited.insert(initial.clone());
        let root = search.search_tree.push(SearchTreeNode::new_root(initial, d));
        search.frontier.push(GreedyRank::new(d, 0usize), root);

        search
    }

    /// Finds the path to the next goal.
    ///
    /// The first call returns the first goal reached. Later calls resume the
    /// search from where it stopped and return the next goal state reached,
    /// along the path it was first generated through.
    ///
    /// Returns `None` once every reachable state was expanded.
    #[must_use]
    pub fn find_next_goal(&mut self) -> Option<Path<St>> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("FindNextGoal");

        if let Some(node_index) = self.pending_expansion.take() {
            self.expand(node_index);
        }

        while let Some(node_index) = self.frontier.pop() {
            #[cfg(feature = "coz_profile")]
            coz::scope!("NodeExpansion");

            // Goal check before expanding so `neighbours` is never called on
            // goals, the start state included.
            if (self.goal)(self.search_tree[node_index].state()) {
                #[cfg(feature = "coz_profile")]
                coz::progress!("GoalFound");

                let path = self.search_tree.path(node_index);
                log::debug!("Found goal at depth {}. {}", path.steps(), self.stats());
                self.pending_expansion = Some(node_index);
                return Some(path);
            }

            self.expand(node_index);
        }

        log::debug!("Frontier exhausted. {}", self.stats());
        None
    }

    /// Generates the unseen neighbours of a node and queues them.
    fn expand(&mut self, node_index: SearchTreeIndex) {
        self.expanded += 1;

        let node = &self.search_tree[node_index];
        let depth = node.depth();
        log::trace!(
            "Expanding {:?} (distance={}, depth={})",
            node.state(),
            node.distance(),
            depth
        );

        let neighbours = (self.neighbours)(node.state());
        for s in neighbours {
            #[cfg(feature = "coz_profile")]
            coz::scope!("ReachNode");

            // Marking here, before queueing, also drops duplicates within a
            // single expansion.
            if self.visited.contains(&s) {
                continue;
            }
            self.visited.insert(s.clone());

            let d = Distance::new((self.distance)(&s));
            let child = self
                .search_tree
                .push(SearchTreeNode::new_child(s, d, node_index, depth));
            self.frontier.push(GreedyRank::new(d, depth + 1), child);
        }
    }
}

impl<St, D, G, N> GreedySearch<St, D, G, N>
where
    St: State,
{
    #[must_use]
    pub fn stats(&self) -> SearchStats {
        SearchStats {
            generated: self.search_tree.len(),
            expanded: self.expanded,
            frontier: self.frontier.len(),
            visited: self.visited.len(),
        }
    }

    #[cfg(feature = "inspect")]
    pub fn search_tree(&self) -> &SearchTree<St> {
        &self.search_tree
    }
    #[cfg(feature = "inspect")]
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }
    #[cfg(feature = "inspect")]
    pub fn visited(&self) -> &VisitedSet<St> {
        &self.visited
    }

    pub fn write_memory_stats<W: std::io::Write>(&self, mut out: W) -> std::io::Result<()> {
        use size::Size;
        use std::mem::size_of;
        use thousands::Separable;

        writeln!(out, "GreedySearch Stats:")?;
        let s = size_of::<SearchTreeNode<St>>();
        let l = self.search_tree.len();
        let c = self.search_tree.capacity();
        writeln!(
            out,
            "  - |Nodes|:    {} ({})",
            l.separate_with_commas(),
            Size::from_bytes(l * s)
        )?;
        writeln!(
            out,
            "  - |Nodes|*:   {} ({})",
            c.separate_with_commas(),
            Size::from_bytes(c * s)
        )?;

        let s = size_of::<crate::frontier::FrontierEntry>();
        let l = self.frontier.len();
        let c = self.frontier.capacity();
        writeln!(
            out,
            "  - |Open|:     {} ({})",
            l.separate_with_commas(),
            Size::from_bytes(l * s)
        )?;
        writeln!(
            out,
            "  - |Open|*:    {} ({})",
            c.separate_with_commas(),
            Size::from_bytes(c * s)
        )?;

        let s = size_of::<St>();
        let l = self.visited.len();
        let c = self.visited.capacity();
        writeln!(
            out,
            "  - |Visited|:  {} ({})",
            l.separate_with_commas(),
            Size::from_bytes(l * s)
        )?;
        writeln!(
            out,
            "  - |Visited|*: {} ({})",
            c.separate_with_commas(),
            Size::from_bytes(c * s)
        )?;

        writeln!(
            out,
            "  - Expanded nodes: {}",
            self.expanded.separate_with_commas()
        )?;

        Ok(())
    }

    pub fn print_memory_stats(&self) -> std::io::Result<()> {
        self.write_memory_stats(std::io::stdout().lock())
    }
}

impl<St, D, G, N> Debug for GreedySearch<St, D, G, N>
where
    St: State,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("GreedySearch")
            .field("search_tree", &self.search_tree)
            .field("frontier", &self.frontier.len())
            .field("visited", &self.visited.len())
            .field("expanded", &self.expanded)
            .finish()
    }
}

impl<St, D, G, N, I> Iterator for GreedySearch<St, D, G, N>
where
    St: State,
    D: FnMut(&St) -> f64,
    G: FnMut(&St) -> bool,
    N: FnMut(&St) -> I,
    I: IntoIterator<Item = St>,
{
    type Item = Path<St>;
    fn next(&mut self) -> Option<Self::Item> {
        self.find_next_goal()
    }
}

/// Finds a path from `initial` to a state satisfying `goal`.
///
/// Runs a [`GreedySearch`] until its first goal. Returns the states from
/// `initial` to the goal, both included, or `None` if every state reachable
/// from `initial` was tried without success.
///
/// `neighbours` may return any iterable of states, duplicates and already
/// seen states are skipped. It is never called on a goal state.
///
/// ```
/// use greedy_search::search;
///
/// let path = search(
///     0i64,
///     |x| (x - 7) as f64,
///     |x| *x == 7,
///     |x| [x + 1, x - 1],
/// );
/// assert_eq!(path, Some((0..=7).collect::<Vec<_>>()));
/// ```
pub fn search<St, D, G, N, I>(initial: St, distance: D, goal: G, neighbours: N) -> Option<Vec<St>>
where
    St: State,
    D: FnMut(&St) -> f64,
    G: FnMut(&St) -> bool,
    N: FnMut(&St) -> I,
    I: IntoIterator<Item = St>,
{
    GreedySearch::new(initial, distance, goal, neighbours)
        .find_next_goal()
        .map(Path::into_states)
}
