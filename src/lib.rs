//! Greedy best-first search over implicit, possibly infinite, state spaces.
//!
//! Callers describe the space with a start state and three closures: a
//! heuristic distance, a goal predicate, and a neighbour operator. See
//! [`search()`] and [`algorithms::greedy::GreedySearch`].

use shadow_rs::shadow;

shadow!(build);

// Search space
// ------------
pub mod distance;
pub mod space;

// Search internals
// ----------------
pub mod frontier;
pub mod search;
pub mod visited;

// Algorithms
// ----------
pub mod algorithms;

// Problems
// --------
pub mod problems;

pub use algorithms::greedy::search;
