//! Search problems built on top of the engine.
//!
//! These supply the state type, neighbour operator and heuristic that a
//! search consumes. The engine knows nothing about them.

pub mod sliding_tiles;
