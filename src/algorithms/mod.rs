//! Implementation of search algorithms.
//!
//! These algorithms do path-finding over implicit state spaces described by
//! caller-supplied closures.

pub mod greedy;
