//! **tilepath-search** — interchangeable search strategies over a tile grid.
//!
//! This crate provides the traversal engine of the *tilepath* workspace:
//!
//! - **Neighbor policy** with diagonal corner-cutting rules ([`Neighbors`],
//!   [`NeighborConfig`])
//! - **Frontier**, one generic pending set covering priority, FIFO and
//!   LIFO disciplines ([`Frontier`])
//! - **Search engine** running A*, Dijkstra, Greedy best-first, BFS and
//!   DFS through a single state machine ([`search`], [`Algorithm`])
//! - **[`SearchContext`]**, the editing facade an input source drives
//!
//! All loops are iterative with explicit stacks; grid size never threatens
//! the call stack.

mod cancel;
mod context;
mod distance;
mod engine;
mod frontier;
mod neighbors;

pub use cancel::CancelToken;
pub use context::{MazeGenerator, SearchContext};
pub use distance::{chebyshev, euclidean, manhattan};
pub use engine::{Algorithm, SearchOutcome, UnknownAlgorithm, search};
pub use frontier::{Discipline, EmptyQueue, Frontier, SortKey};
pub use neighbors::{NeighborConfig, Neighbors};
