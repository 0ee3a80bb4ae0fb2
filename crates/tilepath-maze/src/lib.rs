//! **tilepath-maze** — maze generation for the *tilepath* workspace.
//!
//! Provides the randomized-backtracker generator ([`Backtracker`]), which
//! carves a perfect maze into a [`tilepath_core::Grid`] through the
//! [`MazeGenerator`] seam driven by
//! [`tilepath_search::SearchContext::run_maze`].

mod backtracker;

pub use backtracker::Backtracker;
pub use tilepath_search::MazeGenerator;
