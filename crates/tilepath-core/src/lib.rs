//! **tilepath-core** — tile grid model for the *tilepath* pathfinding engine.
//!
//! This crate provides the foundational types shared across the tilepath
//! workspace: geometry primitives, the [`Tile`] cell model with its
//! orthogonal role and visit-state enums, the owning [`Grid`], and the
//! [`GridWatcher`] observer seam through which renderers receive
//! tile-state change notifications.

pub mod geom;
pub mod grid;
pub mod tile;
pub mod watch;

pub use geom::{Point, Range};
pub use grid::Grid;
pub use tile::{Role, Tile, VisitState};
pub use watch::{GridWatcher, RecordingWatcher, TileChange};
