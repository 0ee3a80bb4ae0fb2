//! Observer seam for visual feedback.
//!
//! The engine reports visually meaningful tile mutations through
//! [`GridWatcher`] and never blocks on the watcher beyond the call itself.
//! A renderer implements this trait; headless callers use `()`.

use crate::geom::Point;
use crate::tile::{Role, Tile, VisitState};

/// A single visually meaningful tile mutation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TileChange {
    /// The tile became (or stopped being) the start or goal.
    Role(Role),
    /// The tile's obstacle flag flipped.
    Obstacle(bool),
    /// The tile entered the frontier or was closed.
    Visit(VisitState),
    /// The tile is part of the final reconstructed path.
    OnPath,
}

/// Receiver for tile-state change notifications.
///
/// `step` is called once per frontier expansion and is the hook for an
/// optional per-step delay during visualization.
pub trait GridWatcher {
    /// A tile changed in a way a renderer would care about.
    fn tile_changed(&mut self, tile: &Tile, change: TileChange) {
        let _ = (tile, change);
    }

    /// One search-loop iteration completed.
    fn step(&mut self) {}
}

/// The null watcher.
impl GridWatcher for () {}

/// A watcher that records every change, for tests and replay.
#[derive(Debug, Default)]
pub struct RecordingWatcher {
    pub changes: Vec<(Point, TileChange)>,
    pub steps: usize,
}

impl GridWatcher for RecordingWatcher {
    fn tile_changed(&mut self, tile: &Tile, change: TileChange) {
        self.changes.push((tile.pos(), change));
    }

    fn step(&mut self) {
        self.steps += 1;
    }
}
