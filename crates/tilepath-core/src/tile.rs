//! Per-cell state: [`Tile`], its [`Role`] and its [`VisitState`].
//!
//! Role and visit state are deliberately two orthogonal enums: "is the
//! start/goal" and "was reached during the last search" must survive a
//! soft reset independently.

use crate::geom::Point;

/// Marker role of a tile within the current search problem.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    #[default]
    None,
    Start,
    Goal,
}

/// Traversal bookkeeping for a tile during a search pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VisitState {
    /// Not yet discovered.
    #[default]
    Unvisited,
    /// Discovered and awaiting expansion.
    Frontier,
    /// Finalized; never revisited.
    Closed,
}

/// One cell of the grid.
///
/// Cost fields start at their sentinel defaults: `g` is `+∞` until a search
/// reaches the tile, `h` is 0 until a heuristic pass fills it in, `weight`
/// is 1. `parent` forms an acyclic chain back to the start tile once set.
#[derive(Clone, Debug)]
pub struct Tile {
    pos: Point,
    pub role: Role,
    pub obstacle: bool,
    pub visit: VisitState,
    /// Accumulated path cost from the start (g-score).
    pub g: f64,
    /// Heuristic estimate of remaining cost to the goal (h-score).
    pub h: f64,
    /// Traversal cost multiplier, ≥ 0.
    pub weight: f64,
    /// Back-link for path reconstruction.
    pub parent: Option<Point>,
}

impl Tile {
    /// Create a fresh tile at `pos` with default state.
    pub fn new(pos: Point) -> Self {
        Self {
            pos,
            role: Role::None,
            obstacle: false,
            visit: VisitState::Unvisited,
            g: f64::INFINITY,
            h: 0.0,
            weight: 1.0,
            parent: None,
        }
    }

    /// The tile's fixed grid position.
    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    /// The A* priority key, g + h.
    #[inline]
    pub fn f(&self) -> f64 {
        self.g + self.h
    }

    /// Clear traversal bookkeeping only, keeping role, obstacle and weight.
    pub fn clear_search(&mut self) {
        self.visit = VisitState::Unvisited;
        self.g = f64::INFINITY;
        self.h = 0.0;
        self.parent = None;
    }
}
