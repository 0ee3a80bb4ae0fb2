//! Neighbor enumeration with diagonal corner-cutting rules.

use tilepath_core::{Grid, Point};

/// Configuration for a neighbor query.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NeighborConfig {
    /// Include the four diagonal moves.
    pub diagonals: bool,
    /// Filter out obstacle tiles.
    pub require_walkable: bool,
    /// Allow a diagonal move even when both flanking orthogonal cells are
    /// inadmissible (squeezing through a diagonal gap).
    pub cut_corners: bool,
    /// Move distance, ≥ 1.
    pub radius: i32,
    /// Keep candidates outside the grid.
    pub allow_out_of_bounds: bool,
}

impl Default for NeighborConfig {
    /// The configuration the search engine uses: 8-way movement on walkable
    /// tiles, no corner cutting, radius 1.
    fn default() -> Self {
        Self {
            diagonals: true,
            require_walkable: true,
            cut_corners: false,
            radius: 1,
            allow_out_of_bounds: false,
        }
    }
}

/// Reusable neighbor computation helper.
///
/// Returned order is a contract: North, East, South, West, then (with
/// diagonals) NE, SE, SW, NW. Frontier tie-breaks and DFS exploration
/// order depend on it.
pub struct Neighbors {
    buf: Vec<Point>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

// Unit offsets in contract order.
const ORTHO: [Point; 4] = [
    Point::new(0, -1),
    Point::new(1, 0),
    Point::new(0, 1),
    Point::new(-1, 0),
];
const DIAG: [Point; 4] = [
    Point::new(1, -1),
    Point::new(1, 1),
    Point::new(-1, 1),
    Point::new(-1, -1),
];

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(8),
        }
    }

    /// Candidate moves from `p` under `cfg`, in contract order.
    pub fn compute(&mut self, grid: &Grid, p: Point, cfg: &NeighborConfig) -> &[Point] {
        self.buf.clear();
        let r = cfg.radius.max(1);

        let admissible = |q: Point| -> bool {
            if !cfg.allow_out_of_bounds && !grid.in_bounds(q) {
                return false;
            }
            // Out-of-bounds points are never walkable, even when kept past
            // the bounds filter.
            if cfg.require_walkable && !grid.is_walkable(q) {
                return false;
            }
            true
        };

        for d in ORTHO {
            let n = p + d * r;
            if admissible(n) {
                self.buf.push(n);
            }
        }

        if cfg.diagonals {
            for d in DIAG {
                let n = p + d * r;
                if !admissible(n) {
                    continue;
                }
                if !cfg.cut_corners {
                    // At least one flanking orthogonal cell (same x or same
                    // y as the diagonal) must itself be admissible.
                    let flank_x = p + Point::new(d.x, 0) * r;
                    let flank_y = p + Point::new(0, d.y) * r;
                    if !admissible(flank_x) && !admissible(flank_y) {
                        continue;
                    }
                }
                self.buf.push(n);
            }
        }

        &self.buf
    }
}
