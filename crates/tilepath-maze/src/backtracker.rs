//! Iterative randomized backtracker ("growing tree" variant).
//!
//! Carves a perfect maze — every cell reachable, no cycles — on a pitch-2
//! lattice: cells sit at odd (x, y) coordinates and are separated by
//! 1-tile walls that get carved open. The walk is purely iterative with an
//! explicit stack; maze size never threatens the call stack.

use log::debug;
use rand::{Rng, RngExt};
use tilepath_core::{Grid, GridWatcher, Point, TileChange};
use tilepath_search::MazeGenerator;

// Lattice steps in N, E, S, W order.
const LATTICE_DIRS: [Point; 4] = [
    Point::new(0, -2),
    Point::new(2, 0),
    Point::new(0, 2),
    Point::new(-2, 0),
];

/// Randomized-backtracker maze generator.
pub struct Backtracker<R: Rng> {
    rng: R,
    stack: Vec<Point>,
}

impl<R: Rng> Backtracker<R> {
    /// Create a generator drawing from `rng`.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            stack: Vec::new(),
        }
    }

    /// A random lattice cell (odd coordinates) inside the grid, or `None`
    /// if the grid is smaller than the lattice pitch.
    fn random_lattice_cell(&mut self, grid: &Grid) -> Option<Point> {
        let nx = grid.width() / 2;
        let ny = grid.height() / 2;
        if nx == 0 || ny == 0 {
            return None;
        }
        let x = 2 * self.rng.random_range(0..nx) + 1;
        let y = 2 * self.rng.random_range(0..ny) + 1;
        Some(Point::new(x, y))
    }

    /// Uncarved lattice neighbors of `p`, two tiles away, in N, E, S, W order.
    fn uncarved_neighbors(grid: &Grid, p: Point, buf: &mut Vec<Point>) {
        buf.clear();
        for d in LATTICE_DIRS {
            let n = p + d;
            if grid.in_bounds(n) && !grid.is_walkable(n) {
                buf.push(n);
            }
        }
    }
}

impl<R: Rng> MazeGenerator for Backtracker<R> {
    fn generate(&mut self, grid: &mut Grid, watcher: &mut dyn GridWatcher) -> usize {
        for t in grid.tiles_mut() {
            t.obstacle = true;
            watcher.tile_changed(t, TileChange::Obstacle(true));
        }
        let Some(start) = self.random_lattice_cell(grid) else {
            // Degenerate grid: nothing to carve.
            return 0;
        };

        let mut carved = 0usize;
        let mut candidates: Vec<Point> = Vec::with_capacity(4);

        if let Some(t) = grid.tile_mut(start) {
            t.obstacle = false;
            carved += 1;
            watcher.tile_changed(t, TileChange::Obstacle(false));
            watcher.step();
        }
        self.stack.clear();
        self.stack.push(start);

        while let Some(&cur) = self.stack.last() {
            Self::uncarved_neighbors(grid, cur, &mut candidates);
            if candidates.is_empty() {
                self.stack.pop();
                continue;
            }
            let next = candidates[self.rng.random_range(0..candidates.len())];
            // Open the connecting wall tile and the cell itself.
            let wall = Point::new((cur.x + next.x) / 2, (cur.y + next.y) / 2);
            for p in [wall, next] {
                if let Some(t) = grid.tile_mut(p) {
                    t.obstacle = false;
                    carved += 1;
                    watcher.tile_changed(t, TileChange::Obstacle(false));
                }
            }
            watcher.step();
            self.stack.push(next);
        }

        debug!(
            "backtracker carved {carved} cells in a {}x{} grid",
            grid.width(),
            grid.height()
        );
        carved
    }
}
