//! The editing and execution facade around a grid.
//!
//! `SearchContext` owns the grid, the current start/goal, the selected
//! algorithm and the neighbor configuration, and is what an input source
//! drives. Coordinate edits outside the grid are silent no-ops, mirroring
//! a UI ignoring clicks outside the board.

use log::{debug, warn};
use tilepath_core::{Grid, GridWatcher, Point, Role, TileChange};

use crate::cancel::CancelToken;
use crate::engine::{Algorithm, SearchOutcome, UnknownAlgorithm, search};
use crate::neighbors::NeighborConfig;

/// Carves a maze into a grid, returning the number of cells opened.
///
/// Implemented by the generators in `tilepath-maze`; the context only
/// needs this seam. Every obstacle flip is reported to `watcher`, with
/// one `step` per carve, so a renderer can animate generation.
pub trait MazeGenerator {
    fn generate(&mut self, grid: &mut Grid, watcher: &mut dyn GridWatcher) -> usize;
}

/// Owns a [`Grid`] plus the mutable search problem posed on it.
pub struct SearchContext<W: GridWatcher = ()> {
    grid: Grid,
    start: Option<Point>,
    goal: Option<Point>,
    algorithm: Algorithm,
    config: NeighborConfig,
    cancel: CancelToken,
    watcher: W,
}

impl SearchContext<()> {
    /// A context with no visual feedback.
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_watcher(width, height, ())
    }
}

impl<W: GridWatcher> SearchContext<W> {
    /// A context reporting tile changes to `watcher`.
    pub fn with_watcher(width: i32, height: i32, watcher: W) -> Self {
        Self {
            grid: Grid::new(width, height),
            start: None,
            goal: None,
            algorithm: Algorithm::AStar,
            config: NeighborConfig::default(),
            cancel: CancelToken::new(),
            watcher,
        }
    }

    /// The owned grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable access to the grid for weight edits and tests.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Current start tile, if set.
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    /// Current goal tile, if set.
    pub fn goal(&self) -> Option<Point> {
        self.goal
    }

    /// The selected algorithm.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// The neighbor configuration used by searches.
    pub fn config(&self) -> NeighborConfig {
        self.config
    }

    /// Replace the neighbor configuration.
    pub fn set_config(&mut self, config: NeighborConfig) {
        self.config = config;
    }

    /// A clone of the cancellation token for this context's searches.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// The watcher receiving tile-change reports.
    pub fn watcher(&self) -> &W {
        &self.watcher
    }

    fn set_role(&mut self, p: Point, role: Role, prev: Option<Point>) -> Option<Point> {
        if !self.grid.in_bounds(p) {
            return prev;
        }
        // Exactly one tile carries each role: clear the previous holder.
        if let Some(old) = prev.filter(|&old| old != p) {
            if let Some(t) = self.grid.tile_mut(old) {
                t.role = Role::None;
                self.watcher.tile_changed(t, TileChange::Role(Role::None));
            }
        }
        if let Some(t) = self.grid.tile_mut(p) {
            t.role = role;
            self.watcher.tile_changed(t, TileChange::Role(role));
        }
        Some(p)
    }

    /// Move the start marker. Out-of-bounds coordinates are ignored.
    pub fn set_start(&mut self, p: Point) {
        self.start = self.set_role(p, Role::Start, self.start);
    }

    /// Move the goal marker. Out-of-bounds coordinates are ignored.
    pub fn set_goal(&mut self, p: Point) {
        self.goal = self.set_role(p, Role::Goal, self.goal);
    }

    /// Flip the obstacle flag at `p`. Out-of-bounds coordinates are ignored.
    pub fn toggle_obstacle(&mut self, p: Point) {
        if let Some(t) = self.grid.tile_mut(p) {
            t.obstacle = !t.obstacle;
            let flag = t.obstacle;
            self.watcher.tile_changed(t, TileChange::Obstacle(flag));
        }
    }

    /// Select the strategy for subsequent searches.
    pub fn select_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
    }

    /// Select a strategy by name ("astar", "dijkstra", "greedy", "bfs", "dfs").
    pub fn select_algorithm_named(&mut self, name: &str) -> Result<(), UnknownAlgorithm> {
        self.algorithm = name.parse()?;
        Ok(())
    }

    /// Clear traversal bookkeeping, keeping obstacles, roles and weights.
    pub fn reset_soft(&mut self) {
        self.grid.reset_search();
        self.cancel.reset();
    }

    /// Reset every tile to defaults and forget the start and goal.
    pub fn reset_hard(&mut self) {
        self.grid.reset_all();
        self.start = None;
        self.goal = None;
        self.cancel.reset();
    }

    /// Run the selected algorithm between the configured endpoints.
    ///
    /// Soft-resets traversal state first. Reports `NoPath` without running
    /// when either endpoint is unset. On success, every tile of the final
    /// path is reported to the watcher as [`TileChange::OnPath`].
    pub fn run_search(&mut self) -> SearchOutcome {
        let (Some(start), Some(goal)) = (self.start, self.goal) else {
            warn!("search requested without start and goal");
            return SearchOutcome::NoPath { expanded: 0 };
        };
        self.grid.reset_search();
        let outcome = search(
            &mut self.grid,
            start,
            goal,
            self.algorithm,
            &self.config,
            &self.cancel,
            &mut self.watcher,
        );
        if outcome.is_found() {
            for p in self.grid.path_from(goal) {
                if let Some(t) = self.grid.tile(p) {
                    self.watcher.tile_changed(t, TileChange::OnPath);
                }
            }
        }
        debug!("{} finished: {outcome:?}", self.algorithm);
        outcome
    }

    /// Reconstructed path of the last successful search, start→goal.
    pub fn path(&self) -> Vec<Point> {
        match self.goal {
            Some(goal) => self.grid.path_from(goal),
            None => Vec::new(),
        }
    }

    /// Carve a maze into the grid with `generator`.
    ///
    /// Hard-resets the grid first (the generator refills it with
    /// obstacles), so start and goal must be re-placed afterwards.
    /// Returns the number of cells carved open.
    pub fn run_maze(&mut self, generator: &mut impl MazeGenerator) -> usize {
        self.reset_hard();
        let carved = generator.generate(&mut self.grid, &mut self.watcher);
        debug!("maze generation carved {carved} cells");
        carved
    }
}
