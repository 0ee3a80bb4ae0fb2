//! The search state machine shared by every strategy.
//!
//! A*, Dijkstra and Greedy differ only in the frontier's sort key; BFS and
//! DFS differ only in queue versus stack discipline and neighbor push
//! order. One loop covers all five.

use std::error::Error;
use std::fmt;
use std::str::FromStr;

use log::debug;
use tilepath_core::{Grid, GridWatcher, Point, Tile, TileChange, VisitState};

use crate::cancel::CancelToken;
use crate::distance::euclidean;
use crate::frontier::{Discipline, Frontier, SortKey};
use crate::neighbors::{NeighborConfig, Neighbors};

/// The available search strategies.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    AStar,
    Dijkstra,
    Greedy,
    Bfs,
    Dfs,
}

impl Algorithm {
    /// The frontier discipline this strategy runs on.
    pub fn discipline(self) -> Discipline {
        match self {
            Algorithm::AStar => Discipline::Priority(SortKey::FScore),
            Algorithm::Dijkstra => Discipline::Priority(SortKey::GScore),
            Algorithm::Greedy => Discipline::Priority(SortKey::HScore),
            Algorithm::Bfs => Discipline::Fifo,
            Algorithm::Dfs => Discipline::Lifo,
        }
    }

    /// Whether the strategy orders the frontier by accumulated cost.
    pub fn cost_aware(self) -> bool {
        matches!(self, Algorithm::AStar | Algorithm::Dijkstra | Algorithm::Greedy)
    }

    /// Whether the strategy needs the heuristic precomputed.
    pub fn uses_heuristic(self) -> bool {
        matches!(self, Algorithm::AStar | Algorithm::Greedy)
    }

    fn key(self, tile: &Tile) -> f64 {
        match self {
            Algorithm::AStar => tile.f(),
            Algorithm::Dijkstra => tile.g * tile.weight,
            Algorithm::Greedy => tile.h,
            // FIFO/LIFO frontiers ignore the key.
            Algorithm::Bfs | Algorithm::Dfs => 0.0,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::AStar => "astar",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::Greedy => "greedy",
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
        };
        f.write_str(name)
    }
}

/// Error parsing an algorithm name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownAlgorithm(pub String);

impl fmt::Display for UnknownAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown algorithm: {:?}", self.0)
    }
}

impl Error for UnknownAlgorithm {}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "astar" | "a*" => Ok(Algorithm::AStar),
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "greedy" => Ok(Algorithm::Greedy),
            "bfs" => Ok(Algorithm::Bfs),
            "dfs" => Ok(Algorithm::Dfs),
            other => Err(UnknownAlgorithm(other.to_owned())),
        }
    }
}

/// Terminal state of a search pass. "No path" is a result, not a fault.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The goal was reached; its parent chain is reconstructible.
    Found { goal: Point, expanded: usize },
    /// The frontier emptied without reaching the goal.
    NoPath { expanded: usize },
    /// The cancellation token fired mid-search.
    Cancelled { expanded: usize },
}

impl SearchOutcome {
    /// Number of tiles expanded (marked Closed) before terminating.
    pub fn expanded(&self) -> usize {
        match *self {
            SearchOutcome::Found { expanded, .. }
            | SearchOutcome::NoPath { expanded }
            | SearchOutcome::Cancelled { expanded } => expanded,
        }
    }

    /// Whether the goal was reached.
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found { .. })
    }
}

/// Run `algorithm` over `grid` from `start` to `goal`.
///
/// Expects traversal bookkeeping to be clear (see `Grid::reset_search`).
/// Obstacle or out-of-bounds endpoints terminate immediately with
/// `NoPath`; internal neighbor generation is pre-filtered by bounds and
/// walkability, so the loop itself never sees an invalid tile.
pub fn search(
    grid: &mut Grid,
    start: Point,
    goal: Point,
    algorithm: Algorithm,
    cfg: &NeighborConfig,
    cancel: &CancelToken,
    watcher: &mut impl GridWatcher,
) -> SearchOutcome {
    if !grid.is_walkable(start) || !grid.is_walkable(goal) {
        return SearchOutcome::NoPath { expanded: 0 };
    }

    // Full-grid heuristic precomputation, not per-expansion.
    if algorithm.uses_heuristic() {
        for t in grid.tiles_mut() {
            t.h = euclidean(t.pos(), goal);
        }
    }

    let mut frontier = Frontier::new(algorithm.discipline());
    let mut neighbors = Neighbors::new();
    let mut nbuf: Vec<Point> = Vec::with_capacity(8);
    let mut expanded = 0usize;

    if let Some(t) = grid.tile_mut(start) {
        if algorithm.cost_aware() {
            t.g = 0.0;
        }
        t.visit = VisitState::Frontier;
        let key = algorithm.key(t);
        watcher.tile_changed(t, TileChange::Visit(VisitState::Frontier));
        frontier.insert(start, key);
    }

    while !frontier.is_empty() {
        if cancel.is_cancelled() {
            debug!("{algorithm} cancelled after {expanded} expansions");
            return SearchOutcome::Cancelled { expanded };
        }
        let Ok(cur) = frontier.remove() else {
            break;
        };

        if cur == goal {
            debug!("{algorithm} found goal {goal} after {expanded} expansions");
            return SearchOutcome::Found { goal, expanded };
        }

        if let Some(t) = grid.tile_mut(cur) {
            t.visit = VisitState::Closed;
            watcher.tile_changed(t, TileChange::Visit(VisitState::Closed));
        }
        expanded += 1;

        nbuf.clear();
        nbuf.extend_from_slice(neighbors.compute(grid, cur, cfg));
        if algorithm == Algorithm::Dfs {
            // Pushed in reverse so the LIFO pops North first, matching a
            // recursive depth-first walk.
            nbuf.reverse();
        }

        let cur_g = grid.tile(cur).map_or(f64::INFINITY, |t| t.g);

        for &np in &nbuf {
            let step_cost = euclidean(np, cur);
            let Some(t) = grid.tile_mut(np) else {
                continue;
            };
            if t.visit == VisitState::Closed {
                continue;
            }

            if algorithm.cost_aware() {
                let newly_discovered = t.visit == VisitState::Unvisited;
                let tentative = cur_g + step_cost;
                let improved = tentative < t.g || t.parent.is_none();
                if improved {
                    t.parent = Some(cur);
                    t.g = tentative;
                }
                if newly_discovered {
                    t.visit = VisitState::Frontier;
                    watcher.tile_changed(t, TileChange::Visit(VisitState::Frontier));
                }
                if newly_discovered || improved {
                    frontier.insert(np, algorithm.key(t));
                }
            } else {
                // BFS/DFS: first discovery wins, no revisits.
                if t.visit == VisitState::Frontier {
                    continue;
                }
                t.parent = Some(cur);
                t.visit = VisitState::Frontier;
                watcher.tile_changed(t, TileChange::Visit(VisitState::Frontier));
                frontier.insert(np, 0.0);
            }
        }

        watcher.step();
    }

    debug!("{algorithm} exhausted the frontier after {expanded} expansions");
    SearchOutcome::NoPath { expanded }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{chebyshev, manhattan};
    use tilepath_core::RecordingWatcher;

    const ALL: [Algorithm; 5] = [
        Algorithm::AStar,
        Algorithm::Dijkstra,
        Algorithm::Greedy,
        Algorithm::Bfs,
        Algorithm::Dfs,
    ];

    fn run(
        grid: &mut Grid,
        start: Point,
        goal: Point,
        algorithm: Algorithm,
        cfg: &NeighborConfig,
    ) -> SearchOutcome {
        grid.reset_search();
        search(
            grid,
            start,
            goal,
            algorithm,
            cfg,
            &CancelToken::new(),
            &mut (),
        )
    }

    fn path_cost(path: &[Point]) -> f64 {
        path.windows(2).map(|w| euclidean(w[0], w[1])).sum()
    }

    #[test]
    fn algorithm_names_round_trip() {
        for a in ALL {
            assert_eq!(a.to_string().parse::<Algorithm>(), Ok(a));
        }
        assert_eq!("A*".parse::<Algorithm>(), Ok(Algorithm::AStar));
        assert!(matches!(
            "bogo".parse::<Algorithm>(),
            Err(UnknownAlgorithm(s)) if s == "bogo"
        ));
    }

    #[test]
    fn open_grid_hops_match_chebyshev_with_diagonals() {
        let start = Point::new(1, 1);
        let goal = Point::new(8, 4);
        for a in [Algorithm::AStar, Algorithm::Dijkstra, Algorithm::Bfs] {
            let mut g = Grid::new(10, 10);
            let outcome = run(&mut g, start, goal, a, &NeighborConfig::default());
            assert!(outcome.is_found(), "{a} failed");
            let path = g.path_from(goal);
            assert_eq!(
                path.len() as i32 - 1,
                chebyshev(start, goal),
                "{a} path length"
            );
        }
    }

    #[test]
    fn open_grid_hops_match_manhattan_without_diagonals() {
        let start = Point::new(0, 0);
        let goal = Point::new(6, 3);
        let cfg = NeighborConfig {
            diagonals: false,
            ..NeighborConfig::default()
        };
        for a in [Algorithm::AStar, Algorithm::Dijkstra, Algorithm::Bfs] {
            let mut g = Grid::new(8, 8);
            let outcome = run(&mut g, start, goal, a, &cfg);
            assert!(outcome.is_found(), "{a} failed");
            let path = g.path_from(goal);
            assert_eq!(
                path.len() as i32 - 1,
                manhattan(start, goal),
                "{a} path length"
            );
        }
    }

    #[test]
    fn astar_and_dijkstra_agree_on_cost() {
        let start = Point::new(0, 4);
        let goal = Point::new(7, 1);
        let mut g = Grid::new(8, 6);
        for x in 2..6 {
            g.tile_mut(Point::new(x, 2)).unwrap().obstacle = true;
        }
        let costs: Vec<f64> = [Algorithm::AStar, Algorithm::Dijkstra]
            .into_iter()
            .map(|a| {
                let outcome = run(&mut g, start, goal, a, &NeighborConfig::default());
                assert!(outcome.is_found(), "{a} failed");
                path_cost(&g.path_from(goal))
            })
            .collect();
        assert!((costs[0] - costs[1]).abs() < 1e-9);
    }

    #[test]
    fn diagonal_scenario_5x5() {
        // 5×5 empty grid, corner to corner: 4 hops, total cost 4·√2.
        let start = Point::new(0, 0);
        let goal = Point::new(4, 4);
        let cfg = NeighborConfig {
            cut_corners: true,
            ..NeighborConfig::default()
        };
        let mut g = Grid::new(5, 5);
        let outcome = run(&mut g, start, goal, Algorithm::AStar, &cfg);
        assert!(outcome.is_found());
        let path = g.path_from(goal);
        assert_eq!(path.len(), 5);
        let expect = 4.0 * std::f64::consts::SQRT_2;
        assert!((path_cost(&path) - expect).abs() < 1e-9);
    }

    #[test]
    fn detour_through_wall_opening() {
        // Obstacle column at x=2 with an opening at y=4 forces a detour.
        let start = Point::new(0, 0);
        let goal = Point::new(4, 0);
        let mut g = Grid::new(5, 5);
        for y in 0..4 {
            g.tile_mut(Point::new(2, y)).unwrap().obstacle = true;
        }
        for a in ALL {
            let outcome = run(&mut g, start, goal, a, &NeighborConfig::default());
            assert!(outcome.is_found(), "{a} failed");
            let path = g.path_from(goal);
            assert!(path.contains(&Point::new(2, 4)), "{a} skipped the opening");
        }
    }

    #[test]
    fn no_path_is_a_normal_outcome() {
        let mut g = Grid::new(5, 5);
        for y in 0..5 {
            g.tile_mut(Point::new(2, y)).unwrap().obstacle = true;
        }
        for a in ALL {
            let outcome = run(
                &mut g,
                Point::new(0, 2),
                Point::new(4, 2),
                a,
                &NeighborConfig::default(),
            );
            assert!(matches!(outcome, SearchOutcome::NoPath { .. }), "{a}");
        }
    }

    #[test]
    fn closed_count_bounded_by_grid_area() {
        for a in ALL {
            let mut g = Grid::new(6, 6);
            run(
                &mut g,
                Point::new(0, 0),
                Point::new(5, 5),
                a,
                &NeighborConfig::default(),
            );
            assert!(g.count_visit(VisitState::Closed) <= 36, "{a}");
        }
    }

    #[test]
    fn path_round_trip_is_neighbor_connected() {
        let start = Point::new(0, 0);
        let goal = Point::new(7, 7);
        let mut g = Grid::new(8, 8);
        g.tile_mut(Point::new(3, 3)).unwrap().obstacle = true;
        g.tile_mut(Point::new(4, 3)).unwrap().obstacle = true;
        for a in ALL {
            let outcome = run(&mut g, start, goal, a, &NeighborConfig::default());
            assert!(outcome.is_found(), "{a} failed");
            let path = g.path_from(goal);
            assert_eq!(path.first(), Some(&start), "{a}");
            assert_eq!(path.last(), Some(&goal), "{a}");
            let mut nb = Neighbors::new();
            for w in path.windows(2) {
                let ns = nb.compute(&g, w[0], &NeighborConfig::default());
                assert!(ns.contains(&w[1]), "{a}: {} -> {} not a move", w[0], w[1]);
            }
        }
    }

    #[test]
    fn dfs_expands_north_first() {
        let mut g = Grid::new(3, 3);
        let mut w = RecordingWatcher::default();
        g.reset_search();
        // Goal placed so DFS terminates quickly without covering the grid.
        search(
            &mut g,
            Point::new(1, 1),
            Point::new(1, 0),
            Algorithm::Dfs,
            &NeighborConfig::default(),
            &CancelToken::new(),
            &mut w,
        );
        // First change: start joins the frontier. Second expansion pops the
        // North neighbor of the start.
        let closed: Vec<Point> = w
            .changes
            .iter()
            .filter(|(_, c)| *c == TileChange::Visit(VisitState::Closed))
            .map(|(p, _)| *p)
            .collect();
        assert_eq!(closed.first(), Some(&Point::new(1, 1)));
        // The goal is the North neighbor, so the search stops on popping it
        // rather than closing it: it must be the very next removal.
        assert_eq!(closed.len(), 1);
    }

    #[test]
    fn start_equals_goal_found_immediately() {
        let mut g = Grid::new(3, 3);
        let p = Point::new(1, 1);
        let outcome = run(&mut g, p, p, Algorithm::AStar, &NeighborConfig::default());
        assert_eq!(outcome, SearchOutcome::Found { goal: p, expanded: 0 });
        assert_eq!(g.path_from(p), vec![p]);
    }

    #[test]
    fn obstacle_endpoints_yield_no_path() {
        let mut g = Grid::new(3, 3);
        g.tile_mut(Point::new(2, 2)).unwrap().obstacle = true;
        let outcome = run(
            &mut g,
            Point::new(0, 0),
            Point::new(2, 2),
            Algorithm::AStar,
            &NeighborConfig::default(),
        );
        assert_eq!(outcome, SearchOutcome::NoPath { expanded: 0 });
    }

    #[test]
    fn cancelled_token_stops_the_search() {
        let mut g = Grid::new(10, 10);
        let cancel = CancelToken::new();
        cancel.cancel();
        let outcome = search(
            &mut g,
            Point::new(0, 0),
            Point::new(9, 9),
            Algorithm::Bfs,
            &NeighborConfig::default(),
            &cancel,
            &mut (),
        );
        assert_eq!(outcome, SearchOutcome::Cancelled { expanded: 0 });
    }

    #[test]
    fn watcher_sees_steps_and_transitions() {
        let mut g = Grid::new(4, 4);
        let mut w = RecordingWatcher::default();
        let outcome = search(
            &mut g,
            Point::new(0, 0),
            Point::new(3, 3),
            Algorithm::AStar,
            &NeighborConfig::default(),
            &CancelToken::new(),
            &mut w,
        );
        assert!(outcome.is_found());
        assert_eq!(w.steps, outcome.expanded());
        assert!(
            w.changes
                .iter()
                .any(|(_, c)| *c == TileChange::Visit(VisitState::Closed))
        );
    }
}
