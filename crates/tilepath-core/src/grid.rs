//! The obstacle grid: exclusive owner of all [`Tile`]s.

use crate::geom::{Point, Range};
use crate::tile::{Role, Tile, VisitState};

/// A rectangular grid of [`Tile`]s, sized at construction.
///
/// The grid exclusively owns its tiles; tiles are created once and mutated
/// in place by searches. Tiles are addressed by [`Point`] and stored
/// row-major.
#[derive(Clone, Debug)]
pub struct Grid {
    tiles: Vec<Tile>,
    width: i32,
    height: i32,
}

impl Grid {
    /// Create a new grid of walkable tiles.
    ///
    /// Negative dimensions are clamped to zero.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let bounds = Range::new(0, 0, width, height);
        let tiles = bounds.iter().map(Tile::new).collect();
        Self {
            tiles,
            width,
            height,
        }
    }

    /// The bounding range `[0, 0)..[width, height)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    /// Grid width.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Grid height.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    /// Whether `p` is in bounds and not an obstacle.
    #[inline]
    pub fn is_walkable(&self, p: Point) -> bool {
        match self.tile(p) {
            Some(t) => !t.obstacle,
            None => false,
        }
    }

    /// Convert an in-bounds point to a flat index.
    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if !self.in_bounds(p) {
            return None;
        }
        Some((p.y * self.width + p.x) as usize)
    }

    /// The tile at `p`, or `None` if out of bounds.
    #[inline]
    pub fn tile(&self, p: Point) -> Option<&Tile> {
        self.idx(p).map(|i| &self.tiles[i])
    }

    /// Mutable access to the tile at `p`, or `None` if out of bounds.
    #[inline]
    pub fn tile_mut(&mut self, p: Point) -> Option<&mut Tile> {
        let i = self.idx(p)?;
        Some(&mut self.tiles[i])
    }

    /// Iterate over all tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Mutable iteration over all tiles in row-major order.
    pub fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.tiles.iter_mut()
    }

    /// Soft reset: clear traversal bookkeeping on every tile, keeping the
    /// obstacle layout, roles and weights intact.
    pub fn reset_search(&mut self) {
        for t in &mut self.tiles {
            t.clear_search();
        }
    }

    /// Hard reset: every tile back to its freshly constructed state,
    /// clearing obstacles and roles as well.
    pub fn reset_all(&mut self) {
        for t in &mut self.tiles {
            *t = Tile::new(t.pos());
        }
    }

    /// Count tiles currently in the given visit state.
    pub fn count_visit(&self, state: VisitState) -> usize {
        self.tiles.iter().filter(|t| t.visit == state).count()
    }

    /// Find the tile carrying `role`, if any.
    pub fn find_role(&self, role: Role) -> Option<Point> {
        self.tiles.iter().find(|t| t.role == role).map(|t| t.pos())
    }

    /// Reconstruct the path ending at `goal` by walking `parent` links,
    /// returned in start→goal order.
    ///
    /// Returns an empty vector if `goal` is out of bounds or unreached
    /// (no parent and never discovered).
    pub fn path_from(&self, goal: Point) -> Vec<Point> {
        let Some(t) = self.tile(goal) else {
            return Vec::new();
        };
        if t.parent.is_none() && t.visit == VisitState::Unvisited && t.g.is_infinite() {
            return Vec::new();
        }
        let mut path = Vec::new();
        let mut cur = Some(goal);
        while let Some(p) = cur {
            path.push(p);
            cur = self.tile(p).and_then(|t| t.parent);
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_walkable_everywhere() {
        let g = Grid::new(4, 3);
        assert_eq!(g.bounds().len(), 12);
        for p in g.bounds() {
            assert!(g.is_walkable(p));
        }
        assert!(!g.in_bounds(Point::new(4, 0)));
        assert!(!g.in_bounds(Point::new(0, -1)));
        assert!(!g.is_walkable(Point::new(-1, 0)));
    }

    #[test]
    fn tile_positions_match_lookup() {
        let g = Grid::new(5, 5);
        for p in g.bounds() {
            assert_eq!(g.tile(p).unwrap().pos(), p);
        }
    }

    #[test]
    fn obstacle_blocks_walkability() {
        let mut g = Grid::new(3, 3);
        g.tile_mut(Point::new(1, 1)).unwrap().obstacle = true;
        assert!(!g.is_walkable(Point::new(1, 1)));
        assert!(g.is_walkable(Point::new(0, 1)));
    }

    #[test]
    fn soft_reset_keeps_obstacles_and_roles() {
        let mut g = Grid::new(3, 3);
        {
            let t = g.tile_mut(Point::new(2, 2)).unwrap();
            t.obstacle = true;
        }
        {
            let t = g.tile_mut(Point::new(0, 0)).unwrap();
            t.role = Role::Start;
            t.visit = VisitState::Closed;
            t.g = 1.0;
        }
        g.reset_search();
        let t = g.tile(Point::new(0, 0)).unwrap();
        assert_eq!(t.role, Role::Start);
        assert_eq!(t.visit, VisitState::Unvisited);
        assert!(t.g.is_infinite());
        assert!(g.tile(Point::new(2, 2)).unwrap().obstacle);
    }

    #[test]
    fn hard_reset_clears_everything() {
        let mut g = Grid::new(3, 3);
        g.tile_mut(Point::new(2, 2)).unwrap().obstacle = true;
        g.tile_mut(Point::new(0, 0)).unwrap().role = Role::Goal;
        g.reset_all();
        assert!(!g.tile(Point::new(2, 2)).unwrap().obstacle);
        assert_eq!(g.tile(Point::new(0, 0)).unwrap().role, Role::None);
        assert_eq!(g.find_role(Role::Goal), None);
    }

    #[test]
    fn path_from_walks_parent_chain() {
        let mut g = Grid::new(3, 1);
        g.tile_mut(Point::new(0, 0)).unwrap().g = 0.0;
        g.tile_mut(Point::new(1, 0)).unwrap().parent = Some(Point::new(0, 0));
        g.tile_mut(Point::new(2, 0)).unwrap().parent = Some(Point::new(1, 0));
        let path = g.path_from(Point::new(2, 0));
        assert_eq!(
            path,
            vec![Point::new(0, 0), Point::new(1, 0), Point::new(2, 0)]
        );
    }

    #[test]
    fn path_from_unreached_tile_is_empty() {
        let g = Grid::new(3, 3);
        assert!(g.path_from(Point::new(2, 2)).is_empty());
        assert!(g.path_from(Point::new(9, 9)).is_empty());
    }
}
