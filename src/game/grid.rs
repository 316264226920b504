use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Position;

/// Default playfield width in cells
pub const GRID_WIDTH: i32 = 32;
/// Default playfield height in cells
pub const GRID_HEIGHT: i32 = 24;

/// The bounded cell space every entity lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Check if a position is within the grid bounds
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    pub fn cell_count(&self) -> usize {
        (self.width.max(0) * self.height.max(0)) as usize
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Position::new(x, y)))
    }

    /// Uniformly random cell
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        Position::new(rng.gen_range(0..self.width), rng.gen_range(0..self.height))
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(GRID_WIDTH, GRID_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_bounds_checking() {
        let grid = Grid::default();

        assert!(grid.contains(Position::new(0, 0)));
        assert!(grid.contains(Position::new(31, 23)));
        assert!(!grid.contains(Position::new(-1, 0)));
        assert!(!grid.contains(Position::new(32, 0)));
        assert!(!grid.contains(Position::new(0, 24)));
    }

    #[test]
    fn test_cells_cover_grid() {
        let grid = Grid::new(4, 3);
        let cells: Vec<_> = grid.cells().collect();

        assert_eq!(cells.len(), grid.cell_count());
        assert_eq!(cells[0], Position::new(0, 0));
        assert_eq!(cells[4], Position::new(0, 1));
        assert_eq!(*cells.last().unwrap(), Position::new(3, 2));
    }

    #[test]
    fn test_random_cell_in_bounds() {
        let grid = Grid::default();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            assert!(grid.contains(grid.random_cell(&mut rng)));
        }
    }
}
