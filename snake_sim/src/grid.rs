//! The playing field: pixel-aligned cells on a toroidal grid.

use hand_tracker::Direction;
use rand::Rng;

pub const WIDTH:  i32 = 800;
pub const HEIGHT: i32 = 600;
pub const CELL:   i32 = 20;

/// Top-left pixel corner of a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self { Cell { x, y } }
}

impl From<[i32; 2]> for Cell {
    fn from([x, y]: [i32; 2]) -> Self { Cell { x, y } }
}

/// Field dimensions in pixels plus the cell size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    pub width:  i32,
    pub height: i32,
    pub cell:   i32,
}

impl Default for Grid {
    fn default() -> Self {
        Grid { width: WIDTH, height: HEIGHT, cell: CELL }
    }
}

impl Grid {
    pub fn columns(&self) -> i32 { self.width  / self.cell }
    pub fn rows(&self)    -> i32 { self.height / self.cell }

    /// Start position: the cell at the pixel centre of the field.
    pub fn center(&self) -> Cell {
        let snap = |v: i32| (v / self.cell) * self.cell;
        Cell::new(snap(self.width / 2), snap(self.height / 2))
    }

    /// Wrap a coordinate that stepped off an edge onto the opposite edge.
    pub fn wrap(&self, c: Cell) -> Cell {
        let fold = |v: i32, bound: i32| {
            if v < 0 { bound - self.cell } else if v >= bound { 0 } else { v }
        };
        Cell::new(fold(c.x, self.width), fold(c.y, self.height))
    }

    /// One cell along `dir`, wrapped.
    pub fn step(&self, c: Cell, dir: Direction) -> Cell {
        let (dx, dy) = dir.delta();
        self.wrap(Cell::new(c.x + dx * self.cell, c.y + dy * self.cell))
    }

    pub fn contains(&self, c: Cell) -> bool {
        (0..self.width).contains(&c.x)
            && (0..self.height).contains(&c.y)
            && c.x % self.cell == 0
            && c.y % self.cell == 0
    }

    /// Uniformly random cell over the whole field.
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        Cell::new(
            rng.gen_range(0..self.columns()) * self.cell,
            rng.gen_range(0..self.rows())    * self.cell,
        )
    }

    /// Every cell, row-major.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows()).flat_map(move |r| {
            (0..self.columns()).map(move |c| Cell::new(c * self.cell, r * self.cell))
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn default_field_is_40_by_30() {
        let g = Grid::default();
        assert_eq!((g.columns(), g.rows()), (40, 30));
        assert_eq!(g.cells().count(), 1200);
    }

    #[test]
    fn center_is_400_300() {
        assert_eq!(Grid::default().center(), Cell::new(400, 300));
    }

    #[test]
    fn wrap_left_edge() {
        let g = Grid::default();
        assert_eq!(g.wrap(Cell::new(-20, 100)), Cell::new(780, 100));
        assert_eq!(g.step(Cell::new(0, 100), Direction::Left), Cell::new(780, 100));
    }

    #[test]
    fn wrap_right_edge() {
        let g = Grid::default();
        assert_eq!(g.wrap(Cell::new(800, 100)), Cell::new(0, 100));
        assert_eq!(g.step(Cell::new(780, 100), Direction::Right), Cell::new(0, 100));
    }

    #[test]
    fn wrap_vertical_edges() {
        let g = Grid::default();
        assert_eq!(g.step(Cell::new(40, 0), Direction::Up), Cell::new(40, 580));
        assert_eq!(g.step(Cell::new(40, 580), Direction::Down), Cell::new(40, 0));
    }

    #[test]
    fn interior_steps_are_not_wrapped() {
        let g = Grid::default();
        assert_eq!(g.step(Cell::new(400, 300), Direction::Up), Cell::new(400, 280));
    }

    #[test]
    fn random_cells_are_aligned_and_inside() {
        let g = Grid::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2000 {
            assert!(g.contains(g.random_cell(&mut rng)));
        }
    }

    #[test]
    fn random_cells_reach_last_row_and_column() {
        let g = Grid::default();
        let mut rng = StdRng::seed_from_u64(11);
        let samples: Vec<Cell> = (0..20_000).map(|_| g.random_cell(&mut rng)).collect();
        assert!(samples.iter().any(|c| c.x == 780));
        assert!(samples.iter().any(|c| c.y == 580));
    }
}
