//! Core value types shared by the board and the solver.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single board position, addressed as `(row, col)` from the top-left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Grid dimensions. Every cell satisfies `row < height` and `col < width`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dims {
    pub height: usize,
    pub width: usize,
}

impl Dims {
    pub fn new(height: usize, width: usize) -> Self {
        assert!(height > 0 && width > 0, "grid dimensions must be non-zero");
        Self { height, width }
    }

    pub fn cell_count(self) -> usize {
        self.height * self.width
    }

    pub fn contains(self, cell: Cell) -> bool {
        cell.row < self.height && cell.col < self.width
    }

    /// All cells of the grid in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        (0..self.height).flat_map(move |row| (0..self.width).map(move |col| Cell::new(row, col)))
    }

    /// The up-to-8 surrounding cells of `cell`, clipped to the grid bounds.
    /// `cell` itself is not included.
    pub fn neighbors(self, cell: Cell) -> impl Iterator<Item = Cell> {
        (-1isize..=1)
            .flat_map(move |dr| (-1isize..=1).map(move |dc| (dr, dc)))
            .filter_map(move |(dr, dc)| {
                if dr == 0 && dc == 0 {
                    return None;
                }
                let row = cell.row.checked_add_signed(dr)?;
                let col = cell.col.checked_add_signed(dc)?;
                let neighbor = Cell::new(row, col);
                self.contains(neighbor).then_some(neighbor)
            })
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbor_counts() {
        let dims = Dims::new(5, 5);
        // Corner has 3 neighbors, edge 5, interior 8.
        assert_eq!(dims.neighbors(Cell::new(0, 0)).count(), 3);
        assert_eq!(dims.neighbors(Cell::new(0, 2)).count(), 5);
        assert_eq!(dims.neighbors(Cell::new(2, 2)).count(), 8);
        assert_eq!(dims.neighbors(Cell::new(4, 4)).count(), 3);
    }

    #[test]
    fn test_neighbors_stay_adjacent_and_in_bounds() {
        let dims = Dims::new(10, 10);
        for neighbor in dims.neighbors(Cell::new(5, 5)) {
            assert!(dims.contains(neighbor));
            let dr = neighbor.row as isize - 5;
            let dc = neighbor.col as isize - 5;
            assert!(dr.abs() <= 1 && dc.abs() <= 1);
            assert!(dr != 0 || dc != 0);
        }
    }

    #[test]
    fn test_neighbors_exclude_self() {
        let dims = Dims::new(3, 3);
        let cell = Cell::new(1, 1);
        assert!(dims.neighbors(cell).all(|n| n != cell));
    }

    #[test]
    fn test_cells_row_major() {
        let dims = Dims::new(2, 3);
        let cells: Vec<Cell> = dims.cells().collect();
        assert_eq!(cells.len(), dims.cell_count());
        assert_eq!(cells[0], Cell::new(0, 0));
        assert_eq!(cells[1], Cell::new(0, 1));
        assert_eq!(cells[5], Cell::new(1, 2));
    }

    #[test]
    fn test_contains() {
        let dims = Dims::new(4, 6);
        assert!(dims.contains(Cell::new(3, 5)));
        assert!(!dims.contains(Cell::new(4, 0)));
        assert!(!dims.contains(Cell::new(0, 6)));
    }
}
