//! The game board: mine placement and ground-truth queries.
//!
//! The board knows where the mines really are. The solver never reads it
//! directly; the driver relays `neighbor_mine_count` reports into the solver
//! and flags the mines the solver proves.

use std::collections::HashSet;
use std::fmt;

use crate::rng::GameRng;
use crate::types::{Cell, Dims};

#[derive(Clone, Debug)]
pub struct Board {
    dims: Dims,
    mines: HashSet<Cell>,
    flagged: HashSet<Cell>,
}

impl Board {
    /// Place `mine_count` mines uniformly at random: draw cells until enough
    /// distinct ones have been hit.
    pub fn generate(dims: Dims, mine_count: usize, rng: &mut GameRng) -> Self {
        assert!(
            mine_count <= dims.cell_count(),
            "cannot place {mine_count} mines on a {dims} grid"
        );
        let mut mines = HashSet::with_capacity(mine_count);
        while mines.len() < mine_count {
            mines.insert(Cell::new(rng.index(dims.height), rng.index(dims.width)));
        }
        Self {
            dims,
            mines,
            flagged: HashSet::new(),
        }
    }

    /// Board with a fixed mine layout, for tests and replays.
    pub fn with_mines(dims: Dims, mines: impl IntoIterator<Item = Cell>) -> Self {
        let mines: HashSet<Cell> = mines.into_iter().collect();
        for &cell in &mines {
            assert!(dims.contains(cell), "mine {cell} is outside the {dims} grid");
        }
        Self {
            dims,
            mines,
            flagged: HashSet::new(),
        }
    }

    pub fn dims(&self) -> Dims {
        self.dims
    }

    pub fn mine_count(&self) -> usize {
        self.mines.len()
    }

    pub fn is_mine(&self, cell: Cell) -> bool {
        self.mines.contains(&cell)
    }

    /// Ground-truth count of mines among the up-to-8 neighbors of `cell`,
    /// not counting `cell` itself.
    pub fn neighbor_mine_count(&self, cell: Cell) -> usize {
        self.dims
            .neighbors(cell)
            .filter(|neighbor| self.mines.contains(neighbor))
            .count()
    }

    /// Flag `cell` as a found mine. Flagging the same cell twice is a no-op.
    pub fn flag(&mut self, cell: Cell) {
        self.flagged.insert(cell);
    }

    pub fn flagged(&self) -> &HashSet<Cell> {
        &self.flagged
    }

    /// The game is won once the flagged set equals the true mine set.
    pub fn has_won(&self) -> bool {
        self.flagged == self.mines
    }
}

/// Ground-truth rendering, mines as `X`.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(self.dims.width * 2 + 1);
        for row in 0..self.dims.height {
            writeln!(f, "{rule}")?;
            for col in 0..self.dims.width {
                let mark = if self.mines.contains(&Cell::new(row, col)) {
                    'X'
                } else {
                    ' '
                };
                write!(f, "|{mark}")?;
            }
            writeln!(f, "|")?;
        }
        write!(f, "{rule}")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn cell(row: usize, col: usize) -> Cell {
        Cell::new(row, col)
    }

    #[test]
    fn test_generate_places_exact_count() {
        let dims = Dims::new(16, 30);
        let mut rng = GameRng::from_seed(42);
        let board = Board::generate(dims, 99, &mut rng);
        assert_eq!(board.mine_count(), 99);
    }

    #[test]
    fn test_generate_full_board() {
        let dims = Dims::new(2, 2);
        let mut rng = GameRng::from_seed(42);
        let board = Board::generate(dims, 4, &mut rng);
        assert!(dims.cells().all(|c| board.is_mine(c)));
    }

    #[test]
    fn test_center_mine_counts() {
        let dims = Dims::new(3, 3);
        let board = Board::with_mines(dims, [cell(1, 1)]);

        // Every other cell touches the center mine.
        for c in dims.cells().filter(|&c| c != cell(1, 1)) {
            assert_eq!(board.neighbor_mine_count(c), 1);
        }
    }

    #[test]
    fn test_corner_mine_counts() {
        let dims = Dims::new(3, 3);
        let board = Board::with_mines(dims, [cell(0, 0)]);

        assert_eq!(board.neighbor_mine_count(cell(0, 1)), 1);
        assert_eq!(board.neighbor_mine_count(cell(1, 0)), 1);
        assert_eq!(board.neighbor_mine_count(cell(1, 1)), 1);
        assert_eq!(board.neighbor_mine_count(cell(2, 2)), 0);
        assert_eq!(board.neighbor_mine_count(cell(0, 2)), 0);
    }

    #[test]
    fn test_count_excludes_cell_itself() {
        let dims = Dims::new(3, 3);
        let board = Board::with_mines(dims, [cell(1, 1)]);
        assert_eq!(board.neighbor_mine_count(cell(1, 1)), 0);
    }

    #[test]
    fn test_win_requires_exact_flag_set() {
        let dims = Dims::new(3, 3);
        let mut board = Board::with_mines(dims, [cell(0, 0), cell(2, 2)]);
        assert!(!board.has_won());

        board.flag(cell(0, 0));
        assert!(!board.has_won());

        board.flag(cell(2, 2));
        assert!(board.has_won());

        // A wrong flag breaks the win again.
        board.flag(cell(1, 1));
        assert!(!board.has_won());
    }

    #[test]
    fn test_display_marks_mines() {
        let board = Board::with_mines(Dims::new(2, 2), [cell(0, 1)]);
        let rendered = board.to_string();
        assert_eq!(rendered, "-----\n| |X|\n-----\n| | |\n-----");
    }
}
