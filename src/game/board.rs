use super::Player;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Length of a winning run.
pub const CONNECT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Human,
    Engine,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column is full")]
    ColumnFull,
    #[error("column is out of range")]
    InvalidColumn,
}

/// The 6x7 grid. Row 0 is the bottom row, so occupied cells in a column always
/// form a contiguous run starting at row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position
    /// Row 0 is the bottom, row 5 is the top
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// True iff `col` is on the board and its top cell is still empty.
    pub fn is_valid_column(&self, col: usize) -> bool {
        col < COLS && self.cells[ROWS - 1][col] == Cell::Empty
    }

    /// Lowest empty row in `col`, or `None` if the column is full.
    pub fn next_open_row(&self, col: usize) -> Option<usize> {
        (0..ROWS).find(|&row| self.cells[row][col] == Cell::Empty)
    }

    /// Unconditional write. The caller guarantees `row` is the next open row.
    pub fn place(&mut self, row: usize, col: usize, player: Player) {
        debug_assert!(
            row == 0 || self.cells[row - 1][col] != Cell::Empty,
            "floating chip at ({row}, {col})"
        );
        self.cells[row][col] = player.to_cell();
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, player: Player) -> Result<usize, MoveError> {
        if col >= COLS {
            return Err(MoveError::InvalidColumn);
        }

        let row = self.next_open_row(col).ok_or(MoveError::ColumnFull)?;
        self.place(row, col, player);
        Ok(row)
    }

    /// Columns that can still take a chip, in ascending order.
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..COLS).filter(|&col| self.is_valid_column(col)).collect()
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| !self.is_valid_column(col))
    }

    /// Number of empty cells left on the board.
    pub fn empty_cells(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == Cell::Empty)
            .count()
    }

    /// Number of `player`'s chips in column `col`.
    pub fn count_in_column(&self, col: usize, player: Player) -> usize {
        let cell = player.to_cell();
        (0..ROWS).filter(|&row| self.cells[row][col] == cell).count()
    }

    /// Scan every horizontal, vertical and diagonal window once for four of
    /// `player`'s chips.
    pub fn has_four_in_a_row(&self, player: Player) -> bool {
        let cell = player.to_cell();
        let run = |cells: [(usize, usize); CONNECT]| {
            cells.iter().all(|&(r, c)| self.cells[r][c] == cell)
        };

        // Horizontal
        for row in 0..ROWS {
            for col in 0..=COLS - CONNECT {
                if run([(row, col), (row, col + 1), (row, col + 2), (row, col + 3)]) {
                    return true;
                }
            }
        }

        // Vertical
        for col in 0..COLS {
            for row in 0..=ROWS - CONNECT {
                if run([(row, col), (row + 1, col), (row + 2, col), (row + 3, col)]) {
                    return true;
                }
            }
        }

        // Diagonal (bottom-left to top-right, /)
        for row in 0..=ROWS - CONNECT {
            for col in 0..=COLS - CONNECT {
                if run([
                    (row, col),
                    (row + 1, col + 1),
                    (row + 2, col + 2),
                    (row + 3, col + 3),
                ]) {
                    return true;
                }
            }
        }

        // Diagonal (bottom-right to top-left, \)
        for row in 0..=ROWS - CONNECT {
            for col in CONNECT - 1..COLS {
                if run([
                    (row, col),
                    (row + 1, col - 1),
                    (row + 2, col - 2),
                    (row + 3, col - 3),
                ]) {
                    return true;
                }
            }
        }

        false
    }

    /// True iff every column's chips sit in a contiguous run from row 0.
    pub fn is_gravity_consistent(&self) -> bool {
        (0..COLS).all(|col| {
            let height = (0..ROWS)
                .take_while(|&row| self.cells[row][col] != Cell::Empty)
                .count();
            (height..ROWS).all(|row| self.cells[row][col] == Cell::Empty)
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        for row in 0..ROWS {
            for col in 0..COLS {
                assert_eq!(board.get(row, col), Cell::Empty);
            }
        }
        assert_eq!(board.empty_cells(), ROWS * COLS);
        assert_eq!(board.legal_columns(), vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_drop_piece() {
        let mut board = Board::new();

        // Drop first piece in column 3
        let row = board.drop_piece(3, Player::Human).unwrap();
        assert_eq!(row, 0); // Should land at bottom
        assert_eq!(board.get(0, 3), Cell::Human);

        // Drop second piece in same column
        let row = board.drop_piece(3, Player::Engine).unwrap();
        assert_eq!(row, 1); // Should land on top of first piece
        assert_eq!(board.get(1, 3), Cell::Engine);
        assert_eq!(board.next_open_row(3), Some(2));
    }

    #[test]
    fn test_column_full() {
        let mut board = Board::new();

        // Fill column 0
        for _ in 0..ROWS {
            board.drop_piece(0, Player::Human).unwrap();
        }

        assert!(!board.is_valid_column(0));
        assert_eq!(board.next_open_row(0), None);
        assert_eq!(board.drop_piece(0, Player::Engine), Err(MoveError::ColumnFull));
        assert_eq!(board.legal_columns(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_invalid_column() {
        let mut board = Board::new();
        assert!(!board.is_valid_column(7));
        assert_eq!(board.drop_piece(7, Player::Human), Err(MoveError::InvalidColumn));
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::new();
        for col in 0..COLS {
            for _ in 0..ROWS {
                board.drop_piece(col, Player::Human).unwrap();
            }
        }
        assert!(board.is_full());
        assert!(board.legal_columns().is_empty());
        assert_eq!(board.empty_cells(), 0);
    }

    #[test]
    fn test_horizontal_win() {
        let mut board = Board::new();
        for col in 3..7 {
            board.drop_piece(col, Player::Human).unwrap();
        }
        assert!(board.has_four_in_a_row(Player::Human));
        assert!(!board.has_four_in_a_row(Player::Engine));
    }

    #[test]
    fn test_vertical_win() {
        let mut board = Board::new();
        board.drop_piece(6, Player::Human).unwrap();
        board.drop_piece(6, Player::Human).unwrap();
        for _ in 0..4 {
            board.drop_piece(6, Player::Engine).unwrap();
        }
        assert!(board.has_four_in_a_row(Player::Engine));
        assert!(!board.has_four_in_a_row(Player::Human));
    }

    #[test]
    fn test_diagonal_up_win() {
        let mut board = Board::new();
        // Create diagonal / pattern
        board.drop_piece(0, Player::Human).unwrap();

        board.drop_piece(1, Player::Engine).unwrap();
        board.drop_piece(1, Player::Human).unwrap();

        board.drop_piece(2, Player::Engine).unwrap();
        board.drop_piece(2, Player::Engine).unwrap();
        board.drop_piece(2, Player::Human).unwrap();

        board.drop_piece(3, Player::Engine).unwrap();
        board.drop_piece(3, Player::Engine).unwrap();
        board.drop_piece(3, Player::Engine).unwrap();
        assert!(!board.has_four_in_a_row(Player::Human));
        board.drop_piece(3, Player::Human).unwrap();

        assert!(board.has_four_in_a_row(Player::Human));
    }

    #[test]
    fn test_diagonal_down_win() {
        let mut board = Board::new();
        // Create diagonal \ pattern in the top-right corner
        for col in 3..COLS {
            let (first, second) = if col % 2 == 1 {
                (Player::Human, Player::Engine)
            } else {
                (Player::Engine, Player::Human)
            };
            board.drop_piece(col, first).unwrap();
            board.drop_piece(col, second).unwrap();
        }
        board.drop_piece(6, Player::Engine).unwrap();

        board.drop_piece(5, Player::Human).unwrap();
        board.drop_piece(5, Player::Engine).unwrap();

        board.drop_piece(4, Player::Human).unwrap();
        board.drop_piece(4, Player::Human).unwrap();
        board.drop_piece(4, Player::Engine).unwrap();

        board.drop_piece(3, Player::Human).unwrap();
        board.drop_piece(3, Player::Human).unwrap();
        board.drop_piece(3, Player::Human).unwrap();
        assert!(!board.has_four_in_a_row(Player::Engine));
        board.drop_piece(3, Player::Engine).unwrap();

        assert!(board.has_four_in_a_row(Player::Engine));
    }

    #[test]
    fn test_no_win_with_three() {
        let mut board = Board::new();
        for col in 0..3 {
            board.drop_piece(col, Player::Human).unwrap();
        }
        assert!(!board.has_four_in_a_row(Player::Human));
    }

    #[test]
    fn test_broken_run_is_not_a_win() {
        let mut board = Board::new();
        for col in [0, 1, 3, 4] {
            board.drop_piece(col, Player::Engine).unwrap();
        }
        assert!(!board.has_four_in_a_row(Player::Engine));
    }

    #[test]
    fn test_count_in_column() {
        let mut board = Board::new();
        board.drop_piece(3, Player::Human).unwrap();
        board.drop_piece(3, Player::Engine).unwrap();
        board.drop_piece(3, Player::Engine).unwrap();
        assert_eq!(board.count_in_column(3, Player::Human), 1);
        assert_eq!(board.count_in_column(3, Player::Engine), 2);
        assert_eq!(board.count_in_column(2, Player::Engine), 0);
    }

    #[test]
    fn test_gravity_consistency() {
        let mut board = Board::new();
        board.drop_piece(2, Player::Human).unwrap();
        board.drop_piece(2, Player::Engine).unwrap();
        assert!(board.is_gravity_consistent());

        board.cells[4][5] = Cell::Human;
        assert!(!board.is_gravity_consistent());
    }
}
