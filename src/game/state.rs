use super::{Board, MoveError, Player, COLS, ROWS};
use crate::ai::eval::{self, EPSILON, LOSS, TIE, WIN};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

/// A searchable position: the board plus the engine-perspective score cached
/// after the last placement, the side to move and the remaining empty cells.
///
/// `State` is `Copy`, so every branch of a search owns an independent board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    board: Board,
    score: f64,
    side_to_move: Player,
    empty_cells: usize,
}

impl State {
    /// Empty board with `first` to move.
    pub fn new(first: Player) -> Self {
        State {
            board: Board::new(),
            score: EPSILON,
            side_to_move: first,
            empty_cells: ROWS * COLS,
        }
    }

    /// Wrap an existing board, recounting empty cells and rescoring it.
    pub fn from_board(board: Board, side_to_move: Player) -> Self {
        let empty_cells = board.empty_cells();
        State {
            board,
            score: eval::evaluate(&board, empty_cells),
            side_to_move,
            empty_cells,
        }
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Engine-perspective score of the position.
    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn side_to_move(&self) -> Player {
        self.side_to_move
    }

    pub fn empty_cells(&self) -> usize {
        self.empty_cells
    }

    pub fn is_legal_move(&self, column: usize) -> bool {
        self.board.is_valid_column(column)
    }

    /// Get list of legal columns (not full), ascending
    pub fn legal_actions(&self) -> Vec<usize> {
        self.board.legal_columns()
    }

    /// Drop the side-to-move's chip in `column`, hand the turn over and
    /// rescore. Returns the row the chip landed in. On error the state is
    /// left untouched.
    pub fn apply_move(&mut self, column: usize) -> Result<usize, MoveError> {
        let row = self.board.drop_piece(column, self.side_to_move)?;
        self.after_placement();
        Ok(row)
    }

    /// Apply a move and return new state (immutable)
    pub fn with_move(&self, column: usize) -> Result<State, MoveError> {
        let mut next = *self;
        next.apply_move(column)?;
        Ok(next)
    }

    fn after_placement(&mut self) {
        self.empty_cells -= 1;
        self.side_to_move = self.side_to_move.other();
        self.score = eval::evaluate(&self.board, self.empty_cells);
    }

    /// One child per legal column, in ascending column order. Each child is an
    /// independent copy with that column played.
    pub fn expand(&self) -> Vec<(State, usize)> {
        // A column is legal exactly when it still has an open row.
        (0..COLS)
            .filter_map(|col| {
                let row = self.board.next_open_row(col)?;
                let mut child = *self;
                child.board.place(row, col, self.side_to_move);
                child.after_placement();
                Some((child, col))
            })
            .collect()
    }

    /// True iff the cached score is one of the exact terminal sentinels.
    pub fn is_terminal(&self) -> bool {
        self.score == WIN || self.score == LOSS || self.score == TIE
    }

    pub fn is_win(&self, player: Player) -> bool {
        self.board.has_four_in_a_row(player)
    }

    /// Full board with no four-in-a-row for either side.
    pub fn is_draw(&self) -> bool {
        self.empty_cells == 0
            && !self.board.has_four_in_a_row(Player::Engine)
            && !self.board.has_four_in_a_row(Player::Human)
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        if self.is_win(Player::Engine) {
            Some(GameOutcome::Winner(Player::Engine))
        } else if self.is_win(Player::Human) {
            Some(GameOutcome::Winner(Player::Human))
        } else if self.is_draw() {
            Some(GameOutcome::Draw)
        } else {
            None
        }
    }
}
