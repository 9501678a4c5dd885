use crate::game::{Board, Cell, Player, COLS, CONNECT, ROWS};

/// Score of a position the engine has won.
pub const WIN: f64 = 1e20;
/// Score of a position the human has won.
pub const LOSS: f64 = -WIN;
/// Score of a full board with no winner.
pub const TIE: f64 = 0.0;
/// Heuristic accumulator start; keeps a quiet position from reading as `TIE`.
pub const EPSILON: f64 = 0.00001;

const CENTER_COL: usize = COLS / 2;
const CENTER_WEIGHT: f64 = 3.0;
const FORK_BONUS: f64 = 500_000.0;

/// Right, up, up-right, up-left.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Contribution of one 4-cell window.
#[derive(Debug, Clone, Copy, PartialEq)]
struct WindowScore {
    value: f64,
    threat: Option<Player>,
}

impl WindowScore {
    const NONE: WindowScore = WindowScore {
        value: 0.0,
        threat: None,
    };

    fn new(value: f64) -> Self {
        WindowScore { value, threat: None }
    }

    fn threat(value: f64, player: Player) -> Self {
        WindowScore {
            value,
            threat: Some(player),
        }
    }
}

/// Score `board` from the engine's perspective.
///
/// Terminal positions come first, in priority order: an engine four scores
/// [`WIN`], a human four [`LOSS`], and a full board [`TIE`]. Any other position
/// gets the heuristic: center-column occupancy, every 4-cell window on the
/// board, and a bonus for holding two or more open threes.
pub fn evaluate(board: &Board, empty_cells: usize) -> f64 {
    if board.has_four_in_a_row(Player::Engine) {
        return WIN;
    }
    if board.has_four_in_a_row(Player::Human) {
        return LOSS;
    }
    if empty_cells == 0 {
        return TIE;
    }

    heuristic(board)
}

fn heuristic(board: &Board) -> f64 {
    let mut score = EPSILON;

    score += CENTER_WEIGHT * board.count_in_column(CENTER_COL, Player::Engine) as f64;
    score -= CENTER_WEIGHT * board.count_in_column(CENTER_COL, Player::Human) as f64;

    let mut engine_threats = 0;
    let mut human_threats = 0;

    for row in 0..ROWS {
        for col in 0..COLS {
            for &(dr, dc) in &DIRECTIONS {
                let window = score_window(board, row, col, dr, dc);
                score += window.value;
                match window.threat {
                    Some(Player::Engine) => engine_threats += 1,
                    Some(Player::Human) => human_threats += 1,
                    None => {}
                }
            }
        }
    }

    if engine_threats >= 2 {
        score += FORK_BONUS;
    }
    if human_threats >= 2 {
        score -= FORK_BONUS;
    }

    score
}

/// Score the window starting at (row, col) heading in (dr, dc). Windows that
/// run off the board score nothing.
fn score_window(board: &Board, row: usize, col: usize, dr: isize, dc: isize) -> WindowScore {
    let reach = CONNECT as isize - 1;
    let end_row = row as isize + reach * dr;
    let end_col = col as isize + reach * dc;
    if end_row < 0 || end_row >= ROWS as isize || end_col < 0 || end_col >= COLS as isize {
        return WindowScore::NONE;
    }

    let mut engine = 0;
    let mut human = 0;
    let mut empty = 0;
    for i in 0..CONNECT as isize {
        let r = (row as isize + i * dr) as usize;
        let c = (col as isize + i * dc) as usize;
        match board.get(r, c) {
            Cell::Engine => engine += 1,
            Cell::Human => human += 1,
            Cell::Empty => empty += 1,
        }
    }

    classify(engine, human, empty)
}

fn classify(engine: usize, human: usize, empty: usize) -> WindowScore {
    if engine > 0 && human > 0 {
        return WindowScore::NONE;
    }

    match (engine, human, empty) {
        (4, _, _) => WindowScore::new(1_000_000.0),
        (_, 4, _) => WindowScore::new(-1_000_000.0),
        (3, _, 1) => WindowScore::threat(100_000.0, Player::Engine),
        (_, 3, 1) => WindowScore::threat(-100_000.0, Player::Human),
        (2, _, 2) => WindowScore::new(100.0),
        (_, 2, 2) => WindowScore::new(-100.0),
        (1, _, 3) => WindowScore::new(10.0),
        (_, 1, 3) => WindowScore::new(-10.0),
        _ => WindowScore::NONE,
    }
}
