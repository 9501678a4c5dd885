use std::time::Instant;

use rayon::prelude::*;

use crate::error::SearchError;
use crate::game::{Player, State};

use super::agent::Agent;

/// Value and chosen successor of one search node. `best` is `None` only for
/// a node that was terminal or at depth 0 on entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    pub value: f64,
    pub best: Option<(State, usize)>,
}

impl SearchResult {
    fn leaf(state: &State) -> Self {
        SearchResult {
            value: state.score(),
            best: None,
        }
    }
}

/// Work counters for one top-level search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes visited, including leaves.
    pub nodes: u64,
    /// Sibling loops abandoned early by an alpha or beta cutoff.
    pub cutoffs: u64,
}

impl SearchStats {
    fn merge(&mut self, other: SearchStats) {
        self.nodes += other.nodes;
        self.cutoffs += other.cutoffs;
    }
}

/// The move a top-level search settled on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOutcome {
    pub state: State,
    pub column: usize,
    pub value: f64,
    pub stats: SearchStats,
}

/// Depth-bounded minimax with alpha-beta pruning. The engine maximizes the
/// cached score, the human minimizes it. Children are ordered by their own
/// cached score before recursing (stable, so ties keep ascending column order).
#[derive(Debug, Default)]
pub struct AlphaBeta {
    stats: SearchStats,
}

impl AlphaBeta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Engine node. Returns as soon as a child reaches `beta` (the minimizing
    /// parent will never allow this line); otherwise raises `alpha` as better
    /// replies appear. The returned value may lie outside `(alpha, beta)`.
    pub fn maximize(&mut self, state: &State, depth: u32, mut alpha: f64, beta: f64) -> SearchResult {
        self.stats.nodes += 1;
        if depth == 0 || state.is_terminal() {
            return SearchResult::leaf(state);
        }

        let mut children = state.expand();
        children.sort_by(|a, b| b.0.score().total_cmp(&a.0.score()));

        let mut best = SearchResult {
            value: f64::NEG_INFINITY,
            best: None,
        };
        for (child, col) in children {
            let reply = self.minimize(&child, depth - 1, alpha, beta);
            if reply.value > best.value {
                best.value = reply.value;
                best.best = Some((child, col));
            }
            if best.value >= beta {
                self.stats.cutoffs += 1;
                return best;
            }
            if best.value > alpha {
                alpha = best.value;
            }
        }

        best
    }

    /// Human node, the mirror of [`AlphaBeta::maximize`]: cuts off once a
    /// child drops to `alpha` or below, otherwise lowers `beta`.
    pub fn minimize(&mut self, state: &State, depth: u32, alpha: f64, mut beta: f64) -> SearchResult {
        self.stats.nodes += 1;
        if depth == 0 || state.is_terminal() {
            return SearchResult::leaf(state);
        }

        let mut children = state.expand();
        children.sort_by(|a, b| a.0.score().total_cmp(&b.0.score()));

        let mut best = SearchResult {
            value: f64::INFINITY,
            best: None,
        };
        for (child, col) in children {
            let reply = self.maximize(&child, depth - 1, alpha, beta);
            if reply.value < best.value {
                best.value = reply.value;
                best.best = Some((child, col));
            }
            if best.value <= alpha {
                self.stats.cutoffs += 1;
                return best;
            }
            if best.value < beta {
                beta = best.value;
            }
        }

        best
    }

    /// Best reply for whoever is about to move in `state`. Counters start from
    /// zero on every call.
    pub fn search(&mut self, state: &State, depth: u32) -> Result<SearchOutcome, SearchError> {
        check_searchable(state, depth)?;
        self.stats = SearchStats::default();

        let result = match state.side_to_move() {
            Player::Engine => self.maximize(state, depth, f64::NEG_INFINITY, f64::INFINITY),
            Player::Human => self.minimize(state, depth, f64::NEG_INFINITY, f64::INFINITY),
        };
        let (next, column) = result.best.ok_or(SearchError::NoLegalMoves)?;

        Ok(SearchOutcome {
            state: next,
            column,
            value: result.value,
            stats: self.stats,
        })
    }
}

fn check_searchable(state: &State, depth: u32) -> Result<(), SearchError> {
    if depth == 0 {
        return Err(SearchError::ZeroDepth);
    }
    if state.is_terminal() {
        return Err(SearchError::TerminalState);
    }
    if state.legal_actions().is_empty() {
        return Err(SearchError::NoLegalMoves);
    }
    Ok(())
}

/// Search `state` to `depth` plies and return the successor to play.
pub fn search(state: &State, depth: u32) -> Result<SearchOutcome, SearchError> {
    let start = Instant::now();
    let outcome = AlphaBeta::new().search(state, depth)?;
    tracing::debug!(
        depth,
        column = outcome.column,
        value = outcome.value,
        nodes = outcome.stats.nodes,
        cutoffs = outcome.stats.cutoffs,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "search finished"
    );
    Ok(outcome)
}

/// Like [`search`], but each root move is searched on its own rayon task with
/// a private full window. Less pruning than the sequential search; same value
/// and same chosen column.
pub fn search_parallel(state: &State, depth: u32) -> Result<SearchOutcome, SearchError> {
    check_searchable(state, depth)?;
    let start = Instant::now();

    let maximizing = state.side_to_move() == Player::Engine;
    let mut children = state.expand();
    if maximizing {
        children.sort_by(|a, b| b.0.score().total_cmp(&a.0.score()));
    } else {
        children.sort_by(|a, b| a.0.score().total_cmp(&b.0.score()));
    }

    let replies: Vec<(f64, SearchStats)> = children
        .par_iter()
        .map(|(child, _)| {
            let mut searcher = AlphaBeta::new();
            let reply = if maximizing {
                searcher.minimize(child, depth - 1, f64::NEG_INFINITY, f64::INFINITY)
            } else {
                searcher.maximize(child, depth - 1, f64::NEG_INFINITY, f64::INFINITY)
            };
            (reply.value, searcher.stats())
        })
        .collect();

    let mut stats = SearchStats {
        nodes: 1,
        cutoffs: 0,
    };
    let mut best: Option<(f64, State, usize)> = None;
    // First strictly better reply wins, matching the sequential sibling loop.
    for ((child, col), (value, child_stats)) in children.into_iter().zip(replies) {
        stats.merge(child_stats);
        let better = match best {
            None => true,
            Some((best_value, _, _)) if maximizing => value > best_value,
            Some((best_value, _, _)) => value < best_value,
        };
        if better {
            best = Some((value, child, col));
        }
    }
    let (value, next, column) = best.ok_or(SearchError::NoLegalMoves)?;

    tracing::debug!(
        depth,
        column,
        value,
        nodes = stats.nodes,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "parallel search finished"
    );
    Ok(SearchOutcome {
        state: next,
        column,
        value,
        stats,
    })
}

/// Agent that plays the alpha-beta search's choice.
pub struct AlphaBetaAgent {
    depth: u32,
    parallel: bool,
}

impl AlphaBetaAgent {
    pub fn new(depth: u32) -> Self {
        AlphaBetaAgent {
            depth,
            parallel: false,
        }
    }

    pub fn parallel(depth: u32) -> Self {
        AlphaBetaAgent {
            depth,
            parallel: true,
        }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn think(&self, state: &State) -> Result<SearchOutcome, SearchError> {
        if self.parallel {
            search_parallel(state, self.depth)
        } else {
            search(state, self.depth)
        }
    }
}

impl Agent for AlphaBetaAgent {
    fn select_action(&mut self, state: &State) -> Result<usize, SearchError> {
        Ok(self.think(state)?.column)
    }

    fn name(&self) -> &str {
        "AlphaBeta"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::eval::{LOSS, WIN};
    use crate::ai::RandomAgent;
    use crate::game::{GameOutcome, COLS};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Unpruned minimax with the same base case and move order.
    fn minimax(state: &State, depth: u32, maximizing: bool) -> f64 {
        if depth == 0 || state.is_terminal() {
            return state.score();
        }
        let values = state
            .expand()
            .into_iter()
            .map(|(child, _)| minimax(&child, depth - 1, !maximizing));
        if maximizing {
            values.fold(f64::NEG_INFINITY, f64::max)
        } else {
            values.fold(f64::INFINITY, f64::min)
        }
    }

    fn play(first: Player, moves: &[usize]) -> State {
        let mut state = State::new(first);
        for &col in moves {
            state.apply_move(col).unwrap();
        }
        state
    }

    fn random_position(rng: &mut StdRng, plies: usize) -> State {
        loop {
            let first = if rng.random_bool(0.5) {
                Player::Human
            } else {
                Player::Engine
            };
            let mut state = State::new(first);
            for _ in 0..plies {
                if state.is_terminal() {
                    break;
                }
                let legal = state.legal_actions();
                state.apply_move(legal[rng.random_range(0..legal.len())]).unwrap();
            }
            if !state.is_terminal() {
                return state;
            }
        }
    }

    #[test]
    fn empty_board_returns_legal_non_losing_move() {
        let state = State::new(Player::Engine);
        let outcome = search(&state, 4).unwrap();
        assert!(outcome.column < COLS);
        assert_ne!(outcome.state.score(), LOSS);
        assert_eq!(outcome.state, state.with_move(outcome.column).unwrap());
    }

    #[test]
    fn blocks_open_three() {
        // Human owns columns 0..=2 of the bottom row; engine stacked on 6.
        let state = play(Player::Human, &[0, 6, 1, 6, 2]);
        assert_eq!(state.side_to_move(), Player::Engine);

        for depth in 1..=4 {
            let outcome = search(&state, depth).unwrap();
            assert_eq!(outcome.column, 3, "depth {depth} failed to block");
        }
    }

    #[test]
    fn takes_winning_move() {
        // Engine has 0..=2 on the bottom row, human stacked on top.
        let state = play(Player::Engine, &[0, 0, 1, 1, 2, 2]);
        let outcome = search(&state, 4).unwrap();
        assert_eq!(outcome.column, 3);
        assert_eq!(outcome.value, WIN);
        assert_eq!(outcome.state.score(), WIN);
    }

    #[test]
    fn human_side_search_finds_human_win() {
        // Same shape with colours swapped: the minimizing side completes its row.
        let state = play(Player::Human, &[0, 0, 1, 1, 2, 2]);
        let outcome = search(&state, 3).unwrap();
        assert_eq!(outcome.column, 3);
        assert_eq!(outcome.value, LOSS);
    }

    #[test]
    fn alpha_beta_matches_minimax() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let plies = rng.random_range(0..16);
            let state = random_position(&mut rng, plies);
            let maximizing = state.side_to_move() == Player::Engine;
            for depth in 1..=3 {
                let pruned = search(&state, depth).unwrap().value;
                let full = minimax(&state, depth, maximizing);
                assert_eq!(pruned, full, "depth {depth} diverged on {state:?}");
            }
        }
    }

    #[test]
    fn pruning_visits_fewer_nodes() {
        let state = State::new(Player::Engine);
        let mut searcher = AlphaBeta::new();
        searcher.search(&state, 4).unwrap();
        let stats = searcher.stats();
        // 1 + 7 + 49 + 343 + 2401 nodes without pruning.
        assert!(stats.nodes < 2801, "visited {} nodes", stats.nodes);
        assert!(stats.cutoffs > 0);
    }

    #[test]
    fn repeated_searches_report_their_own_stats() {
        let state = State::new(Player::Engine);
        let mut searcher = AlphaBeta::new();
        let first = searcher.search(&state, 3).unwrap().stats;
        let second = searcher.search(&state, 3).unwrap().stats;
        assert_eq!(first, second);
        assert_eq!(searcher.stats(), second);
        assert_eq!(first, search(&state, 3).unwrap().stats);
    }

    #[test]
    fn ties_go_to_lowest_column() {
        // Engine owns 1..=3 on the bottom row, so columns 0 and 4 both win.
        let state = play(Player::Engine, &[1, 1, 2, 2, 3, 3]);
        assert_eq!(state.with_move(0).unwrap().score(), WIN);
        assert_eq!(state.with_move(4).unwrap().score(), WIN);
        for depth in 1..=3 {
            assert_eq!(search(&state, depth).unwrap().column, 0, "depth {depth}");
            assert_eq!(search_parallel(&state, depth).unwrap().column, 0, "depth {depth}");
        }

        // Same shape for the minimizing side.
        let state = play(Player::Human, &[1, 1, 2, 2, 3, 3]);
        assert_eq!(state.with_move(0).unwrap().score(), LOSS);
        assert_eq!(state.with_move(4).unwrap().score(), LOSS);
        for depth in 1..=3 {
            assert_eq!(search(&state, depth).unwrap().column, 0, "depth {depth}");
        }
    }

    #[test]
    fn parallel_matches_sequential() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..10 {
            let plies = rng.random_range(0..12);
            let state = random_position(&mut rng, plies);
            let sequential = search(&state, 3).unwrap();
            let parallel = search_parallel(&state, 3).unwrap();
            assert_eq!(parallel.value, sequential.value);
            assert_eq!(parallel.column, sequential.column);
            assert_eq!(parallel.state, sequential.state);
        }
    }

    #[test]
    fn leaf_nodes_return_no_move() {
        let state = State::new(Player::Engine);
        let mut searcher = AlphaBeta::new();
        let result = searcher.maximize(&state, 0, f64::NEG_INFINITY, f64::INFINITY);
        assert_eq!(result.value, state.score());
        assert!(result.best.is_none());

        let won = play(Player::Engine, &[0, 0, 1, 1, 2, 2, 3]);
        let result = searcher.minimize(&won, 3, f64::NEG_INFINITY, f64::INFINITY);
        assert_eq!(result.value, WIN);
        assert!(result.best.is_none());
    }

    #[test]
    fn rejects_unsearchable_states() {
        let state = State::new(Player::Engine);
        assert_eq!(search(&state, 0), Err(SearchError::ZeroDepth));

        let won = play(Player::Engine, &[0, 0, 1, 1, 2, 2, 3]);
        assert_eq!(search(&won, 3), Err(SearchError::TerminalState));
    }

    #[test]
    fn full_game_vs_self_completes() {
        let mut engine = AlphaBetaAgent::new(3);
        let mut state = State::new(Player::Human);

        while state.outcome().is_none() {
            let col = engine.select_action(&state).unwrap();
            state.apply_move(col).unwrap();
        }

        assert!(state.is_terminal());
    }

    #[test]
    fn beats_random_agent() {
        let games = 10;
        let mut engine_wins = 0;
        for game in 0..games {
            let mut engine = AlphaBetaAgent::new(3);
            let mut random = RandomAgent::seeded(game);
            let first = if game % 2 == 0 {
                Player::Engine
            } else {
                Player::Human
            };
            let mut state = State::new(first);

            while state.outcome().is_none() {
                let col = match state.side_to_move() {
                    Player::Engine => engine.select_action(&state).unwrap(),
                    Player::Human => random.select_action(&state).unwrap(),
                };
                state.apply_move(col).unwrap();
            }

            if state.outcome() == Some(GameOutcome::Winner(Player::Engine)) {
                engine_wins += 1;
            }
        }

        assert!(
            engine_wins >= 8,
            "alpha-beta should beat random, won {engine_wins}/{games}"
        );
    }

    #[test]
    fn name_is_alphabeta() {
        let agent = AlphaBetaAgent::new(5);
        assert_eq!(agent.name(), "AlphaBeta");
        assert_eq!(agent.depth(), 5);
    }
}
