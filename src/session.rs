//! One human-versus-engine game, owned by whatever front end is driving it.

use std::time::{Duration, Instant};

use crate::ai::{search, search_parallel, SearchStats};
use crate::config::AppConfig;
use crate::error::SessionError;
use crate::game::{GameOutcome, Player, State};

/// What the engine played and how long it took.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineMove {
    pub column: usize,
    pub value: f64,
    pub elapsed: Duration,
    pub stats: SearchStats,
}

pub struct GameSession {
    state: State,
    first: Player,
    depth: u32,
    parallel: bool,
    last_move: Option<usize>,
}

impl GameSession {
    pub fn new(first: Player, depth: u32, parallel: bool) -> Self {
        tracing::info!(first = first.name(), depth, parallel, "new game");
        GameSession {
            state: State::new(first),
            first,
            depth,
            parallel,
            last_move: None,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.game.first, config.search.depth, config.search.parallel)
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn first(&self) -> Player {
        self.first
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Column of the most recent chip, if any.
    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.state.outcome()
    }

    pub fn is_over(&self) -> bool {
        self.outcome().is_some()
    }

    pub fn is_human_turn(&self) -> bool {
        !self.is_over() && self.state.side_to_move() == Player::Human
    }

    pub fn is_engine_turn(&self) -> bool {
        !self.is_over() && self.state.side_to_move() == Player::Engine
    }

    /// Play the human's column. Returns the outcome if this move ended the game.
    pub fn play_human(&mut self, column: usize) -> Result<Option<GameOutcome>, SessionError> {
        if self.is_over() {
            return Err(SessionError::GameOver);
        }
        if self.state.side_to_move() != Player::Human {
            return Err(SessionError::NotHumanTurn);
        }

        self.state.apply_move(column)?;
        self.last_move = Some(column);
        tracing::info!(column, "human played");
        Ok(self.finish_turn())
    }

    /// Search for and play the engine's reply.
    pub fn play_engine(&mut self) -> Result<EngineMove, SessionError> {
        if self.is_over() {
            return Err(SessionError::GameOver);
        }
        if self.state.side_to_move() != Player::Engine {
            return Err(SessionError::NotEngineTurn);
        }

        let start = Instant::now();
        let found = if self.parallel {
            search_parallel(&self.state, self.depth)?
        } else {
            search(&self.state, self.depth)?
        };
        let elapsed = start.elapsed();

        self.state = found.state;
        self.last_move = Some(found.column);
        tracing::info!(
            column = found.column,
            value = found.value,
            nodes = found.stats.nodes,
            elapsed_ms = elapsed.as_millis() as u64,
            depth = self.depth,
            "engine played"
        );
        self.finish_turn();

        Ok(EngineMove {
            column: found.column,
            value: found.value,
            elapsed,
            stats: found.stats,
        })
    }

    /// Start over, keeping depth and parallelism.
    pub fn restart(&mut self, first: Player) {
        *self = Self::new(first, self.depth, self.parallel);
    }

    fn finish_turn(&self) -> Option<GameOutcome> {
        let outcome = self.outcome();
        match outcome {
            Some(GameOutcome::Winner(player)) => tracing::info!(winner = player.name(), "game over"),
            Some(GameOutcome::Draw) => tracing::info!("game over: draw"),
            None => {}
        }
        outcome
    }
}
