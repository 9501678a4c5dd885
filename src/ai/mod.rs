//! The engine: position evaluation, alpha-beta search, and the agents that
//! turn a state into a column.

mod agent;
pub mod alphabeta;
pub mod eval;
mod random;

pub use agent::Agent;
pub use alphabeta::{
    search, search_parallel, AlphaBeta, AlphaBetaAgent, SearchOutcome, SearchResult, SearchStats,
};
pub use eval::{evaluate, EPSILON, LOSS, TIE, WIN};
pub use random::RandomAgent;
