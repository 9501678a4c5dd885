use crate::error::SearchError;
use crate::game::State;

/// Anything that can pick a column for the side to move.
pub trait Agent {
    /// Select a legal column for `state`'s side to move.
    fn select_action(&mut self, state: &State) -> Result<usize, SearchError>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
