//! Win/loss/draw tally kept across sessions as a small JSON file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ScoreboardError;
use crate::game::{GameOutcome, Player};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub human_wins: u32,
    pub engine_wins: u32,
    pub draws: u32,
}

impl Scoreboard {
    /// Load the tally from `path`.
    pub fn load(path: &Path) -> Result<Self, ScoreboardError> {
        let json = fs::read_to_string(path).map_err(|e| ScoreboardError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&json).map_err(|e| ScoreboardError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load the tally, starting from zero if no file exists yet.
    pub fn load_or_default(path: &Path) -> Result<Self, ScoreboardError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "no scoreboard found, starting a fresh tally");
            Ok(Self::default())
        }
    }

    /// Write the tally to `path` via a temporary file and a rename.
    pub fn save(&self, path: &Path) -> Result<(), ScoreboardError> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(self)?)?;
        fs::rename(&tmp, path)?;
        tracing::info!(
            path = %path.display(),
            human_wins = self.human_wins,
            engine_wins = self.engine_wins,
            draws = self.draws,
            "scoreboard saved"
        );
        Ok(())
    }

    /// Count one concluded game.
    pub fn record(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Winner(Player::Human) => self.human_wins += 1,
            GameOutcome::Winner(Player::Engine) => self.engine_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.human_wins + self.engine_wins + self.draws
    }
}
