use std::io;
use std::path::PathBuf;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};

use crate::error::SessionError;
use crate::game::{GameOutcome, MoveError, Player, COLS};
use crate::scoreboard::Scoreboard;
use crate::session::GameSession;

pub struct App {
    session: GameSession,
    scoreboard: Scoreboard,
    /// Where to persist the tally; `None` keeps it in memory only.
    scoreboard_path: Option<PathBuf>,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
    /// Set once the current game has been counted on the scoreboard.
    recorded: bool,
}

impl App {
    pub fn new(session: GameSession, scoreboard: Scoreboard, scoreboard_path: Option<PathBuf>) -> Self {
        App {
            session,
            scoreboard,
            scoreboard_path,
            selected_column: COLS / 2, // Start in middle
            should_quit: false,
            message: None,
            recorded: false,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // The human's chip is on screen by now; answer it.
            if self.session.is_engine_turn() {
                self.engine_move().map_err(io::Error::other)?;
                continue;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                if self.selected_column > 0 {
                    self.selected_column -= 1;
                }
            }
            KeyCode::Right => {
                if self.selected_column < COLS - 1 {
                    self.selected_column += 1;
                }
            }
            KeyCode::Char(c @ '1'..='7') => {
                self.selected_column = c as usize - '1' as usize;
                self.drop_piece();
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('r') => {
                self.restart(self.session.first());
            }
            KeyCode::Char('f') => {
                self.restart(self.session.first().other());
            }
            _ => {}
        }
    }

    fn restart(&mut self, first: Player) {
        self.session.restart(first);
        self.selected_column = COLS / 2;
        self.recorded = false;
        self.message = Some(format!("New game! {} moves first.", first.name()));
    }

    /// Drop the human's chip in the selected column
    fn drop_piece(&mut self) {
        match self.session.play_human(self.selected_column) {
            Ok(Some(outcome)) => self.conclude(outcome),
            Ok(None) => {
                self.message = Some("Engine is thinking...".to_string());
            }
            Err(SessionError::Move(MoveError::ColumnFull)) => {
                self.message = Some("Column is full!".to_string());
            }
            Err(SessionError::Move(MoveError::InvalidColumn)) => {
                self.message = Some("Invalid column!".to_string());
            }
            Err(SessionError::GameOver) => {
                self.message = Some("Game over! Press 'r' to restart.".to_string());
            }
            Err(e) => {
                self.message = Some(e.to_string());
            }
        }
    }

    /// A failed engine move is a driver bug, so it ends the loop with an error.
    fn engine_move(&mut self) -> Result<(), SessionError> {
        let reply = self.session.play_engine().inspect_err(|e| {
            tracing::error!(error = %e, "engine move failed");
        })?;
        self.message = Some(format!(
            "Engine played column {} in {:.2}s (depth {})",
            reply.column + 1,
            reply.elapsed.as_secs_f64(),
            self.session.depth()
        ));
        if let Some(outcome) = self.session.outcome() {
            self.conclude(outcome);
        }
        Ok(())
    }

    /// Count the finished game once and persist the tally.
    fn conclude(&mut self, outcome: GameOutcome) {
        let verdict = match outcome {
            GameOutcome::Winner(Player::Human) => "You win! Congratulations!",
            GameOutcome::Winner(Player::Engine) => "Engine wins! Well played.",
            GameOutcome::Draw => "Draw! The board is full.",
        };

        if !self.recorded {
            self.recorded = true;
            self.scoreboard.record(outcome);
            if let Some(path) = &self.scoreboard_path {
                if let Err(e) = self.scoreboard.save(path) {
                    tracing::error!(error = %e, "failed to save scoreboard");
                    self.message = Some(format!("{verdict}  (scoreboard not saved: {e})"));
                    return;
                }
            }
        }
        self.message = Some(format!("{verdict}  Press 'r' to play again."));
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(
            frame,
            &self.session,
            &self.scoreboard,
            self.selected_column,
            &self.message,
        );
    }
}
