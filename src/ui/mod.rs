//! Terminal UI: play Connect Four against the engine, with a running record.

mod app;
mod game_view;

pub use app::App;
