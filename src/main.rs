use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use connect_four_ab::config::AppConfig;
use connect_four_ab::game::Player;
use connect_four_ab::scoreboard::Scoreboard;
use connect_four_ab::session::GameSession;
use connect_four_ab::ui::App;

/// Play Connect Four against an alpha-beta search engine.
#[derive(Parser)]
#[command(name = "connect_four_ab", about = "Play Connect Four against an alpha-beta engine")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override search depth in plies
    #[arg(long)]
    depth: Option<u32>,

    /// Who moves first: human or engine
    #[arg(long)]
    first: Option<String>,

    /// Override scoreboard file
    #[arg(long)]
    scoreboard: Option<PathBuf>,

    /// Keep the record in memory only
    #[arg(long)]
    no_scoreboard: bool,

    /// Search root moves in parallel
    #[arg(long)]
    parallel: bool,

    /// Where to write logs (the terminal is taken by the UI)
    #[arg(long, default_value = "connect_four.log")]
    log_file: PathBuf,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;

    let config = load_config(&cli)?;
    let scoreboard_path = config
        .scoreboard
        .enabled
        .then(|| config.scoreboard.path.clone());
    let scoreboard = match &scoreboard_path {
        Some(path) => Scoreboard::load_or_default(path)
            .with_context(|| format!("loading scoreboard from {}", path.display()))?,
        None => Scoreboard::default(),
    };

    let session = GameSession::from_config(&config);
    let mut app = App::new(session, scoreboard, scoreboard_path);

    run_tui(&mut app).context("running terminal UI")
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(depth) = cli.depth {
        config.search.depth = depth;
    }
    if let Some(first) = &cli.first {
        config.game.first = parse_player(first)?;
    }
    if let Some(path) = &cli.scoreboard {
        config.scoreboard.path = path.clone();
    }
    if cli.no_scoreboard {
        config.scoreboard.enabled = false;
    }
    if cli.parallel {
        config.search.parallel = true;
    }

    config.validate().context("validating configuration")?;
    Ok(config)
}

fn parse_player(name: &str) -> Result<Player> {
    match name {
        "human" | "you" => Ok(Player::Human),
        "engine" | "computer" => Ok(Player::Engine),
        other => anyhow::bail!("unknown starting side '{}' (expected 'human' or 'engine')", other),
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn run_tui(app: &mut App) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal even when the app returned an error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
