use crate::game::{Board, Cell, GameOutcome, Player, COLS, ROWS};
use crate::scoreboard::Scoreboard;
use crate::session::GameSession;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Human plays red, the engine blue.
fn player_color(player: Player) -> Color {
    match player {
        Player::Human => Color::Red,
        Player::Engine => Color::Blue,
    }
}

pub fn render(
    frame: &mut Frame,
    session: &GameSession,
    scoreboard: &Scoreboard,
    selected_column: usize,
    message: &Option<String>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(12),   // Board + scoreboard
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(24)])
        .split(chunks[1]);

    render_header(frame, session, chunks[0]);
    render_board(frame, session, selected_column, middle[0]);
    render_scoreboard(frame, scoreboard, middle[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn render_header(frame: &mut Frame, session: &GameSession, area: Rect) {
    let (status, color) = match session.outcome() {
        Some(GameOutcome::Winner(player)) => (
            format!("Game Over: {} won  |  depth {}", player.name(), session.depth()),
            player_color(player),
        ),
        Some(GameOutcome::Draw) => (
            format!("Game Over: draw  |  depth {}", session.depth()),
            Color::Green,
        ),
        None => {
            let player = session.state().side_to_move();
            let who = match player {
                Player::Human => "Your turn (Red)".to_string(),
                Player::Engine => "Engine is thinking (Blue)".to_string(),
            };
            (format!("{who}  |  depth {}", session.depth()), player_color(player))
        }
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four vs Alpha-Beta"),
        );

    frame.render_widget(header, area);
}

/// Row of the most recent chip in `col`: the topmost occupied cell.
fn top_row(board: &Board, col: usize) -> Option<usize> {
    (0..ROWS).rev().find(|&row| board.get(row, col) != Cell::Empty)
}

fn render_board(frame: &mut Frame, session: &GameSession, selected_column: usize, area: Rect) {
    let board = session.state().board();
    let last = session
        .last_move()
        .and_then(|col| top_row(board, col).map(|row| (row, col)));
    let mut lines = Vec::new();

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")]; // Padding (3 chars to match "  ║")
    for col in 0..COLS {
        if col == selected_column {
            col_line.push(Span::styled(
                format!(" {} ", col + 1),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(format!(" {} ", col + 1)));
        }
    }
    col_line.push(Span::raw("  ")); // Suffix padding to match " ║"
    lines.push(Line::from(col_line));

    lines.push(Line::from("  ╔══════════════════════╗"));

    // Row 0 is the bottom of the board, so draw from the top row down.
    for row in (0..ROWS).rev() {
        let mut row_spans = vec![Span::raw("  ║")];

        for col in 0..COLS {
            let (symbol, mut style) = match board.get(row, col) {
                Cell::Empty => (" . ", Style::default().fg(Color::DarkGray)),
                Cell::Human => (" ● ", Style::default().fg(player_color(Player::Human))),
                Cell::Engine => (" ● ", Style::default().fg(player_color(Player::Engine))),
            };
            if last == Some((row, col)) {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            row_spans.push(Span::styled(symbol, style));
        }

        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from("  ╚══════════════════════╝"));

    // Selection indicator
    let mut indicator_line = vec![Span::raw("   ")];
    for col in 0..COLS {
        if col == selected_column {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw("  "));
    lines.push(Line::from(indicator_line));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_scoreboard(frame: &mut Frame, scoreboard: &Scoreboard, area: Rect) {
    let lines = vec![
        Line::from(vec![
            Span::styled("You:    ", Style::default().fg(player_color(Player::Human))),
            Span::styled(
                scoreboard.human_wins.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Engine: ", Style::default().fg(player_color(Player::Engine))),
            Span::styled(
                scoreboard.engine_wins.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Draws:  ", Style::default().fg(Color::Green)),
            Span::styled(
                scoreboard.draws.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Record")
            .title_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(widget, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new(Line::from(
        "←/→ or 1-7: Column  |  Enter: Drop  |  R: Restart  |  F: Restart, swap first  |  Q: Quit",
    ))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
