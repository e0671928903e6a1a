use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::game::{Board, Cell, GameResult, Player};

pub fn render(
    frame: &mut Frame,
    board: &Board,
    cursor: (usize, usize),
    computing: bool,
    message: &Option<String>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(7),    // Board
            Constraint::Length(3), // Message
            Constraint::Length(4), // Controls
        ])
        .split(frame.area());

    render_header(frame, board, computing, chunks[0]);
    render_board(frame, board, cursor, computing, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn player_color(player: Player) -> Color {
    match player {
        Player::X => Color::Cyan,
        Player::O => Color::Magenta,
    }
}

fn render_header(frame: &mut Frame, board: &Board, computing: bool, area: ratatui::layout::Rect) {
    let (status, color) = match board.result() {
        GameResult::Win(p) => (format!("Game over: {} wins!", p.name()), player_color(p)),
        GameResult::Draw => ("Game over: draw".to_string(), Color::Gray),
        GameResult::InProgress if computing => {
            ("Computer is thinking...".to_string(), player_color(board.turn()))
        }
        GameResult::InProgress => (
            format!("Turn: {}", board.turn().name()),
            player_color(board.turn()),
        ),
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Tic-Tac-Toe"));

    frame.render_widget(header, area);
}

fn render_board(
    frame: &mut Frame,
    board: &Board,
    cursor: (usize, usize),
    computing: bool,
    area: ratatui::layout::Rect,
) {
    let dim = board.dimension();
    let mut lines = Vec::with_capacity(dim);

    for row in 0..dim {
        let mut spans = Vec::with_capacity(dim);
        for col in 0..dim {
            let cell = board.cell(row, col);
            let mut style = match cell.player() {
                Some(p) => Style::default()
                    .fg(player_color(p))
                    .add_modifier(Modifier::BOLD),
                None => Style::default().fg(Color::DarkGray),
            };
            if (row, col) == cursor && !computing {
                style = style.add_modifier(Modifier::REVERSED);
            }
            let glyph = match cell {
                Cell::Empty => " . ",
                Cell::X => " X ",
                Cell::O => " O ",
            };
            spans.push(Span::styled(glyph, style));
        }
        lines.push(Line::from(spans));
    }

    let grid = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Board"));

    frame.render_widget(grid, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: ratatui::layout::Rect) {
    let text = message.clone().unwrap_or_default();
    let msg = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(msg, area);
}

fn render_controls(frame: &mut Frame, area: ratatui::layout::Rect) {
    let lines = vec![
        Line::from("arrows: move cursor   enter/space: place mark"),
        Line::from("r: new round   q: quit"),
    ];
    let controls = Paragraph::new(lines)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));
    frame.render_widget(controls, area);
}
