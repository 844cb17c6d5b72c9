//! TUI rendering with ratatui

use super::app::App;
use super::view::{RowFlags, ViewCell};
use crate::config::KeyCap;
use crate::core::{Feedback, WORD_LEN};
use crate::game::{MAX_ATTEMPTS, MessageCue};
use crate::output::message_text;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                           // Header
            Constraint::Length(MAX_ATTEMPTS as u16 * 2 + 3), // Board
            Constraint::Length(4),                           // Message
            Constraint::Min(5),                              // Keyboard
            Constraint::Length(1),                           // Status bar
        ])
        .split(f.area());

    render_header(f, chunks[0]);
    render_board(f, app, chunks[1]);
    render_message(f, app, chunks[2]);
    render_keyboard(f, app, chunks[3]);
    render_status(f, app, chunks[4]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("T U R B L")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn feedback_style(feedback: Option<Feedback>) -> Style {
    match feedback {
        Some(Feedback::Matched) => Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD),
        Some(Feedback::Found) => Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        Some(Feedback::Missing) => Style::default().fg(Color::White).bg(Color::DarkGray),
        None => Style::default().fg(Color::White),
    }
}

fn board_row(cells: &[ViewCell; WORD_LEN], flags: RowFlags, cursor: Option<usize>) -> Line<'static> {
    let mut spans = Vec::with_capacity(WORD_LEN * 2);

    for (col, cell) in cells.iter().enumerate() {
        let mut style = feedback_style(cell.classification);
        if flags.error {
            style = style.fg(Color::Red).add_modifier(Modifier::CROSSED_OUT);
        } else if flags.winner {
            style = style.add_modifier(Modifier::SLOW_BLINK);
        } else if flags.full && cell.classification.is_none() {
            style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }

        let text = match cell.letter {
            Some(letter) => format!(" {} ", letter.to_ascii_uppercase()),
            None if cursor == Some(col) => " _ ".to_string(),
            None => " · ".to_string(),
        };
        let style = if cell.letter.is_none() {
            style.fg(Color::DarkGray)
        } else {
            style
        };

        spans.push(Span::styled(text, style));
        spans.push(Span::raw(" "));
    }

    Line::from(spans)
}

fn render_board(f: &mut Frame, app: &App, area: Rect) {
    let active_row = app.session.row_number() - 1;
    let cursor_col = (!app.session.is_over() && app.session.buffer().len() < WORD_LEN)
        .then(|| app.session.buffer().len());

    let mut lines = Vec::with_capacity(MAX_ATTEMPTS * 2);
    for (row, (cells, flags)) in app.view.cells.iter().zip(app.view.flags).enumerate() {
        let cursor = if row == active_row { cursor_col } else { None };
        lines.push(board_row(cells, flags, cursor));
        lines.push(Line::default());
    }

    let board = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(format!(" Guess {}/{} ", app.session.row_number(), MAX_ATTEMPTS))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(board, area);
}

fn render_message(f: &mut Frame, app: &App, area: Rect) {
    let text = message_text(&app.cues, app.view.message, app.view.reveal.as_ref());
    let color = match app.view.message {
        MessageCue::Won => Color::Green,
        MessageCue::Lost | MessageCue::NoExist => Color::Red,
        MessageCue::Start | MessageCue::Confirm | MessageCue::EnterWord => Color::White,
    };

    let message = Paragraph::new(text)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(message, area);
}

fn render_keyboard(f: &mut Frame, app: &App, area: Rect) {
    let pressed = app.pressed.map(|(cap, _)| cap);

    let lines: Vec<Line> = app
        .layout
        .rows()
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .flat_map(|&cap| {
                    let (label, feedback) = match cap {
                        KeyCap::Letter(ch) => (
                            format!(" {} ", ch.to_ascii_uppercase()),
                            app.view.keys.get(&ch).copied(),
                        ),
                        KeyCap::Backspace => (" ⌫ ".to_string(), None),
                        KeyCap::Enter => (" ⏎ ".to_string(), None),
                    };
                    let mut style = feedback_style(feedback);
                    if pressed == Some(cap) {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    [Span::styled(label, style), Span::raw(" ")]
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let keyboard = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().title(" Keyboard ").borders(Borders::ALL));
    f.render_widget(keyboard, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let sound = app
        .view
        .last_sound
        .map_or_else(String::new, |cue| format!("♪ {cue}"));
    let help = if app.session.is_over() {
        "Enter: Play again | Esc: Quit"
    } else {
        "Ctrl-N: New game | Esc: Quit"
    };

    let peer = if app.peer_started {
        "⚑ another player started a game  "
    } else {
        ""
    };

    let status = Paragraph::new(format!("{peer}{sound}  {help}"))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(status, area);
}
