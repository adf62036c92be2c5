//! Common UI components shared across views.
//!
//! This module contains the header bar, status bar, and help overlay.

use std::time::Instant;

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::api::Role;
use crate::app::App;
use crate::data::{Field, Locale};

/// Render the header bar.
///
/// Displays: focus indicator, role, who is being watched, and the endpoint.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let role = match app.role {
        Role::Child => "CHILD",
        Role::Parent => "PARENT",
    };

    let indicator_style = if app.board.in_error() {
        Style::default().fg(app.theme.error)
    } else {
        app.theme.tone_style(app.board.field(Field::Status).tone)
    };

    let line = Line::from(vec![
        Span::styled(" ● ", indicator_style),
        Span::styled("FOCUSWATCH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(role, app.theme.header),
        Span::raw(" │ "),
        Span::styled(&app.title, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" │ "),
        Span::styled(
            app.source_description(),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the status bar at the bottom.
///
/// Shows: time since the last render, retry state, available controls.
/// Also displays temporary status messages and source errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let controls = "L:logout ?:help q:quit";

    let status = if let Some(ref err) = app.load_error {
        format!(" Error: {} | {}", err, controls)
    } else if let Some((ref err, consecutive)) = app.last_failure {
        if consecutive > 0 {
            format!(" {} (attempt {}) | {}", err, consecutive, controls)
        } else {
            format!(" {} | {}", err, controls)
        }
    } else if let Some(at) = app.board.last_rendered() {
        format!(
            " Changed {:.1}s ago | {}",
            Instant::now().saturating_duration_since(at).as_secs_f64(),
            controls
        )
    } else {
        format!(" Loading... | {}", controls)
    };

    let style = if app.last_failure.is_some() || app.load_error.is_some() {
        Style::default().fg(app.theme.error)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };

    frame.render_widget(Paragraph::new(status).style(style), area);
}

/// Render a notice when the terminal is below the usable size.
pub fn render_too_small(frame: &mut Frame, area: Rect, min_width: u16, min_height: u16) {
    let msg = format!(
        "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
        area.width, area.height, min_width, min_height
    );
    let paragraph = Paragraph::new(msg)
        .alignment(Alignment::Center)
        .style(Style::default().fg(ratatui::style::Color::Yellow));
    let centered = Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5.min(area.height));
    frame.render_widget(paragraph, centered);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the dashboard.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let locale = app.board.locale();
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from("  L         Log out and quit"),
        Line::from("  ?         Toggle this help"),
        Line::from("  q / Esc   Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Polling",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  Fields flash when their value changes."),
        Line::from("  Polling slows down while this terminal"),
        Line::from("  is in the background."),
        Line::from(""),
        Line::from(vec![Span::styled(
            match locale {
                Locale::En => "Press any key to close",
                Locale::Ko => "아무 키나 누르면 닫힙니다",
            },
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 46u16.min(area.width.saturating_sub(4));
    let help_height = 15u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
