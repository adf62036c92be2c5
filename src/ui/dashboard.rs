//! The status dashboard.
//!
//! One bordered block per board field, a gauge for the concentration score,
//! and a sparkline of recent scores.

use std::time::Instant;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Sparkline},
    Frame,
};

use focuswatch_types::MAX_CONCENTRATION_SCORE;

use crate::app::App;
use crate::data::Field;

/// Render the dashboard into `area`.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let now = Instant::now();

    let mut constraints = vec![
        Constraint::Length(3), // Status
        Constraint::Length(3), // Score gauge
        Constraint::Length(3), // Gaze
    ];
    if app.board.show_face {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Min(4)); // Trend

    let chunks = Layout::vertical(constraints).split(area);

    render_text_field(frame, app, Field::Status, chunks[0], now);
    render_score(frame, app, chunks[1], now);
    render_text_field(frame, app, Field::Gaze, chunks[2], now);

    let trend_area = if app.board.show_face {
        render_text_field(frame, app, Field::Face, chunks[3], now);
        chunks[4]
    } else {
        chunks[3]
    };
    render_trend(frame, app, trend_area);
}

fn field_block<'a>(app: &App, field: Field) -> Block<'a> {
    Block::default()
        .title(Span::styled(
            format!(" {} ", app.board.locale().field_title(field)),
            app.theme.header,
        ))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
}

fn render_text_field(frame: &mut Frame, app: &App, field: Field, area: Rect, now: Instant) {
    let view = app.board.field(field);
    let style = app.theme.field_style(view.tone, view.is_pulsing(now));

    let paragraph = Paragraph::new(Line::from(Span::styled(view.text.as_str(), style)))
        .block(field_block(app, field));
    frame.render_widget(paragraph, area);
}

fn render_score(frame: &mut Frame, app: &App, area: Rect, now: Instant) {
    let view = app.board.field(Field::Score);
    let style = app.theme.field_style(view.tone, view.is_pulsing(now));
    let ratio = f64::from(app.board.progress.min(100)) / 100.0;

    let gauge = Gauge::default()
        .block(field_block(app, Field::Score))
        .gauge_style(app.theme.tone_style(view.tone))
        .ratio(ratio)
        .label(Span::styled(
            format!("{} / {}", view.text, MAX_CONCENTRATION_SCORE),
            style.add_modifier(Modifier::BOLD),
        ));
    frame.render_widget(gauge, area);
}

fn render_trend(frame: &mut Frame, app: &App, area: Rect) {
    let mut title = " Trend ".to_string();
    if let Some(avg) = app.history.average() {
        title.push_str(&format!("· avg {:.0} ", avg));
    }
    if let Some(delta) = app.history.trend() {
        title.push_str(&format!("· {:+} ", delta));
    }
    if let Some(span) = app.history.span().filter(|span| !span.is_zero()) {
        title.push_str(&format!("· {}s ", span.as_secs()));
    }

    let data = app.history.sparkline();
    let sparkline = Sparkline::default()
        .block(
            Block::default()
                .title(Span::styled(title, app.theme.header))
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .data(&data)
        .max(u64::from(MAX_CONCENTRATION_SCORE))
        .style(Style::default().fg(app.theme.highlight));
    frame.render_widget(sparkline, area);
}
