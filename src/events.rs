use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use anyhow::{bail, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use crate::app::App;
use crate::poller::Visibility;

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle any terminal event
pub fn handle_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        // Terminal focus stands in for page visibility
        Event::FocusLost => app.set_visibility(Visibility::Hidden),
        Event::FocusGained => app.set_visibility(Visibility::Visible),
        // Terminal will redraw on next iteration
        Event::Resize(_, _) => {}
        _ => {}
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
        KeyCode::Char('L') => app.request_logout(),
        KeyCode::Char('?') => app.toggle_help(),
        _ => {}
    }
}

/// State of a line being typed without echo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineInput {
    Pending,
    Done,
    Cancelled,
}

/// Apply one key to a hidden line.
pub fn edit_hidden_line(line: &mut String, key: KeyEvent) -> LineInput {
    if key.kind == KeyEventKind::Release {
        return LineInput::Pending;
    }
    match key.code {
        KeyCode::Enter => LineInput::Done,
        KeyCode::Esc => LineInput::Cancelled,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            LineInput::Cancelled
        }
        KeyCode::Backspace => {
            line.pop();
            LineInput::Pending
        }
        KeyCode::Char(c) => {
            line.push(c);
            LineInput::Pending
        }
        _ => LineInput::Pending,
    }
}

/// Prompt on stderr and read a line without echoing it.
///
/// Falls back to a plain line read when stdin is not a terminal.
pub fn read_hidden_line(label: &str) -> Result<String> {
    eprint!("{}: ", label);
    io::stderr().flush()?;

    if !io::stdin().is_terminal() {
        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        return Ok(line.trim_end_matches(['\r', '\n']).to_string());
    }

    enable_raw_mode()?;
    let result = read_hidden_keys();
    disable_raw_mode()?;
    eprintln!();
    result
}

fn read_hidden_keys() -> Result<String> {
    let mut line = String::new();
    loop {
        if let Event::Key(key) = event::read()? {
            match edit_hidden_line(&mut line, key) {
                LineInput::Pending => {}
                LineInput::Done => return Ok(line),
                LineInput::Cancelled => bail!("Cancelled"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Role;
    use crate::app::Exit;
    use crate::data::{Locale, StatusBoard};
    use crate::source::ChannelSource;
    use crate::ui::Theme;

    fn app() -> App {
        let (_tx, source) = ChannelSource::create("test");
        let board = StatusBoard::new(Locale::En, Duration::from_millis(500));
        App::new(Box::new(source), Role::Parent, "STU-abcd-1234", board, Theme::dark())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            let mut app = app();
            handle_key_event(&mut app, key(code));
            assert!(!app.running);
            assert_eq!(app.exit(), Exit::Quit);
        }

        let mut app = app();
        handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }

    #[test]
    fn test_help_swallows_next_key() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('?')));
        assert!(app.show_help);

        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.show_help);
        assert!(app.running);
    }

    #[test]
    fn test_logout_key() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('L')));
        assert_eq!(app.exit(), Exit::Logout);
    }

    #[test]
    fn test_focus_events_set_visibility() {
        let mut app = app();
        handle_event(&mut app, Event::FocusLost);
        assert_eq!(app.visibility, Visibility::Hidden);
        handle_event(&mut app, Event::FocusGained);
        assert_eq!(app.visibility, Visibility::Visible);
    }

    #[test]
    fn test_hidden_line_editing() {
        let mut line = String::new();
        for c in "hunter2".chars() {
            let input = edit_hidden_line(&mut line, key(KeyCode::Char(c)));
            assert_eq!(input, LineInput::Pending);
        }
        edit_hidden_line(&mut line, key(KeyCode::Backspace));
        assert_eq!(line, "hunter");

        assert_eq!(edit_hidden_line(&mut line, key(KeyCode::Enter)), LineInput::Done);
        assert_eq!(line, "hunter");
    }

    #[test]
    fn test_hidden_line_cancel() {
        let mut line = "abc".to_string();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(edit_hidden_line(&mut line, ctrl_c), LineInput::Cancelled);
        assert_eq!(line, "abc");
        assert_eq!(edit_hidden_line(&mut line, key(KeyCode::Esc)), LineInput::Cancelled);
    }

    #[test]
    fn test_hidden_line_ignores_key_release() {
        let mut line = String::new();
        let release =
            KeyEvent::new_with_kind(KeyCode::Char('x'), KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(edit_hidden_line(&mut line, release), LineInput::Pending);
        assert!(line.is_empty());
    }
}
