//! Application state for the dashboard.

use std::time::{Duration, Instant};

use crate::api::Role;
use crate::data::{History, StatusBoard};
use crate::error::FetchError;
use crate::poller::{PollEvent, Visibility};
use crate::source::DataSource;
use crate::ui::Theme;

/// How the TUI session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The user quit.
    Quit,
    /// The user asked to log out.
    Logout,
    /// The server rejected the session; continue at this entry point.
    SessionExpired(&'static str),
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub show_help: bool,

    // Data source
    source: Box<dyn DataSource>,
    pub role: Role,
    pub title: String,
    pub board: StatusBoard,
    pub history: History,
    pub load_error: Option<String>,
    /// Last poll failure and its consecutive count, cleared on the next render.
    pub last_failure: Option<(FetchError, u32)>,
    pub visibility: Visibility,
    exit: Exit,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App reading from `source`.
    pub fn new(
        source: Box<dyn DataSource>,
        role: Role,
        title: impl Into<String>,
        board: StatusBoard,
        theme: Theme,
    ) -> Self {
        Self {
            running: true,
            show_help: false,
            source,
            role,
            title: title.into(),
            board,
            history: History::new(),
            load_error: None,
            last_failure: None,
            visibility: Visibility::Visible,
            exit: Exit::Quit,
            theme,
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Drain pending events from the source.
    ///
    /// Returns true if anything on screen may have changed.
    pub fn reload_data(&mut self) -> bool {
        let mut updated = false;
        while let Some(event) = self.source.poll() {
            updated |= self.apply_event(event, Instant::now());
            if !self.running {
                return true;
            }
        }

        if let Some(err) = self.source.error() {
            self.load_error = Some(err.to_string());
        }
        updated
    }

    /// Apply one poller event to the display state.
    pub fn apply_event(&mut self, event: PollEvent, now: Instant) -> bool {
        match event {
            PollEvent::Render(snapshot) => {
                self.board.render(&snapshot, now);
                self.history.record(&snapshot, now);
                self.last_failure = None;
                true
            }
            PollEvent::Failure { error, consecutive } => {
                self.last_failure = Some((error, consecutive));
                true
            }
            PollEvent::RenderError(error) => {
                self.board.render_error();
                if self.last_failure.is_none() {
                    self.last_failure = Some((error, 0));
                }
                true
            }
            PollEvent::Redirect(entry) => {
                self.exit = Exit::SessionExpired(entry);
                self.running = false;
                true
            }
        }
    }

    /// Forward a terminal focus change to the poller.
    pub fn set_visibility(&mut self, visibility: Visibility) {
        if self.visibility != visibility {
            self.visibility = visibility;
            self.source.set_visibility(visibility);
        }
    }

    /// How the session ended (or will end, once `running` is false).
    pub fn exit(&self) -> Exit {
        self.exit
    }

    /// Quit and log out.
    pub fn request_logout(&mut self) {
        self.exit = Exit::Logout;
        self.running = false;
    }

    /// Toggle help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Quit the application.
    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Field, Locale};
    use crate::source::ChannelSource;
    use focuswatch_types::{FocusStatus, GazeStatus, StatusSnapshot};
    use tokio::sync::mpsc;

    fn snapshot(score: u32) -> StatusSnapshot {
        StatusSnapshot::new(FocusStatus::Focusing, score, GazeStatus::Center, true)
    }

    fn app() -> (mpsc::UnboundedSender<PollEvent>, App) {
        let (tx, source) = ChannelSource::create("test");
        let board = StatusBoard::new(Locale::En, Duration::from_millis(500));
        let app = App::new(Box::new(source), Role::Child, "me", board, Theme::dark());
        (tx, app)
    }

    #[test]
    fn test_render_updates_board_and_history() {
        let (tx, mut app) = app();
        tx.send(PollEvent::Render(snapshot(82))).unwrap();
        tx.send(PollEvent::Render(snapshot(83))).unwrap();

        assert!(app.reload_data());
        assert_eq!(app.board.field(Field::Score).text, "83");
        assert_eq!(app.history.sparkline(), vec![82, 83]);
        assert!(!app.reload_data());
    }

    #[test]
    fn test_failures_are_tracked_until_next_render() {
        let (tx, mut app) = app();
        let error = FetchError::Transient { status: 503 };
        tx.send(PollEvent::Failure {
            error: error.clone(),
            consecutive: 1,
        })
        .unwrap();
        app.reload_data();
        assert_eq!(app.last_failure, Some((error, 1)));
        assert!(!app.board.in_error());

        tx.send(PollEvent::Render(snapshot(10))).unwrap();
        app.reload_data();
        assert!(app.last_failure.is_none());
    }

    #[test]
    fn test_render_error_shows_markers() {
        let (tx, mut app) = app();
        tx.send(PollEvent::RenderError(FetchError::Network("refused".into())))
            .unwrap();
        app.reload_data();
        assert!(app.board.in_error());
        assert_eq!(app.board.field(Field::Status).text, "Error");
    }

    #[test]
    fn test_redirect_stops_the_app() {
        let (tx, mut app) = app();
        tx.send(PollEvent::Redirect("/")).unwrap();
        tx.send(PollEvent::Render(snapshot(50))).unwrap();

        app.reload_data();
        assert!(!app.running);
        assert_eq!(app.exit(), Exit::SessionExpired("/"));
        // Nothing after the redirect is applied
        assert_eq!(app.board.field(Field::Score).text, "0");
    }

    #[test]
    fn test_logout_request() {
        let (_tx, mut app) = app();
        app.request_logout();
        assert!(!app.running);
        assert_eq!(app.exit(), Exit::Logout);
    }

    #[test]
    fn test_source_error_is_surfaced() {
        let (tx, mut app) = app();
        drop(tx);
        app.reload_data();
        assert_eq!(app.load_error.as_deref(), Some("Channel closed"));
    }
}
