//! Source backed by a spawned poller task.

use tokio::sync::mpsc::{self, error::TryRecvError};

use super::DataSource;
use crate::poller::{self, PollEvent, Poller, PollerHandle, StatusFetcher, Visibility};

/// Runs a [`Poller`] on the tokio runtime and hands its events to the TUI.
///
/// Dropping the source stops the poller.
#[derive(Debug)]
pub struct PollerSource {
    handle: PollerHandle,
    events: mpsc::UnboundedReceiver<PollEvent>,
    description: String,
    error: Option<String>,
}

impl PollerSource {
    /// Spawn `poller` on the current runtime.
    ///
    /// Must be called from within a tokio runtime context.
    pub fn spawn<F>(poller: Poller<F>) -> Self
    where
        F: StatusFetcher + 'static,
    {
        let description = poller.describe();
        let (handle, events) = poller::spawn(poller);
        Self {
            handle,
            events,
            description,
            error: None,
        }
    }

    /// Whether the poller task has ended.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl DataSource for PollerSource {
    fn poll(&mut self) -> Option<PollEvent> {
        match self.events.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                if self.error.is_none() {
                    self.error = Some("Poller stopped".to_string());
                }
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn set_visibility(&mut self, visibility: Visibility) {
        self.handle.set_visibility(visibility);
    }
}
