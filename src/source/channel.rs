//! Channel-based data source.
//!
//! Receives poller events pushed through a tokio mpsc channel. The sending
//! half implements [`StatusSink`](crate::poller::StatusSink), so it can be
//! handed straight to [`crate::poller::run`] when the caller wants to own
//! the poller task itself.

use tokio::sync::mpsc::{self, error::TryRecvError};

use super::DataSource;
use crate::poller::PollEvent;

/// A data source that receives poller events via a channel.
///
/// # Example
///
/// ```
/// use focuswatch::ChannelSource;
///
/// let (tx, source) = ChannelSource::create("replay");
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: mpsc::UnboundedReceiver<PollEvent>,
    description: String,
    disconnected: bool,
}

impl ChannelSource {
    /// Create a new channel source.
    pub fn new(receiver: mpsc::UnboundedReceiver<PollEvent>, source_description: &str) -> Self {
        Self {
            receiver,
            description: format!("channel: {}", source_description),
            disconnected: false,
        }
    }

    /// Create a channel pair for pushing events to a ChannelSource.
    pub fn create(source_description: &str) -> (mpsc::UnboundedSender<PollEvent>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self::new(rx, source_description))
    }
}

impl DataSource for ChannelSource {
    fn poll(&mut self) -> Option<PollEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.disconnected = true;
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.disconnected.then_some("Channel closed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use focuswatch_types::{FocusStatus, GazeStatus, StatusSnapshot};

    #[test]
    fn test_channel_source_poll() {
        let (tx, mut source) = ChannelSource::create("test");
        assert_eq!(source.description(), "channel: test");
        assert!(source.poll().is_none());

        let snapshot = StatusSnapshot::new(FocusStatus::NoFace, 0, GazeStatus::Unknown, false);
        tx.send(PollEvent::Render(snapshot.clone())).unwrap();
        tx.send(PollEvent::Redirect("/")).unwrap();

        assert_eq!(source.poll(), Some(PollEvent::Render(snapshot)));
        assert_eq!(source.poll(), Some(PollEvent::Redirect("/")));
        assert!(source.poll().is_none());
        assert!(source.error().is_none());
    }

    #[test]
    fn test_channel_source_reports_closed() {
        let (tx, mut source) = ChannelSource::create("test");
        drop(tx);
        assert!(source.poll().is_none());
        assert_eq!(source.error(), Some("Channel closed"));
    }
}
