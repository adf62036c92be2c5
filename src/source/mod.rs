//! Data source abstraction for receiving poller events.
//!
//! The TUI loop is synchronous: it drains whatever events are ready between
//! frames and never waits on the network. Sources bridge that loop to the
//! async pollers.

mod channel;
mod poller;

pub use channel::ChannelSource;
pub use poller::PollerSource;

use std::fmt::Debug;

use crate::poller::{PollEvent, Visibility};

/// Trait for receiving poller events from various sources.
///
/// # Example
///
/// ```
/// use focuswatch::{ChannelSource, DataSource};
///
/// let (_tx, mut source) = ChannelSource::create("demo");
/// assert!(source.poll().is_none());
/// ```
pub trait DataSource: Send + Debug {
    /// Take the next pending event.
    ///
    /// Returns `None` when nothing is waiting. Never blocks.
    fn poll(&mut self) -> Option<PollEvent>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;

    /// Returns a message if the source has stopped delivering events.
    fn error(&self) -> Option<&str>;

    /// Forward a foreground/background change to the poller, if any.
    fn set_visibility(&mut self, _visibility: Visibility) {}
}
