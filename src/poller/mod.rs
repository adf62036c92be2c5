//! The status poller.
//!
//! A poller repeatedly reads one status endpoint, compares the result with
//! the last snapshot it rendered, and only calls the render step when
//! something changed. Repeated failures slow it down and put an error state on
//! screen; an expired session stops it for good.
//!
//! ## Submodules
//!
//! - [`change`]: the pure snapshot comparison
//! - [`profile`]: per-view parameters ([`PollerProfile::child`], [`PollerProfile::parent`])
//! - [`machine`]: the [`Poller`] state machine, one cycle at a time
//! - [`driver`]: the tokio task that owns the single timer
//!
//! ## Cycle
//!
//! ```text
//!   Idle ──timer──▶ Polling ──┬─ 401 ────────────▶ SessionExpired (terminal, redirect once)
//!    ▲                        ├─ unchanged ──────▶ Idle
//!    │                        ├─ changed ────────▶ render ─▶ Idle
//!    │                        ├─ failure < max ──▶ Idle
//!    └──── reschedule ◀───────┴─ failure = max ──▶ render error, slow cadence ─▶ Idle
//! ```

pub mod change;
pub mod driver;
pub mod machine;
pub mod profile;

#[cfg(test)]
pub(crate) mod testing;

pub use change::has_changed;
pub use driver::{run, spawn, PollerHandle};
pub use machine::{CycleOutcome, PollPhase, Poller, VisibilityChange};
pub use profile::{PollerProfile, Visibility};

use async_trait::async_trait;
use tokio::sync::mpsc;

use focuswatch_types::{StatusPayload, StatusSnapshot};

use crate::error::FetchError;

/// Reads one status payload from somewhere.
#[async_trait]
pub trait StatusFetcher: Send + Sync {
    async fn fetch(&self) -> Result<StatusPayload, FetchError>;

    /// Human-readable description of what is being polled.
    fn describe(&self) -> String;
}

/// Receives the poller's side effects.
pub trait StatusSink: Send {
    /// A changed snapshot should be shown.
    fn render(&mut self, snapshot: &StatusSnapshot);

    /// The failure threshold was reached; show the error state.
    fn render_error(&mut self, error: &FetchError);

    /// The session is gone; send the user to `entry`.
    fn redirect(&mut self, entry: &'static str);

    /// A poll failed. Called for every failure, before any error render.
    fn failure(&mut self, _error: &FetchError, _consecutive: u32) {}

    /// Whether nobody is listening any more.
    fn is_closed(&self) -> bool {
        false
    }
}

/// A poller side effect, as sent across a channel.
#[derive(Debug, Clone, PartialEq)]
pub enum PollEvent {
    Render(StatusSnapshot),
    Failure { error: FetchError, consecutive: u32 },
    RenderError(FetchError),
    Redirect(&'static str),
}

impl StatusSink for mpsc::UnboundedSender<PollEvent> {
    fn render(&mut self, snapshot: &StatusSnapshot) {
        let _ = self.send(PollEvent::Render(snapshot.clone()));
    }

    fn render_error(&mut self, error: &FetchError) {
        let _ = self.send(PollEvent::RenderError(error.clone()));
    }

    fn redirect(&mut self, entry: &'static str) {
        let _ = self.send(PollEvent::Redirect(entry));
    }

    fn failure(&mut self, error: &FetchError, consecutive: u32) {
        let _ = self.send(PollEvent::Failure {
            error: error.clone(),
            consecutive,
        });
    }

    fn is_closed(&self) -> bool {
        mpsc::UnboundedSender::is_closed(self)
    }
}
