//! Poller state machine.

use std::time::Duration;

use tracing::{debug, info, warn};

use focuswatch_types::{StatusPayload, StatusSnapshot};

use super::change::has_changed;
use super::profile::{PollerProfile, Visibility};
use super::{StatusFetcher, StatusSink};
use crate::error::FetchError;

/// Where the poller is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollPhase {
    /// Waiting for the timer.
    Idle,
    /// A request is in flight.
    Polling,
    /// Terminal: the session expired and the redirect was issued.
    SessionExpired,
}

/// Result of one poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Fetched fine, nothing to render.
    Unchanged,
    /// Fetched a new snapshot and rendered it.
    Updated,
    /// The backend answered `success: false`; nothing was compared or counted.
    Skipped,
    /// A counted failure below the threshold, or past it once already degraded.
    Failed { consecutive: u32 },
    /// This failure reached the threshold; the error state was rendered.
    Degraded,
    /// The session expired. No further cycles will run.
    SessionExpired,
}

/// What a visibility change means for scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityChange {
    /// No effect on this poller.
    Ignored,
    /// Went to the background; keep waiting at the slow cadence.
    Background,
    /// Back in the foreground; poll right away.
    PollNow,
}

/// One poller instance.
///
/// Owns the last rendered snapshot and the consecutive-failure counter.
/// Nothing is shared between instances.
#[derive(Debug)]
pub struct Poller<F> {
    fetcher: F,
    profile: PollerProfile,
    phase: PollPhase,
    last: Option<StatusSnapshot>,
    failures: u32,
    degraded: bool,
    visibility: Visibility,
}

impl<F: StatusFetcher> Poller<F> {
    pub fn new(fetcher: F, profile: PollerProfile) -> Self {
        Self {
            fetcher,
            profile,
            phase: PollPhase::Idle,
            last: None,
            failures: 0,
            degraded: false,
            visibility: Visibility::Visible,
        }
    }

    /// What this poller reads, for display.
    pub fn describe(&self) -> String {
        format!("{} {}", self.profile.name, self.fetcher.describe())
    }

    pub fn profile(&self) -> &PollerProfile {
        &self.profile
    }

    pub fn phase(&self) -> PollPhase {
        self.phase
    }

    pub fn last_snapshot(&self) -> Option<&StatusSnapshot> {
        self.last.as_ref()
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.failures
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn is_halted(&self) -> bool {
        self.phase == PollPhase::SessionExpired
    }

    /// Delay until the next cycle should run.
    pub fn cadence(&self) -> Duration {
        let hidden = self.profile.visibility_aware && self.visibility == Visibility::Hidden;
        if self.degraded || hidden {
            self.profile.slow_interval
        } else {
            self.profile.interval
        }
    }

    /// Record a visibility change and say how the timer should react.
    pub fn set_visibility(&mut self, visibility: Visibility) -> VisibilityChange {
        if !self.profile.visibility_aware || self.is_halted() || self.visibility == visibility {
            return VisibilityChange::Ignored;
        }
        self.visibility = visibility;
        debug!(poller = self.profile.name, ?visibility, "Visibility changed");
        match visibility {
            Visibility::Hidden => VisibilityChange::Background,
            Visibility::Visible => VisibilityChange::PollNow,
        }
    }

    /// Run one cycle: fetch, then apply the result.
    ///
    /// After the session has expired this returns immediately without
    /// fetching or touching the sink.
    pub async fn cycle<S: StatusSink + ?Sized>(&mut self, sink: &mut S) -> CycleOutcome {
        if self.is_halted() {
            return CycleOutcome::SessionExpired;
        }
        self.phase = PollPhase::Polling;
        let result = self.fetcher.fetch().await;
        self.apply(result, sink)
    }

    /// Apply one fetch result.
    pub fn apply<S: StatusSink + ?Sized>(
        &mut self,
        result: Result<StatusPayload, FetchError>,
        sink: &mut S,
    ) -> CycleOutcome {
        if self.is_halted() {
            return CycleOutcome::SessionExpired;
        }

        let outcome = match result {
            Err(error) if !error.is_counted() => {
                info!(poller = self.profile.name, entry = self.profile.entry, "Session expired");
                self.phase = PollPhase::SessionExpired;
                sink.redirect(self.profile.entry);
                return CycleOutcome::SessionExpired;
            }
            Err(error) => self.on_failure(error, sink),
            Ok(payload) => match payload.into_snapshot() {
                Some(snapshot) => self.on_snapshot(snapshot, sink),
                None => {
                    debug!(poller = self.profile.name, "Backend reported no status");
                    CycleOutcome::Skipped
                }
            },
        };

        self.phase = PollPhase::Idle;
        outcome
    }

    fn on_snapshot<S: StatusSink + ?Sized>(
        &mut self,
        snapshot: StatusSnapshot,
        sink: &mut S,
    ) -> CycleOutcome {
        if self.failures > 0 {
            debug!(poller = self.profile.name, failures = self.failures, "Recovered");
        }
        self.failures = 0;

        // The error markers replaced every field on screen, so the first
        // snapshot after recovery is rendered even if it equals the last one.
        let recovering = std::mem::take(&mut self.degraded);

        if recovering || has_changed(self.last.as_ref(), &snapshot) {
            sink.render(&snapshot);
            self.last = Some(snapshot);
            CycleOutcome::Updated
        } else {
            CycleOutcome::Unchanged
        }
    }

    fn on_failure<S: StatusSink + ?Sized>(&mut self, error: FetchError, sink: &mut S) -> CycleOutcome {
        self.failures = self.failures.saturating_add(1);
        warn!(poller = self.profile.name, failures = self.failures, %error, "Status poll failed");
        sink.failure(&error, self.failures);

        match self.profile.max_errors {
            Some(max) if self.failures >= max && !self.degraded => {
                self.degraded = true;
                warn!(
                    poller = self.profile.name,
                    cadence_ms = self.profile.slow_interval.as_millis() as u64,
                    "Too many failures, slowing down"
                );
                sink.render_error(&error);
                CycleOutcome::Degraded
            }
            _ => CycleOutcome::Failed {
                consecutive: self.failures,
            },
        }
    }
}
