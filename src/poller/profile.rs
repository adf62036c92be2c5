//! Per-view poller parameters.

use std::time::Duration;

use crate::api::Role;
use crate::config::PollSettings;

/// Whether the hosting view is in the foreground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

/// What distinguishes one poller instance from another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollerProfile {
    /// Short label used in logs.
    pub name: &'static str,
    /// Cadence while healthy and visible.
    pub interval: Duration,
    /// Cadence while degraded or hidden.
    pub slow_interval: Duration,
    /// Consecutive failures that trigger the error state. `None` disables it.
    pub max_errors: Option<u32>,
    /// Whether visibility changes affect cadence.
    pub visibility_aware: bool,
    /// Where to send the user when the session expires.
    pub entry: &'static str,
}

impl PollerProfile {
    /// The child's own dashboard: fast cadence, escalation and visibility handling.
    pub fn child(settings: &PollSettings) -> Self {
        Self {
            name: "child",
            interval: settings.interval(),
            slow_interval: settings.degraded_interval(),
            max_errors: Some(settings.max_errors.max(1)),
            visibility_aware: true,
            entry: Role::Child.entry_path(),
        }
    }

    /// A parent watching one child: fixed cadence, no escalation, no visibility handling.
    pub fn parent(settings: &PollSettings) -> Self {
        Self {
            name: "parent",
            interval: settings.parent_interval(),
            slow_interval: settings.parent_interval(),
            max_errors: None,
            visibility_aware: false,
            entry: Role::Parent.entry_path(),
        }
    }
}
