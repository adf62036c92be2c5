//! Status snapshot and its wire envelope.

use alloc::string::String;

use crate::{FocusStatus, GazeStatus, MAX_CONCENTRATION_SCORE};

/// The last-known detection status for one monitored child.
///
/// Snapshots are replaced wholesale; no field is ever updated on its own.
/// Equality is strict per field, so a score of `82` and a score of `83` are
/// different snapshots even when every label is the same.
///
/// # Example
///
/// ```rust
/// use focuswatch_types::{FocusStatus, GazeStatus, StatusSnapshot};
///
/// let snapshot = StatusSnapshot::new(FocusStatus::NotFocusing, 140, GazeStatus::Left, true);
///
/// // Progress width is clamped, the raw score is not
/// assert_eq!(snapshot.concentration_score, 140);
/// assert_eq!(snapshot.progress_percent(), 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusSnapshot {
    /// Concentration classification.
    pub status: FocusStatus,

    /// Concentration score, nominally 0-100.
    pub concentration_score: u32,

    /// Gaze direction classification.
    pub gaze_status: GazeStatus,

    /// Whether a face was found in the latest frame.
    pub face_detected: bool,
}

impl StatusSnapshot {
    /// Create a snapshot from its four fields.
    pub fn new(
        status: FocusStatus,
        concentration_score: u32,
        gaze_status: GazeStatus,
        face_detected: bool,
    ) -> Self {
        Self {
            status,
            concentration_score,
            gaze_status,
            face_detected,
        }
    }

    /// Score as a progress-bar width in percent.
    pub fn progress_percent(&self) -> u16 {
        // Clamped to 100, so the cast cannot truncate
        self.concentration_score.min(MAX_CONCENTRATION_SCORE) as u16
    }
}

/// Response body of the status endpoints.
///
/// The child endpoint includes `face_detected`; the parent endpoint omits it,
/// in which case it decodes as `false`. Failed responses usually carry only
/// `success` and `message`, so every data field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusPayload {
    /// Whether the backend produced a status this time.
    pub success: bool,

    #[cfg_attr(feature = "serde", serde(default))]
    pub status: FocusStatus,

    #[cfg_attr(feature = "serde", serde(default))]
    pub concentration_score: u32,

    #[cfg_attr(feature = "serde", serde(default))]
    pub gaze_status: GazeStatus,

    #[cfg_attr(feature = "serde", serde(default))]
    pub face_detected: bool,

    /// Human-readable reason when `success` is false.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub message: Option<String>,
}

impl StatusPayload {
    /// Build a successful payload carrying the given snapshot.
    pub fn ok(snapshot: StatusSnapshot) -> Self {
        Self {
            success: true,
            status: snapshot.status,
            concentration_score: snapshot.concentration_score,
            gaze_status: snapshot.gaze_status,
            face_detected: snapshot.face_detected,
            message: None,
        }
    }

    /// Build an unsuccessful payload.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Extract the snapshot, or `None` when the backend reported `success: false`.
    pub fn into_snapshot(self) -> Option<StatusSnapshot> {
        if !self.success {
            return None;
        }
        Some(StatusSnapshot {
            status: self.status,
            concentration_score: self.concentration_score,
            gaze_status: self.gaze_status,
            face_detected: self.face_detected,
        })
    }
}
