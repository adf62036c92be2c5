//! Focus and gaze classifications produced by the detection backend.

use alloc::string::{String, ToString};
use core::fmt;

/// Concentration classification for the monitored child.
///
/// Values the client does not recognise are kept in [`FocusStatus::Unrecognized`]
/// with the original wire string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum FocusStatus {
    Focusing,
    PartiallyFocusing,
    NotFocusing,
    NoFace,
    #[default]
    Unknown,
    Unrecognized(String),
}

impl FocusStatus {
    /// The wire string for this status.
    pub fn as_str(&self) -> &str {
        match self {
            FocusStatus::Focusing => "Focusing",
            FocusStatus::PartiallyFocusing => "Partially focusing",
            FocusStatus::NotFocusing => "Not focusing",
            FocusStatus::NoFace => "No Face",
            FocusStatus::Unknown => "Unknown",
            FocusStatus::Unrecognized(raw) => raw,
        }
    }
}

impl From<&str> for FocusStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "Focusing" => FocusStatus::Focusing,
            "Partially focusing" => FocusStatus::PartiallyFocusing,
            "Not focusing" => FocusStatus::NotFocusing,
            "No Face" => FocusStatus::NoFace,
            "Unknown" => FocusStatus::Unknown,
            other => FocusStatus::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for FocusStatus {
    fn from(raw: String) -> Self {
        match FocusStatus::from(raw.as_str()) {
            FocusStatus::Unrecognized(_) => FocusStatus::Unrecognized(raw),
            known => known,
        }
    }
}

impl From<FocusStatus> for String {
    fn from(status: FocusStatus) -> Self {
        match status {
            FocusStatus::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for FocusStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse head/eye direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum GazeStatus {
    Center,
    Left,
    Right,
    Up,
    Down,
    #[default]
    Unknown,
    Unrecognized(String),
}

impl GazeStatus {
    /// The wire string for this direction.
    pub fn as_str(&self) -> &str {
        match self {
            GazeStatus::Center => "Center",
            GazeStatus::Left => "Left",
            GazeStatus::Right => "Right",
            GazeStatus::Up => "Up",
            GazeStatus::Down => "Down",
            GazeStatus::Unknown => "Unknown",
            GazeStatus::Unrecognized(raw) => raw,
        }
    }
}

impl From<&str> for GazeStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "Center" => GazeStatus::Center,
            "Left" => GazeStatus::Left,
            "Right" => GazeStatus::Right,
            "Up" => GazeStatus::Up,
            "Down" => GazeStatus::Down,
            "Unknown" => GazeStatus::Unknown,
            other => GazeStatus::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for GazeStatus {
    fn from(raw: String) -> Self {
        match GazeStatus::from(raw.as_str()) {
            GazeStatus::Unrecognized(_) => GazeStatus::Unrecognized(raw),
            known => known,
        }
    }
}

impl From<GazeStatus> for String {
    fn from(gaze: GazeStatus) -> Self {
        match gaze {
            GazeStatus::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for GazeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
