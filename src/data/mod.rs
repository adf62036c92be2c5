//! Display models for the status dashboard.
//!
//! ## Submodules
//!
//! - [`board`]: The fields on screen and which of them are pulsing
//! - [`history`]: Recent scores for the sparkline and average
//! - [`labels`]: Per-locale text for statuses, markers and messages
//!
//! ## Data Flow
//!
//! ```text
//! PollEvent::Render(StatusSnapshot)
//!        │
//!        ├──▶ StatusBoard::render() (only changed fields, with pulse)
//!        │
//!        └──▶ History::record() (for the sparkline)
//! ```

pub mod board;
pub mod history;
pub mod labels;

pub use board::{Field, FieldView, StatusBoard, Tone};
pub use history::History;
pub use labels::{Action, Locale};
