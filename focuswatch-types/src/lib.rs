//! # focuswatch-types
//!
//! Core types for the concentration monitoring service. This crate defines
//! the status schema reported by the detection backend and consumed by the
//! focuswatch client.
//!
//! ## Design Goals
//!
//! - **Zero required dependencies**: Core types work without any serialization framework
//! - **Optional serialization**: Enable the `serde` feature to decode the JSON wire format
//! - **Lossless classifications**: Status and gaze strings the client does not know
//!   are kept verbatim rather than collapsed, so two different unknown values still
//!   compare as different
//!
//! ## Features
//!
//! - `std` (default): Standard library support
//! - `serde`: JSON serialization via serde
//!
//! ## Example
//!
//! ```rust
//! use focuswatch_types::{FocusStatus, GazeStatus, StatusSnapshot};
//!
//! let snapshot = StatusSnapshot::new(FocusStatus::Focusing, 82, GazeStatus::Center, true);
//!
//! assert_eq!(snapshot.progress_percent(), 82);
//! assert_eq!(FocusStatus::from("Partially focusing"), FocusStatus::PartiallyFocusing);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod snapshot;
mod status;

pub use snapshot::*;
pub use status::*;

/// Highest concentration score the backend reports.
pub const MAX_CONCENTRATION_SCORE: u32 = 100;
