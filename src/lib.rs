// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # focuswatch
//!
//! A terminal client for a concentration-monitoring service.
//!
//! A child's camera feed is analysed on the server; this crate polls the
//! resulting status (focus state, concentration score, gaze direction, face
//! detection) and shows it on a live dashboard. Parents can watch a linked
//! child the same way.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │ (board)  │    │(render) │    │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐                 │
//! │  │ source  │◀───│  poller  │───▶│   api   │◀── HTTP         │
//! │  │ (input) │    │ (timer)  │    │(client) │                 │
//! │  └─────────┘    └──────────┘    └─────────┘                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`poller`]**: The polling state machine, change detection and the
//!   single-timer tokio driver
//! - **[`api`]**: HTTP client for status, login, registration and logout, plus
//!   the persisted session cookie
//! - **[`source`]**: [`DataSource`] trait bridging poller events into the TUI
//! - **[`data`]**: The [`StatusBoard`] display model, score history and labels
//! - **[`ui`]**: Terminal rendering using ratatui
//! - **[`account`]**: Account forms and child-code validation
//! - **[`config`]**: Layered settings
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! focuswatch register alice --email a@example.com --region Seoul --school "Hana"
//! focuswatch watch
//!
//! focuswatch parent login --username mom
//! focuswatch parent watch STU-40fb-c5ff
//! ```
//!
//! ### As a library with a channel source
//!
//! ```
//! use std::time::Duration;
//! use focuswatch::{App, ChannelSource, Locale, Role, StatusBoard, Theme};
//!
//! let (tx, source) = ChannelSource::create("replay");
//! let board = StatusBoard::new(Locale::En, Duration::from_millis(500));
//! let app = App::new(Box::new(source), Role::Child, "demo", board, Theme::dark());
//! ```
//!
//! ### Driving a poller yourself
//!
//! ```no_run
//! use focuswatch::api::{ApiClient, StatusEndpoint, StatusReader};
//! use focuswatch::config::PollSettings;
//! use focuswatch::poller::{Poller, PollerProfile};
//! use focuswatch::PollerSource;
//!
//! # tokio_test::block_on(async {
//! let client = ApiClient::builder().session_token("token").build().unwrap();
//! let reader = StatusReader::new(client, StatusEndpoint::Child);
//! let poller = Poller::new(reader, PollerProfile::child(&PollSettings::default()));
//! let source = PollerSource::spawn(poller);
//! # });
//! ```

pub mod account;
pub mod api;
pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod logging;
pub mod poller;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use api::{ApiClient, Role, SessionStore, StatusEndpoint, StatusReader};
pub use app::{App, Exit};
pub use config::Settings;
pub use data::{History, Locale, StatusBoard};
pub use error::{ApiError, FetchError, ValidationError};
pub use poller::{PollEvent, Poller, PollerProfile, StatusFetcher, StatusSink, Visibility};
pub use source::{ChannelSource, DataSource, PollerSource};
pub use ui::Theme;

pub use focuswatch_types::{FocusStatus, GazeStatus, StatusPayload, StatusSnapshot};
