//! Test doubles for the poller.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use focuswatch_types::{FocusStatus, GazeStatus, StatusPayload, StatusSnapshot};

use super::{PollEvent, StatusFetcher, StatusSink};
use crate::error::FetchError;

/// Fetcher that replays a script; once exhausted it repeats `fallback`.
#[derive(Debug, Clone)]
pub struct ScriptedFetcher {
    script: Arc<Mutex<VecDeque<Result<StatusPayload, FetchError>>>>,
    fallback: Result<StatusPayload, FetchError>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedFetcher {
    pub fn new(
        script: Vec<Result<StatusPayload, FetchError>>,
        fallback: Result<StatusPayload, FetchError>,
    ) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into())),
            fallback,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Always answers with `result`.
    pub fn always(result: Result<StatusPayload, FetchError>) -> Self {
        Self::new(Vec::new(), result)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatusFetcher for ScriptedFetcher {
    async fn fetch(&self) -> Result<StatusPayload, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| self.fallback.clone())
    }

    fn describe(&self) -> String {
        "scripted".to_string()
    }
}

impl StatusSink for Vec<PollEvent> {
    fn render(&mut self, snapshot: &StatusSnapshot) {
        self.push(PollEvent::Render(snapshot.clone()));
    }

    fn render_error(&mut self, error: &FetchError) {
        self.push(PollEvent::RenderError(error.clone()));
    }

    fn redirect(&mut self, entry: &'static str) {
        self.push(PollEvent::Redirect(entry));
    }

    fn failure(&mut self, error: &FetchError, consecutive: u32) {
        self.push(PollEvent::Failure {
            error: error.clone(),
            consecutive,
        });
    }
}

pub fn focusing(score: u32) -> StatusSnapshot {
    StatusSnapshot::new(FocusStatus::Focusing, score, GazeStatus::Center, true)
}

pub fn ok(snapshot: StatusSnapshot) -> Result<StatusPayload, FetchError> {
    Ok(StatusPayload::ok(snapshot))
}

pub fn server_error() -> Result<StatusPayload, FetchError> {
    Err(FetchError::Transient { status: 500 })
}

pub fn renders(events: &[PollEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, PollEvent::Render(_)))
        .count()
}

pub fn error_renders(events: &[PollEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, PollEvent::RenderError(_)))
        .count()
}
