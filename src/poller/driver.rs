//! The poll loop.
//!
//! One tokio task per poller. The task owns exactly one timer, a pinned
//! [`tokio::time::Sleep`], which is reset in place whenever the next deadline
//! changes; there is never a second timer to cancel. A cycle awaits its
//! request before the timer is re-armed, so a poller has at most one request
//! in flight.

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, Instant};
use tracing::{debug, info};

use super::machine::{CycleOutcome, Poller, VisibilityChange};
use super::profile::Visibility;
use super::{PollEvent, StatusFetcher, StatusSink};

/// Drive `poller` until the session expires, the sink closes, or the task is
/// aborted. The first cycle runs immediately.
pub async fn run<F, S>(mut poller: Poller<F>, mut sink: S, mut visibility: watch::Receiver<Visibility>)
where
    F: StatusFetcher,
    S: StatusSink,
{
    let timer = time::sleep(Duration::ZERO);
    tokio::pin!(timer);
    let mut watching_visibility = true;

    info!(
        poller = poller.profile().name,
        interval_ms = poller.profile().interval.as_millis() as u64,
        "Poller started"
    );

    loop {
        tokio::select! {
            () = &mut timer => {
                if poller.cycle(&mut sink).await == CycleOutcome::SessionExpired {
                    break;
                }
                if sink.is_closed() {
                    debug!(poller = poller.profile().name, "Sink closed");
                    break;
                }
                timer.as_mut().reset(Instant::now() + poller.cadence());
            }
            changed = visibility.changed(), if watching_visibility => {
                if changed.is_err() {
                    watching_visibility = false;
                    continue;
                }
                let current = *visibility.borrow_and_update();
                match poller.set_visibility(current) {
                    VisibilityChange::PollNow => timer.as_mut().reset(Instant::now()),
                    VisibilityChange::Background => {
                        timer.as_mut().reset(Instant::now() + poller.cadence())
                    }
                    VisibilityChange::Ignored => {}
                }
            }
        }
    }

    info!(poller = poller.profile().name, "Poller stopped");
}

/// A running poller task.
///
/// Dropping the handle aborts the task.
#[derive(Debug)]
pub struct PollerHandle {
    visibility: watch::Sender<Visibility>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Tell the poller whether its view is in the foreground.
    pub fn set_visibility(&self, visibility: Visibility) {
        self.visibility.send_if_modified(|current| {
            let changed = *current != visibility;
            *current = visibility;
            changed
        });
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawn `poller` on the current runtime. Its side effects arrive on the
/// returned receiver.
pub fn spawn<F>(poller: Poller<F>) -> (PollerHandle, mpsc::UnboundedReceiver<PollEvent>)
where
    F: StatusFetcher + 'static,
{
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let (visibility_tx, visibility_rx) = watch::channel(Visibility::Visible);

    let task = tokio::spawn(run(poller, events_tx, visibility_rx));

    (
        PollerHandle {
            visibility: visibility_tx,
            task,
        },
        events_rx,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PollSettings;
    use crate::error::FetchError;
    use crate::poller::testing::*;
    use crate::poller::PollerProfile;

    fn drain(rx: &mut mpsc::UnboundedReceiver<PollEvent>) -> Vec<PollEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    async fn advance_to(start: Instant, ms: u64) {
        time::sleep_until(start + Duration::from_millis(ms)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_polls_at_normal_cadence() {
        let fetcher = ScriptedFetcher::always(ok(focusing(70)));
        let poller = Poller::new(fetcher.clone(), PollerProfile::child(&PollSettings::default()));
        let start = Instant::now();
        let (_handle, mut rx) = spawn(poller);

        advance_to(start, 3500).await;
        // t = 0, 1000, 2000, 3000
        assert_eq!(fetcher.calls(), 4);
        assert_eq!(renders(&drain(&mut rx)), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_degrades_cadence_after_threshold() {
        let fetcher = ScriptedFetcher::always(server_error());
        let poller = Poller::new(fetcher.clone(), PollerProfile::child(&PollSettings::default()));
        let start = Instant::now();
        let (_handle, mut rx) = spawn(poller);

        advance_to(start, 2500).await;
        // t = 0, 1000, 2000; the third failure degrades
        assert_eq!(fetcher.calls(), 3);

        advance_to(start, 4900).await;
        assert_eq!(fetcher.calls(), 3);

        advance_to(start, 5100).await;
        assert_eq!(fetcher.calls(), 4);

        let events = drain(&mut rx);
        assert_eq!(error_renders(&events), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovery_restores_normal_cadence() {
        let fetcher = ScriptedFetcher::new(
            vec![server_error(), server_error(), server_error()],
            ok(focusing(60)),
        );
        let poller = Poller::new(fetcher.clone(), PollerProfile::child(&PollSettings::default()));
        let start = Instant::now();
        let (_handle, _rx) = spawn(poller);

        // Failures at 0, 1000, 2000; success at 5000; then back to 1s steps
        advance_to(start, 5100).await;
        assert_eq!(fetcher.calls(), 4);

        advance_to(start, 6100).await;
        assert_eq!(fetcher.calls(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_expiry_stops_the_task() {
        let fetcher = ScriptedFetcher::always(Err(FetchError::SessionExpired));
        let poller = Poller::new(fetcher.clone(), PollerProfile::child(&PollSettings::default()));
        let start = Instant::now();
        let (handle, mut rx) = spawn(poller);

        advance_to(start, 10_000).await;
        handle.set_visibility(Visibility::Hidden);
        handle.set_visibility(Visibility::Visible);
        advance_to(start, 20_000).await;

        assert_eq!(fetcher.calls(), 1);
        assert!(handle.is_finished());
        assert_eq!(drain(&mut rx), vec![PollEvent::Redirect("/")]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hidden_slows_and_visible_polls_immediately() {
        let fetcher = ScriptedFetcher::always(ok(focusing(70)));
        let poller = Poller::new(fetcher.clone(), PollerProfile::child(&PollSettings::default()));
        let start = Instant::now();
        let (handle, _rx) = spawn(poller);

        advance_to(start, 500).await;
        assert_eq!(fetcher.calls(), 1);

        handle.set_visibility(Visibility::Hidden);
        // Rescheduled to 500 + 3000
        advance_to(start, 3400).await;
        assert_eq!(fetcher.calls(), 1);

        handle.set_visibility(Visibility::Visible);
        advance_to(start, 3450).await;
        assert_eq!(fetcher.calls(), 2);

        // Normal cadence again from the immediate poll
        advance_to(start, 4500).await;
        assert_eq!(fetcher.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_parent_poller_ignores_visibility() {
        let fetcher = ScriptedFetcher::always(ok(focusing(70)));
        let poller = Poller::new(fetcher.clone(), PollerProfile::parent(&PollSettings::default()));
        let start = Instant::now();
        let (handle, _rx) = spawn(poller);

        advance_to(start, 100).await;
        handle.set_visibility(Visibility::Hidden);
        handle.set_visibility(Visibility::Visible);

        advance_to(start, 2900).await;
        assert_eq!(fetcher.calls(), 1);

        advance_to(start, 6100).await;
        // t = 0, 3000, 6000
        assert_eq!(fetcher.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_when_receiver_dropped() {
        let fetcher = ScriptedFetcher::always(ok(focusing(70)));
        let poller = Poller::new(fetcher.clone(), PollerProfile::child(&PollSettings::default()));
        let start = Instant::now();
        let (handle, rx) = spawn(poller);

        advance_to(start, 500).await;
        drop(rx);
        advance_to(start, 5000).await;

        // The 1000ms cycle notices the closed sink and ends the task
        assert_eq!(fetcher.calls(), 2);
        assert!(handle.is_finished());
    }
}
