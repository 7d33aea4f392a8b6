//! Controls auto-hide.
//!
//! Controls are shown on pointer movement and hidden after a delay of
//! inactivity while playing. The delay runs as a single owned task guarded
//! by a [`CancellationToken`]; every re-arm and every teardown cancels the
//! previous one, so a stale timer can never hide controls.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use aulos_platform::time;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::events::SessionEvent;

/// Pending hide. Cancelled on drop.
#[derive(Debug)]
struct HideTimer {
    cancel: CancellationToken,
}

impl HideTimer {
    fn schedule(
        delay: Duration,
        visible: Arc<AtomicBool>,
        events_tx: broadcast::Sender<SessionEvent>,
    ) -> Option<Self> {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let spawned = time::spawn(async move {
            tokio::select! {
                biased;
                () = token.cancelled() => {
                    trace!("hide timer cancelled");
                }
                () = time::sleep(delay) => {
                    if visible.swap(false, Ordering::SeqCst) {
                        trace!("controls hidden");
                        let _ = events_tx.send(SessionEvent::ControlsVisibilityChanged {
                            visible: false,
                        });
                    }
                }
            }
        });
        spawned.then_some(Self { cancel })
    }
}

impl Drop for HideTimer {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Visibility of the transport controls.
#[derive(Debug)]
pub struct ControlsVisibility {
    delay: Duration,
    events_tx: broadcast::Sender<SessionEvent>,
    timer: Option<HideTimer>,
    visible: Arc<AtomicBool>,
}

impl ControlsVisibility {
    pub(crate) fn new(delay: Duration, events_tx: broadcast::Sender<SessionEvent>) -> Self {
        Self {
            delay,
            events_tx,
            timer: None,
            visible: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Whether controls should be drawn. Always `true` while paused.
    #[must_use]
    pub fn is_visible(&self, playing: bool) -> bool {
        !playing || self.visible.load(Ordering::SeqCst)
    }

    /// Show controls and, while playing, re-arm the hide timer.
    pub fn pointer_moved(&mut self, playing: bool) {
        self.cancel();
        self.show();
        if playing {
            self.timer = HideTimer::schedule(
                self.delay,
                Arc::clone(&self.visible),
                self.events_tx.clone(),
            );
        }
    }

    /// Hide immediately when the pointer leaves during playback.
    pub fn pointer_left(&mut self, playing: bool) {
        if playing {
            self.cancel();
            self.hide();
        }
    }

    /// Cancel any pending hide and show controls.
    pub fn reset(&mut self) {
        self.cancel();
        self.show();
    }

    /// Whether a hide is pending.
    #[must_use]
    pub fn has_pending_hide(&self) -> bool {
        self.timer
            .as_ref()
            .is_some_and(|timer| !timer.cancel.is_cancelled())
    }

    fn cancel(&mut self) {
        self.timer = None;
    }

    fn show(&self) {
        if !self.visible.swap(true, Ordering::SeqCst) {
            let _ = self
                .events_tx
                .send(SessionEvent::ControlsVisibilityChanged { visible: true });
        }
    }

    fn hide(&self) {
        if self.visible.swap(false, Ordering::SeqCst) {
            let _ = self
                .events_tx
                .send(SessionEvent::ControlsVisibilityChanged { visible: false });
        }
    }
}
