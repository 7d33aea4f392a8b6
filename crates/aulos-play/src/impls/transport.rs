//! Imperative transport commands against the render surface.

use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::{
    events::SessionEvent,
    impls::session::TrackedSession,
    traits::surface::RenderSurface,
    types::Notice,
};

/// Transport controls borrowed from a [`SessionController`](crate::SessionController).
///
/// Commands go straight to the surface. Volume and rejected plays are also
/// mirrored into the active session right away.
pub struct Transport<'a, S: RenderSurface> {
    surface: &'a mut S,
    session: Option<&'a mut TrackedSession>,
    events_tx: &'a broadcast::Sender<SessionEvent>,
}

impl<'a, S: RenderSurface> Transport<'a, S> {
    pub(crate) fn new(
        surface: &'a mut S,
        session: Option<&'a mut TrackedSession>,
        events_tx: &'a broadcast::Sender<SessionEvent>,
    ) -> Self {
        Self {
            surface,
            session,
            events_tx,
        }
    }

    /// Toggle playback based on the surface's own paused flag.
    pub fn play_pause(&mut self) {
        if !self.surface.is_paused() {
            self.surface.pause();
            return;
        }
        if let Err(e) = self.surface.play() {
            warn!(%e, "play rejected");
            if let Some(tracked) = self.session.as_deref_mut() {
                tracked.session.is_playing = false;
                tracked.publish_changes(self.events_tx);
            }
        }
    }

    /// Move the playhead. Range handling is left to the surface.
    pub fn seek(&mut self, seconds: f64) {
        debug!(seconds, "seek");
        self.surface.set_current_time(seconds);
    }

    pub fn set_volume(&mut self, volume: f64) {
        self.surface.set_volume(volume);
        if let Some(tracked) = self.session.as_deref_mut() {
            tracked.session.volume = volume.clamp(0.0, 1.0);
            tracked.publish_changes(self.events_tx);
        }
    }

    /// Mute when audible, restore full volume when muted. Returns the new volume.
    pub fn toggle_mute(&mut self) -> f64 {
        let current = self
            .session
            .as_deref()
            .map_or_else(|| self.surface.volume(), |tracked| tracked.session.volume);
        let next = if current > 0.0 { 0.0 } else { 1.0 };
        self.set_volume(next);
        next
    }

    /// Enter fullscreen, or leave it when already there.
    ///
    /// A refused request comes back as a [`Notice`], never as a playback error.
    pub fn toggle_fullscreen(&mut self) -> Option<Notice> {
        if self.surface.is_fullscreen() {
            self.surface.exit_fullscreen();
            return None;
        }
        let Err(e) = self.surface.request_fullscreen() else {
            return None;
        };
        warn!(%e, "fullscreen refused");
        let notice = Notice::new(format!("could not enable fullscreen: {e}"));
        let _ = self.events_tx.send(SessionEvent::Notice(notice.clone()));
        Some(notice)
    }
}
