//! Native fallback path: the surface decodes the stream itself.

use tracing::debug;

use crate::{
    error::{ErrorCategory, PlaybackError},
    traits::surface::{RenderSurface, SurfaceEvent},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum NativeOutcome {
    /// Metadata loaded: stop loading and start playback.
    Ready,
    Fatal(PlaybackError),
    Ignored,
}

/// Source attached directly to the render surface.
#[derive(Debug, Default)]
pub struct NativeFallback {
    attached: bool,
}

impl NativeFallback {
    pub fn attach<S: RenderSurface>(url: &str, surface: &mut S) -> Self {
        surface.set_source(url);
        debug!(url, "native source attached");
        Self { attached: true }
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub(crate) fn on_surface_event(&self, event: &SurfaceEvent) -> NativeOutcome {
        if !self.attached {
            return NativeOutcome::Ignored;
        }
        match event {
            SurfaceEvent::LoadedMetadata => NativeOutcome::Ready,
            SurfaceEvent::Error { code, message } => {
                let code = code.map_or_else(|| "unknown".to_string(), |c| c.to_string());
                let message = message.as_deref().unwrap_or("unknown error");
                NativeOutcome::Fatal(PlaybackError::fatal(
                    ErrorCategory::Media,
                    format!(
                        "failed to load the stream (error code: {code}): {message}; check the \
                         URL and try again"
                    ),
                ))
            }
            _ => NativeOutcome::Ignored,
        }
    }

    /// Clear the surface source. Idempotent.
    pub fn detach<S: RenderSurface>(&mut self, surface: &mut S) {
        if self.attached {
            surface.clear_source();
            self.attached = false;
            debug!("native source detached");
        }
    }
}
