//! Platform-aware timers and task spawning.
//!
//! On native: delegates to tokio. [`spawn`] needs an entered runtime and
//! reports `false` instead of panicking when there is none.
//!
//! On wasm32: tasks run on the browser microtask queue via
//! `wasm_bindgen_futures::spawn_local`, sleeping through `gloo_timers`.

use std::{future::Future, time::Duration};

use crate::MaybeSend;

/// Sleep for `duration`.
#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

/// Sleep for `duration`.
#[cfg(target_arch = "wasm32")]
pub async fn sleep(duration: Duration) {
    let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
    gloo_timers::future::TimeoutFuture::new(millis).await;
}

/// Spawn a detached background task.
///
/// Returns `false` when no executor is available to run it.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn<F>(future: F) -> bool
where
    F: Future<Output = ()> + MaybeSend + 'static,
{
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            drop(handle.spawn(future));
            true
        }
        Err(e) => {
            tracing::warn!(%e, "no tokio runtime, task not spawned");
            false
        }
    }
}

/// Spawn a detached background task.
#[cfg(target_arch = "wasm32")]
pub fn spawn<F>(future: F) -> bool
where
    F: Future<Output = ()> + MaybeSend + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
    true
}
