//! Platform-aware primitives for native and wasm32 targets.
//!
//! # Conditional trait bounds
//!
//! [`MaybeSend`] equals `Send` on native targets and is blanket-implemented
//! for every type on wasm32, where capability handles (media elements, engine
//! bindings) are `!Send` JS references. It cannot follow `dyn Trait +`.
//!
//! # Scheduling
//!
//! [`time::sleep`] and [`time::spawn`] run on tokio natively and on the
//! browser event loop on wasm32.

pub mod time;

pub use parking_lot::Mutex;

#[cfg(not(target_arch = "wasm32"))]
pub trait MaybeSend: Send {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Send> MaybeSend for T {}

#[cfg(target_arch = "wasm32")]
pub trait MaybeSend {}
#[cfg(target_arch = "wasm32")]
impl<T> MaybeSend for T {}
