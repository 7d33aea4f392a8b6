//! All integration tests for aulos
#![expect(
    clippy::unwrap_used,
    reason = "integration test crate, unwraps are acceptable in test code"
)]

mod common;
mod deck_flow;
mod proxy_round_trip;
mod session_lifecycle;
