#![forbid(unsafe_code)]

//! Routing stream URLs through a CORS-relaxing reverse proxy.
//!
//! [`ProxyRewrite`] maps a stream URL onto the proxy. With the `server`
//! feature (default) the crate also ships the proxy itself, an axum router
//! that forwards `GET /proxy/{*path}` to a fixed upstream origin.

mod rewrite;

#[cfg(feature = "server")]
mod error;
#[cfg(feature = "server")]
mod server;

pub use rewrite::{DEFAULT_PROXY_BASE, ProxyRewrite};

#[cfg(feature = "server")]
pub use error::{ProxyError, ProxyResult};
#[cfg(feature = "server")]
pub use server::{DEFAULT_PORT, DEFAULT_TARGET, ProxyConfig, ProxyServer, router};
