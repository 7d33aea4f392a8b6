//! Shared helpers for the workspace integration tests.

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Serve `router` on an ephemeral localhost port until `shutdown` fires and
/// return its origin URL.
///
/// # Panics
///
/// Panics if no localhost port can be bound.
pub async fn serve_upstream(router: Router, shutdown: &CancellationToken) -> Url {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .expect("bind upstream listener");
    let addr = listener.local_addr().expect("upstream address");
    let stop = shutdown.clone().cancelled_owned();
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router)
            .with_graceful_shutdown(stop)
            .await
        {
            eprintln!("upstream stopped: {e}");
        }
    });
    Url::parse(&format!("http://{addr}")).expect("upstream origin URL")
}
