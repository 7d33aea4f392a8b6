use std::net::{IpAddr, Ipv4Addr};

use aulos_proxy::{ProxyConfig, ProxyServer};
use aulos_tests::serve_upstream;
use axum::{
    Router,
    extract::RawQuery,
    http::{StatusCode, header},
    routing::get,
};
use rstest::rstest;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::common::{cancel_token, tracing_setup};

const PLAYLIST: &str = "#EXTM3U\n#EXT-X-TARGETDURATION:4\n#EXTINF:4.0,\nseg0.ts\n#EXT-X-ENDLIST\n";

fn upstream() -> Router {
    Router::new()
        .route(
            "/videos/a/index.m3u8",
            get(|| async {
                (
                    [(header::CONTENT_TYPE, "application/vnd.apple.mpegurl")],
                    PLAYLIST,
                )
            }),
        )
        .route(
            "/echo",
            get(|RawQuery(query): RawQuery| async move { query.unwrap_or_default() }),
        )
}

async fn start_proxy(target: &str, shutdown: &CancellationToken) -> String {
    let config = ProxyConfig::default()
        .with_host(IpAddr::V4(Ipv4Addr::LOCALHOST))
        .with_port(0)
        .with_target(target);
    let server = ProxyServer::bind(&config).await.unwrap();
    let base = format!("http://{}/proxy", server.local_addr());
    tokio::spawn(server.serve(shutdown.clone()));
    base
}

#[rstest]
#[tokio::test]
async fn forwards_body_with_cors_headers(_tracing_setup: (), cancel_token: CancellationToken) {
    let origin = serve_upstream(upstream(), &cancel_token).await;
    let proxy = start_proxy(origin.as_str(), &cancel_token).await;

    let response = reqwest::Client::new()
        .get(format!("{proxy}/videos/a/index.m3u8"))
        .header(header::ORIGIN, "http://localhost:5173")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/vnd.apple.mpegurl"
    );
    assert_eq!(response.text().await.unwrap(), PLAYLIST);
    cancel_token.cancel();
}

#[rstest]
#[tokio::test]
async fn query_is_forwarded(cancel_token: CancellationToken) {
    let origin = serve_upstream(upstream(), &cancel_token).await;
    let proxy = start_proxy(origin.as_str(), &cancel_token).await;

    let body = reqwest::get(format!("{proxy}/echo?token=abc&t=1"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "token=abc&t=1");
    cancel_token.cancel();
}

#[rstest]
#[tokio::test]
async fn upstream_status_passes_through(cancel_token: CancellationToken) {
    let origin = serve_upstream(upstream(), &cancel_token).await;
    let proxy = start_proxy(origin.as_str(), &cancel_token).await;

    let response = reqwest::get(format!("{proxy}/missing.m3u8")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    cancel_token.cancel();
}

#[rstest]
#[tokio::test]
async fn unreachable_upstream_is_bad_gateway(cancel_token: CancellationToken) {
    let closed = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let proxy = start_proxy(&format!("http://{closed}"), &cancel_token).await;

    let response = reqwest::get(format!("{proxy}/videos/a/index.m3u8"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    cancel_token.cancel();
}
