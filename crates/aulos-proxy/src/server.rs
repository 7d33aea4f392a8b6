//! CORS reverse proxy.

use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::Arc,
    time::Duration,
};

use axum::{
    Router,
    extract::{Path, RawQuery, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};
use derivative::Derivative;
use derive_setters::Setters;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info};
use url::Url;

use crate::error::{ProxyError, ProxyResult};

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_TARGET: &str = "https://s3-store.flyooo.uk";

#[derive(Clone, Debug, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
pub struct ProxyConfig {
    /// Default: all interfaces.
    #[derivative(Default(value = "IpAddr::V4(Ipv4Addr::UNSPECIFIED)"))]
    pub host: IpAddr,
    /// Default: 3001.
    #[derivative(Default(value = "DEFAULT_PORT"))]
    pub port: u16,
    /// Origin every `/proxy/{path}` request is forwarded to.
    #[derivative(Default(value = "DEFAULT_TARGET.to_string()"))]
    #[setters(into)]
    pub target: String,
    /// Per-request upstream timeout. Default: 30s.
    #[derivative(Default(value = "Duration::from_secs(30)"))]
    pub upstream_timeout: Duration,
}

impl ProxyConfig {
    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

struct ProxyState {
    client: reqwest::Client,
    target: Url,
}

/// Router serving `GET /proxy/{*path}` with permissive CORS.
pub fn router(config: &ProxyConfig) -> ProxyResult<Router> {
    let target = Url::parse(&config.target).map_err(|source| ProxyError::InvalidTarget {
        target: config.target.clone(),
        source,
    })?;
    let client = reqwest::Client::builder()
        .timeout(config.upstream_timeout)
        .build()?;
    let state = Arc::new(ProxyState { client, target });

    Ok(Router::new()
        .route("/proxy/{*path}", get(forward))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http()))
}

async fn forward(
    State(state): State<Arc<ProxyState>>,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Response, ProxyError> {
    let url = upstream_url(&state.target, &path, query.as_deref());
    debug!(%url, "forwarding");

    let upstream = state.client.get(url).send().await?;
    let status = upstream.status();
    // upstream headers passed through to the client
    let forwarded: Vec<_> = [
        header::CONTENT_TYPE,
        header::CACHE_CONTROL,
        header::ETAG,
        header::LAST_MODIFIED,
        header::ACCEPT_RANGES,
    ]
    .into_iter()
    .filter_map(|name| {
        let value = upstream.headers().get(&name)?.clone();
        Some((name, value))
    })
    .collect();
    let body = upstream.bytes().await?;

    let mut response = (status, body).into_response();
    let headers = response.headers_mut();
    for (name, value) in forwarded {
        headers.insert(name, value);
    }
    Ok(response)
}

/// `{target}/{path}?{query}`, keeping any path prefix on the target.
fn upstream_url(target: &Url, path: &str, query: Option<&str>) -> Url {
    let mut url = target.clone();
    let prefix = target.path().trim_end_matches('/');
    url.set_path(&format!("{prefix}/{}", path.trim_start_matches('/')));
    url.set_query(query);
    url
}

/// Bound proxy, ready to serve.
pub struct ProxyServer {
    listener: TcpListener,
    router: Router,
    local_addr: SocketAddr,
}

impl ProxyServer {
    pub async fn bind(config: &ProxyConfig) -> ProxyResult<Self> {
        let router = router(config)?;
        let addr = config.addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ProxyError::Bind { addr, source })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| ProxyError::Bind { addr, source })?;
        Ok(Self {
            listener,
            router,
            local_addr,
        })
    }

    #[must_use]
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve until `shutdown` is cancelled.
    pub async fn serve(self, shutdown: CancellationToken) -> ProxyResult<()> {
        info!(addr = %self.local_addr, "proxy serving");
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown.cancelled_owned())
            .await
            .map_err(ProxyError::Serve)?;
        info!("proxy stopped");
        Ok(())
    }
}
