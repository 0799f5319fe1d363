//! Generic MCP transport helpers (stdio + streamable HTTP) decoupled from tool logic.

use std::sync::Arc;

use rmcp::handler::server::router::Router;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::serve_server;
use rmcp::transport::streamable_http_server::tower::{StreamableHttpServerConfig, StreamableHttpService};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;

use super::frame_log::{Direction, FrameLog};

pub use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
pub use rmcp::ServerHandler;

/// Failures that end the process. None of them are retried.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
    #[error("http server failed: {0}")]
    Serve(#[source] std::io::Error),
    #[error("stdio transport failed: {0}")]
    Stdio(String),
    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Serve over the process's stdin/stdout, mirroring every frame to the log.
pub async fn serve_stdio<H>(factory: impl FnOnce() -> (H, ToolRouter<H>)) -> Result<(), TransportError>
where
    H: ServerHandler,
{
    let stdin = FrameLog::new(tokio::io::stdin(), Direction::Recv);
    let stdout = FrameLog::new(tokio::io::stdout(), Direction::Send);
    serve_io(factory, stdin, stdout).await
}

/// Serve one session over an arbitrary byte stream until the peer closes it.
pub async fn serve_io<H, R, W>(
    factory: impl FnOnce() -> (H, ToolRouter<H>),
    reader: R,
    writer: W,
) -> Result<(), TransportError>
where
    H: ServerHandler,
    R: AsyncRead + Send + Unpin + 'static,
    W: AsyncWrite + Send + Unpin + 'static,
{
    let (handler, tools) = factory();
    let service = Router::new(handler).with_tools(tools);
    let running = serve_server(service, (reader, writer))
        .await
        .map_err(|e| TransportError::Stdio(e.to_string()))?;
    let reason = running
        .waiting()
        .await
        .map_err(|e| TransportError::Stdio(e.to_string()))?;
    tracing::warn!(reason = ?reason, "stdio session closed by peer");
    Ok(())
}

pub fn make_streamable_http_service<H>(
    factory: impl Fn() -> (H, ToolRouter<H>) + Send + Sync + Clone + 'static,
    session_mgr: Arc<LocalSessionManager>,
) -> StreamableHttpService<Router<H>, LocalSessionManager>
where
    H: ServerHandler,
{
    let cfg = StreamableHttpServerConfig::default();
    tracing::debug!(stateful_mode = %cfg.stateful_mode, keep_alive = ?cfg.sse_keep_alive, "StreamableHttpServerConfig");
    let service_factory = move || {
        let (handler, tools) = factory();
        let service = Router::new(handler).with_tools(tools);
        Ok(service)
    };
    StreamableHttpService::new(service_factory, session_mgr, cfg)
}

/// Bind the listener up front so an unusable address fails before anything is served.
pub async fn bind(address: &str) -> Result<TcpListener, TransportError> {
    TcpListener::bind(address)
        .await
        .map_err(|source| TransportError::Bind {
            address: address.to_string(),
            source,
        })
}

pub async fn serve_http(listener: TcpListener, app: axum::Router) -> Result<(), TransportError> {
    axum::serve(listener, app).await.map_err(TransportError::Serve)
}
