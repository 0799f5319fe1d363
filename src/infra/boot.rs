use crate::infra::config::{Config, Transport};
use crate::infra::http_app;
use crate::infra::runtime::mcp_transport::{self, TransportError};
use crate::tools::forecast::ForecastSvc;

/// Run the server in the transport chosen at startup. Returns only when that
/// run-loop ends; there is no fallback from one transport to the other.
pub async fn run(cfg: Config) -> Result<(), TransportError> {
    tracing::info!(
        transport = %cfg.transport,
        upstream = %cfg.upstream.base_url,
        "BOOT mcp-nws"
    );
    let svc = ForecastSvc::from_config(&cfg.upstream)?;

    match cfg.transport {
        Transport::Stdio => {
            mcp_transport::serve_stdio(move || (svc, ForecastSvc::router())).await
        }
        Transport::Http { address } => {
            let listener = mcp_transport::bind(&address).await?;
            tracing::info!(address = %address, "MCP handler listening at /mcp");
            mcp_transport::serve_http(listener, http_app::build_app(svc)).await
        }
    }
}
