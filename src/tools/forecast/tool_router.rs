use std::future::Future;
use std::sync::Arc;

use rmcp::handler::server::tool::{Parameters, ToolRouter};
use rmcp::model::{CallToolResult, Implementation, ServerCapabilities, ServerInfo};
use rmcp::service::RequestContext;
use rmcp::{ErrorData, RoleServer};
use tokio_util::sync::CancellationToken;

use crate::clients::nws::NwsClient;
use crate::core::content::encode_result;
use crate::core::tool::ForecastFetcher;
use crate::domain::{CoordinateInput, FetchError, ForecastKind};
use crate::infra::config::UpstreamConfig;
use crate::infra::runtime::mcp_transport::ServerHandler;

pub const SERVER_NAME: &str = "mcp-nws";

/// MCP handler for the forecast tools. Stateless apart from the shared fetcher,
/// so one instance (and its clones) can serve every session.
#[derive(Clone)]
pub struct ForecastSvc {
    fetcher: Arc<dyn ForecastFetcher>,
}

impl ForecastSvc {
    pub fn new(fetcher: Arc<dyn ForecastFetcher>) -> Self {
        Self { fetcher }
    }

    pub fn from_config(cfg: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(Arc::new(NwsClient::from_config(cfg)?)))
    }

    /// Shared body of every forecast tool: fetch the representation for
    /// `kind` (abandoning it if `ct` fires) and encode it.
    pub async fn invoke(
        &self,
        kind: ForecastKind,
        coords: &CoordinateInput,
        ct: CancellationToken,
    ) -> Result<CallToolResult, ErrorData> {
        tracing::debug!(
            tool = %kind,
            latitude = %coords.latitude,
            longitude = %coords.longitude,
            "forecast tool invoked"
        );

        let fetched = tokio::select! {
            biased;
            _ = ct.cancelled() => Err(FetchError::Cancelled),
            res = kind.fetch(self.fetcher.as_ref(), coords) => res,
        };

        fetched.and_then(|payload| encode_result(&payload)).map_err(|e| {
            tracing::warn!(tool = %kind, error = %e, "forecast tool failed");
            ErrorData::from(e)
        })
    }
}

impl ServerHandler for ForecastSvc {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "US National Weather Service forecasts. Every tool takes \
                 {\"latitude\": string, \"longitude\": string} for a US location."
                    .into(),
            ),
            ..Default::default()
        }
    }
}

#[rmcp::tool_router]
impl ForecastSvc {
    #[rmcp::tool(name = "Forecast", description = "Basic 7 Day Weather Forecast")]
    async fn forecast(
        &self,
        params: Parameters<CoordinateInput>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(ForecastKind::Forecast, &params.0, context.ct)
            .await
    }

    #[rmcp::tool(
        name = "HourlyForecast",
        description = "Basic Hourly 7 Day Weather Forecast"
    )]
    async fn hourly_forecast(
        &self,
        params: Parameters<CoordinateInput>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(ForecastKind::HourlyForecast, &params.0, context.ct)
            .await
    }

    #[rmcp::tool(
        name = "GridpointForecast",
        description = "Detailed 7 Day Weather Forecast with Raw Timeseries Data"
    )]
    async fn gridpoint_forecast(
        &self,
        params: Parameters<CoordinateInput>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(ForecastKind::GridpointForecast, &params.0, context.ct)
            .await
    }
}

pub type ForecastRouter = ToolRouter<ForecastSvc>;

impl ForecastSvc {
    pub fn router() -> ForecastRouter {
        // Wrapper to expose the macro-generated private tool_router
        Self::tool_router()
    }
}
