use crate::infra::config::UpstreamConfig;

/// Build the upstream reqwest client with the configured timeouts.
/// Redirects are followed (NWS redirects some `/points` lookups to rounded coordinates).
pub fn make_http_client(cfg: &UpstreamConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .connect_timeout(cfg.connect_timeout)
        .timeout(cfg.request_timeout)
        .build()
}
