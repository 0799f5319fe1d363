use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::RequestBuilder;

/// NWS serves flat documents (no GeoJSON `properties` wrapper) for this type.
pub const NWS_ACCEPT: &str = "application/ld+json";

/// Generate a simple request id suitable for logging/correlation.
pub fn generate_request_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("nws-{}-{}", now.as_secs(), now.subsec_nanos())
}

/// Add standard headers to an outgoing request. Returns the updated builder and the request id used.
pub fn add_standard_headers(
    builder: RequestBuilder,
    user_agent: &str,
    request_id: Option<String>,
) -> (RequestBuilder, String) {
    let rid = request_id.unwrap_or_else(generate_request_id);
    let b = builder
        .header("x-request-id", rid.as_str())
        .header(USER_AGENT, user_agent)
        .header(ACCEPT, NWS_ACCEPT);
    (b, rid)
}
