use reqwest::RequestBuilder;

/// Time-based id sent upstream as `x-request-id` and logged with the fetch.
pub fn generate_request_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("hkenv-{}-{}", now.as_secs(), now.subsec_nanos())
}

/// Stamp a feed request with its correlation id and our user-agent.
/// A caller-supplied id is kept.
pub fn add_standard_headers(
    builder: RequestBuilder,
    request_id: Option<String>,
) -> (RequestBuilder, String) {
    let rid = request_id.unwrap_or_else(generate_request_id);
    let b = builder.header("x-request-id", rid.as_str()).header(
        reqwest::header::USER_AGENT,
        format!("hk-environment-mcp/{}", env!("CARGO_PKG_VERSION")),
    );
    (b, rid)
}
