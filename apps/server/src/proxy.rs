//! Forwards `/api` requests to the backend and relays its answer.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{header, HeaderMap},
    response::Response,
};

use crate::{
    error::{ProxyError, ProxyResult},
    main_lib::AppState,
};

/// Largest request body accepted for forwarding.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Connection-scoped headers that must not cross the proxy.
const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

pub async fn forward(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> ProxyResult<Response> {
    let (parts, body) = request.into_parts();
    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let target = format!("{}{}", state.backend_url, path_and_query);

    let body = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| ProxyError::InvalidRequest(e.to_string()))?;

    tracing::debug!(method = %parts.method, %target, "Forwarding request");

    let upstream = state
        .client
        .request(parts.method.clone(), &target)
        .headers(end_to_end_headers(&parts.headers, true))
        .body(body)
        .send()
        .await
        .map_err(|e| {
            tracing::warn!(%target, error = %e, "Backend unreachable");
            ProxyError::Unavailable(e.to_string())
        })?;

    let status = upstream.status();
    let headers = end_to_end_headers(upstream.headers(), false);
    let bytes = upstream
        .bytes()
        .await
        .map_err(|e| ProxyError::Unavailable(e.to_string()))?;

    tracing::debug!(%target, status = status.as_u16(), "Relaying response");

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}

/// Copies `headers` without hop-by-hop entries, including any named in
/// `Connection`. Content-Length is recomputed from the relayed body, and on
/// requests Host is left for the client to set to the backend.
fn end_to_end_headers(headers: &HeaderMap, outbound: bool) -> HeaderMap {
    let listed: Vec<String> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(|name| name.trim().to_ascii_lowercase())
        .filter(|name| !name.is_empty())
        .collect();

    let mut forwarded = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let name_str = name.as_str();
        if HOP_BY_HOP.contains(&name_str)
            || listed.iter().any(|l| l == name_str)
            || name == header::CONTENT_LENGTH
            || (outbound && name == header::HOST)
        {
            continue;
        }
        forwarded.append(name.clone(), value.clone());
    }
    forwarded
}
