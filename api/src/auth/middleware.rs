use crate::auth::extractors::decode_token;
use axum::{
    extract::{ConnectInfo, Request},
    http::{
        HeaderMap, Method,
        header::{AUTHORIZATION, ORIGIN, USER_AGENT},
    },
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;
use std::time::Instant;
use tracing::info;

fn header<'a>(headers: &'a HeaderMap, name: impl axum::http::header::AsHeaderName) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Logs one line per request with the caller, the outcome and the latency.
/// CORS preflight `OPTIONS` requests are passed through silently.
///
/// Fields: `method`, `path`, `ip` (`unknown` without connect info), `admin` (id from
/// a valid bearer token, `0` otherwise), `origin`, `user_agent`, `status`, `elapsed_ms`.
pub async fn log_request(req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        return next.run(req).await;
    }

    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".into());

    let headers = req.headers();
    let admin_id = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .and_then(decode_token)
        .map(|claims| claims.sub)
        .unwrap_or(0);
    let origin = header(headers, ORIGIN).to_owned();
    let user_agent = header(headers, USER_AGENT).to_owned();

    let started = Instant::now();
    let response = next.run(req).await;

    info!(
        %method,
        %path,
        %ip,
        admin = admin_id,
        %origin,
        %user_agent,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Request handled"
    );

    response
}
