//! Middleware that records page views in the visitor log.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::USER_AGENT},
    middleware::Next,
    response::Response,
};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::visitor::{VisitorLog, VisitorLogEntry};

const UNKNOWN: &str = "Unknown";

/// The number of user agent characters included in the console log line.
const USER_AGENT_PREVIEW_LENGTH: usize = 50;

/// Whether a request for `path` counts as a page view.
///
/// API calls, static assets and anything that looks like a file are skipped.
pub fn should_log_visit(path: &str) -> bool {
    !(path.starts_with("/api/") || path.starts_with("/static/") || path.contains('.'))
}

/// The client's IP address according to the proxy headers, or "unknown".
///
/// `x-forwarded-for` may hold a chain of addresses, the first is the client.
pub fn client_ip(headers: &HeaderMap) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };

    if let Some(forwarded_for) = header("x-forwarded-for") {
        if let Some(first) = forwarded_for.split(',').next() {
            return first.trim().to_owned();
        }
    }

    header("x-real-ip")
        .or_else(|| header("cf-connecting-ip"))
        .unwrap_or("unknown")
        .to_owned()
}

/// Append an entry to the visitor log for each page view.
///
/// The entry is written on a separate task and failures are only logged, so
/// the page is never held up by the visitor log.
pub async fn visitor_logging_middleware(
    State(visitor_log): State<VisitorLog>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();

    if should_log_visit(path) {
        let entry = build_entry(&request);

        let user_agent_preview: String = entry
            .user_agent
            .chars()
            .take(USER_AGENT_PREVIEW_LENGTH)
            .collect();
        tracing::info!(
            "Visitor: {} | {}... | {}",
            entry.ip,
            user_agent_preview,
            entry.url
        );

        tokio::spawn(async move {
            if let Err(error) = visitor_log.append(entry).await {
                tracing::debug!("Could not write to the visitor log: {error}");
            }
        });
    }

    next.run(request).await
}

fn build_entry(request: &Request) -> VisitorLogEntry {
    let headers = request.headers();

    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(UNKNOWN)
        .to_owned();

    let url = request
        .uri()
        .path_and_query()
        .map_or_else(|| request.uri().path().to_owned(), |path| path.to_string());

    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();

    VisitorLogEntry {
        timestamp,
        ip: client_ip(headers),
        user_agent,
        url,
        country: UNKNOWN.to_owned(),
        city: UNKNOWN.to_owned(),
    }
}
