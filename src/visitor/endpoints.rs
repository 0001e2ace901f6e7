//! API endpoints for writing, reading and clearing the visitor log.
//!
//! These respond with their own JSON shapes rather than the usual envelope.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::{Error, visitor::VisitorLog};

const NO_VISITORS_MESSAGE: &str =
    "No visitor data found yet. Start browsing your site to see logs!";

/// The body of `GET /api/visitors`.
#[derive(Debug, Serialize)]
pub struct VisitorList {
    pub visitors: Vec<Value>,
    pub count: usize,
    pub message: &'static str,
}

fn error_response(error: Error, message: &str) -> Response {
    tracing::error!("{message}: {error}");
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": message }))).into_response()
}

/// Append the JSON object in the request body to the visitor log, fields and all.
pub async fn log_visitor_endpoint(
    State(visitor_log): State<VisitorLog>,
    WithRejection(Json(record), _): WithRejection<Json<Map<String, Value>>, Error>,
) -> Response {
    match visitor_log.append_record(Value::Object(record)).await {
        Ok(()) => Json(json!({ "success": true })).into_response(),
        Err(error) => error_response(error, "Failed to log visitor"),
    }
}

/// Get every entry in the visitor log, oldest first.
pub async fn get_visitors_endpoint(State(visitor_log): State<VisitorLog>) -> Response {
    match visitor_log.read_records().await {
        Ok(None) => Json(VisitorList {
            visitors: Vec::new(),
            count: 0,
            message: NO_VISITORS_MESSAGE,
        })
        .into_response(),
        Ok(Some(visitors)) => Json(VisitorList {
            count: visitors.len(),
            visitors,
            message: "Visitor data loaded successfully",
        })
        .into_response(),
        Err(error) => error_response(error, "Failed to load visitor data"),
    }
}

/// Remove every entry from the visitor log.
pub async fn clear_visitors_endpoint(State(visitor_log): State<VisitorLog>) -> Response {
    match visitor_log.clear().await {
        Ok(()) => Json(json!({ "message": "Visitor logs cleared successfully" })).into_response(),
        Err(error) => error_response(error, "Failed to clear visitor logs"),
    }
}
