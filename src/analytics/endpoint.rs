//! The analytics endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::WithRejection;
use rusqlite::Connection;
use serde::Deserialize;
use time::OffsetDateTime;

use crate::{
    ApiResponse, AppState, Error,
    analytics::{TimeRange, build_analytics},
    app_state::lock_connection,
    transaction::get_all_transactions_for_user,
    user::parse_user_id,
};

const FAILURE_MESSAGE: &str = "Failed to fetch analytics";

/// The state needed for the analytics endpoint.
#[derive(Debug, Clone)]
pub struct AnalyticsState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for AnalyticsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The query parameters for the analytics endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    /// One of 7, 30, 90 or 365. Defaults to 30.
    pub days: Option<u32>,
}

/// Get the analytics for the user over the last `days` days.
pub async fn get_analytics_endpoint(
    State(state): State<AnalyticsState>,
    WithRejection(Query(query), _): WithRejection<Query<AnalyticsQuery>, Error>,
) -> Response {
    let user_id = match parse_user_id(query.user_id.as_deref()) {
        Ok(user_id) => user_id,
        Err(error) => return error.into_json_response(FAILURE_MESSAGE),
    };

    let time_range = match query.days.map(TimeRange::try_from).transpose() {
        Ok(time_range) => time_range.unwrap_or_default(),
        Err(error) => return error.into_json_response(FAILURE_MESSAGE),
    };

    let transactions = {
        let connection = match lock_connection(&state.db_connection) {
            Ok(connection) => connection,
            Err(error) => return error.into_json_response(FAILURE_MESSAGE),
        };

        match get_all_transactions_for_user(user_id, &connection) {
            Ok(transactions) => transactions,
            Err(error) => return error.into_json_response(FAILURE_MESSAGE),
        }
    };

    let analytics = build_analytics(&transactions, OffsetDateTime::now_utc(), time_range);

    ApiResponse::success(analytics).into_response()
}
