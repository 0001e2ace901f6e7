//! Endpoint for listing a user's transactions.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use crate::{
    ApiResponse, Error,
    app_state::lock_connection,
    pagination::PageParams,
    transaction::{TransactionState, get_transactions_by_user},
    user::parse_user_id,
};

const FAILURE_MESSAGE: &str = "Failed to fetch transactions";

/// The query parameters for listing transactions.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionListQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    pub limit: Option<u64>,
    pub skip: Option<u64>,
}

/// Get a page of the user's transactions, newest first, each with its category.
pub async fn get_transactions_endpoint(
    State(state): State<TransactionState>,
    WithRejection(Query(query), _): WithRejection<Query<TransactionListQuery>, Error>,
) -> Response {
    let user_id = match parse_user_id(query.user_id.as_deref()) {
        Ok(user_id) => user_id,
        Err(error) => return error.into_json_response(FAILURE_MESSAGE),
    };

    let page = state.pagination_config.resolve(&PageParams {
        limit: query.limit,
        skip: query.skip,
    });

    let connection = match lock_connection(&state.db_connection) {
        Ok(connection) => connection,
        Err(error) => return error.into_json_response(FAILURE_MESSAGE),
    };

    match get_transactions_by_user(user_id, page, &connection) {
        Ok(transactions) => ApiResponse::success(transactions).into_response(),
        Err(error) => error.into_json_response(FAILURE_MESSAGE),
    }
}
