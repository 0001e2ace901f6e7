//! Transaction creation endpoint.

use axum::{Json, extract::State, http::StatusCode, response::Response};
use axum_extra::extract::WithRejection;

use crate::{
    ApiResponse, Error,
    app_state::lock_connection,
    transaction::{TransactionForm, TransactionState, create_transaction},
};

const FAILURE_MESSAGE: &str = "Failed to create transaction";

/// Create a transaction from a JSON body and respond with the stored transaction.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    WithRejection(Json(form), _): WithRejection<Json<TransactionForm>, Error>,
) -> Response {
    let new_transaction = match form.validate_new() {
        Ok(new_transaction) => new_transaction,
        Err(error) => return error.into_json_response(FAILURE_MESSAGE),
    };

    let connection = match lock_connection(&state.db_connection) {
        Ok(connection) => connection,
        Err(error) => return error.into_json_response(FAILURE_MESSAGE),
    };

    match create_transaction(new_transaction, &connection) {
        Ok(transaction) => ApiResponse::success(transaction)
            .with_message("Transaction created successfully")
            .with_status(StatusCode::CREATED),
        Err(error) => error.into_json_response(FAILURE_MESSAGE),
    }
}
