//! Transaction deletion endpoint.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    ApiResponse, ObjectId,
    app_state::lock_connection,
    transaction::{TransactionState, delete_transaction},
};

const FAILURE_MESSAGE: &str = "Failed to delete transaction";

/// Delete the transaction with the ID in the path.
pub async fn delete_transaction_endpoint(
    State(state): State<TransactionState>,
    Path(transaction_id): Path<String>,
) -> Response {
    let transaction_id = match ObjectId::parse(&transaction_id) {
        Ok(transaction_id) => transaction_id,
        Err(error) => return error.into_json_response(FAILURE_MESSAGE),
    };

    let connection = match lock_connection(&state.db_connection) {
        Ok(connection) => connection,
        Err(error) => return error.into_json_response(FAILURE_MESSAGE),
    };

    match delete_transaction(transaction_id, &connection) {
        Ok(()) => ApiResponse::message("Transaction deleted successfully").into_response(),
        Err(error) => error.into_json_response(FAILURE_MESSAGE),
    }
}
