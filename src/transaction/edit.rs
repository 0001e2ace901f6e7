//! Transaction update endpoint.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::WithRejection;

use crate::{
    ApiResponse, Error, ObjectId,
    app_state::lock_connection,
    transaction::{TransactionForm, TransactionState, update_transaction},
};

const FAILURE_MESSAGE: &str = "Failed to update transaction";

/// Update the transaction with the ID in the path.
///
/// The type, date and currency keep their stored values when omitted.
pub async fn update_transaction_endpoint(
    State(state): State<TransactionState>,
    Path(transaction_id): Path<String>,
    WithRejection(Json(form), _): WithRejection<Json<TransactionForm>, Error>,
) -> Response {
    let transaction_id = match ObjectId::parse(&transaction_id) {
        Ok(transaction_id) => transaction_id,
        Err(error) => return error.into_json_response(FAILURE_MESSAGE),
    };

    let update = match form.validate_update() {
        Ok(update) => update,
        Err(error) => return error.into_json_response(FAILURE_MESSAGE),
    };

    let connection = match lock_connection(&state.db_connection) {
        Ok(connection) => connection,
        Err(error) => return error.into_json_response(FAILURE_MESSAGE),
    };

    match update_transaction(transaction_id, update, &connection) {
        Ok(()) => ApiResponse::message("Transaction updated successfully").into_response(),
        Err(error) => error.into_json_response(FAILURE_MESSAGE),
    }
}
