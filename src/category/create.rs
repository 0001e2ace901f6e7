//! Category creation endpoint.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::Response,
};
use axum_extra::extract::WithRejection;

use crate::{
    ApiResponse, Error,
    app_state::lock_connection,
    category::{CategoryForm, CategoryState, create_category},
};

const FAILURE_MESSAGE: &str = "Failed to create category";

/// Create a category from a JSON body and respond with the stored category.
pub async fn create_category_endpoint(
    State(state): State<CategoryState>,
    WithRejection(Json(form), _): WithRejection<Json<CategoryForm>, Error>,
) -> Response {
    let new_category = match form.validate() {
        Ok(new_category) => new_category,
        Err(error) => return error.into_json_response(FAILURE_MESSAGE),
    };

    let connection = match lock_connection(&state.db_connection) {
        Ok(connection) => connection,
        Err(error) => return error.into_json_response(FAILURE_MESSAGE),
    };

    match create_category(new_category, &connection) {
        Ok(category) => ApiResponse::success(category)
            .with_message("Category created successfully")
            .with_status(StatusCode::CREATED),
        Err(error) => error.into_json_response(FAILURE_MESSAGE),
    }
}
