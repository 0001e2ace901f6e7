//! Category update endpoint.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::WithRejection;

use crate::{
    ApiResponse, Error, ObjectId,
    app_state::lock_connection,
    category::{CategoryForm, CategoryState, update_category},
};

const FAILURE_MESSAGE: &str = "Failed to update category";

/// Overwrite the category with the ID in the path with the fields in the JSON body.
pub async fn update_category_endpoint(
    State(state): State<CategoryState>,
    Path(category_id): Path<String>,
    WithRejection(Json(form), _): WithRejection<Json<CategoryForm>, Error>,
) -> Response {
    let category_id = match ObjectId::parse(&category_id) {
        Ok(category_id) => category_id,
        Err(error) => return error.into_json_response(FAILURE_MESSAGE),
    };

    let update = match form.validate() {
        Ok(update) => update,
        Err(error) => return error.into_json_response(FAILURE_MESSAGE),
    };

    let connection = match lock_connection(&state.db_connection) {
        Ok(connection) => connection,
        Err(error) => return error.into_json_response(FAILURE_MESSAGE),
    };

    match update_category(category_id, update, &connection) {
        Ok(()) => ApiResponse::message("Category updated successfully").into_response(),
        Err(error) => error.into_json_response(FAILURE_MESSAGE),
    }
}

#[cfg(test)]
mod update_category_endpoint_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    use crate::{
        ObjectId, build_router,
        category::{CategoryName, NewCategory, create_category, get_category},
        endpoints::{self, format_endpoint},
        test_utils::get_test_app_state,
        transaction_type::TransactionType,
    };

    #[tokio::test]
    async fn update_category_succeeds() {
        let (state, _temp_dir) = get_test_app_state();
        let connection = state.db_connection.clone();
        let user_id = ObjectId::generate();
        let category = create_category(
            NewCategory {
                name: CategoryName::new_unchecked("Food"),
                icon: "🍽️".to_owned(),
                color: "#FF6B6B".to_owned(),
                category_type: TransactionType::Expense,
                user_id,
            },
            &connection.lock().unwrap(),
        )
        .unwrap();
        let server = TestServer::new(build_router(state)).expect("Could not create test server");

        let response = server
            .put(&format_endpoint(endpoints::CATEGORY, category.id))
            .json(&json!({
                "name": "Eating Out",
                "icon": "🍕",
                "color": "#FF0000",
                "type": "expense",
                "userId": user_id.to_string(),
            }))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "success": true,
            "message": "Category updated successfully",
        }));
        let updated = get_category(category.id, &connection.lock().unwrap()).unwrap();
        assert_eq!(updated.name.as_ref(), "Eating Out");
        assert_eq!(updated.icon, "🍕");
    }

    #[tokio::test]
    async fn update_missing_category_is_not_found() {
        let (state, _temp_dir) = get_test_app_state();
        let server = TestServer::new(build_router(state)).expect("Could not create test server");

        let response = server
            .put(&format_endpoint(endpoints::CATEGORY, ObjectId::generate()))
            .json(&json!({
                "name": "Eating Out",
                "type": "expense",
                "userId": ObjectId::generate().to_string(),
            }))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({
            "success": false,
            "error": "Category not found or update failed",
        }));
    }

    #[tokio::test]
    async fn malformed_id_is_bad_request() {
        let (state, _temp_dir) = get_test_app_state();
        let server = TestServer::new(build_router(state)).expect("Could not create test server");

        let response = server
            .put("/api/categories/not-an-id")
            .json(&json!({
                "name": "Eating Out",
                "type": "expense",
                "userId": ObjectId::generate().to_string(),
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
