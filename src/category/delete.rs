//! Category deletion endpoint.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    ApiResponse, ObjectId,
    app_state::lock_connection,
    category::{CategoryState, delete_category},
};

const FAILURE_MESSAGE: &str = "Failed to delete category";

/// Delete the category with the ID in the path.
///
/// Transactions in the category keep their category ID.
pub async fn delete_category_endpoint(
    State(state): State<CategoryState>,
    Path(category_id): Path<String>,
) -> Response {
    let category_id = match ObjectId::parse(&category_id) {
        Ok(category_id) => category_id,
        Err(error) => return error.into_json_response(FAILURE_MESSAGE),
    };

    let connection = match lock_connection(&state.db_connection) {
        Ok(connection) => connection,
        Err(error) => return error.into_json_response(FAILURE_MESSAGE),
    };

    match delete_category(category_id, &connection) {
        Ok(()) => ApiResponse::message("Category deleted successfully").into_response(),
        Err(error) => error.into_json_response(FAILURE_MESSAGE),
    }
}

#[cfg(test)]
mod delete_category_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };

    use crate::{
        ObjectId,
        category::{CategoryName, CategoryState, NewCategory, create_category},
        test_utils::{get_test_connection, parse_json_body},
        transaction_type::TransactionType,
    };

    use super::delete_category_endpoint;

    fn get_state() -> CategoryState {
        CategoryState {
            db_connection: Arc::new(Mutex::new(get_test_connection())),
        }
    }

    #[tokio::test]
    async fn delete_category_succeeds() {
        let state = get_state();
        let category = create_category(
            NewCategory {
                name: CategoryName::new_unchecked("Food"),
                icon: "🍽️".to_owned(),
                color: "#FF6B6B".to_owned(),
                category_type: TransactionType::Expense,
                user_id: ObjectId::generate(),
            },
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();

        let response = delete_category_endpoint(State(state), Path(category.id.to_string())).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = parse_json_body(response).await;
        assert_eq!(body["message"], "Category deleted successfully");
    }

    #[tokio::test]
    async fn delete_missing_category_is_not_found() {
        let response =
            delete_category_endpoint(State(get_state()), Path(ObjectId::generate().to_string()))
                .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = parse_json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Category not found or delete failed");
    }
}
