//! Endpoint for listing a user's categories.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::WithRejection;

use crate::{
    ApiResponse, Error,
    app_state::lock_connection,
    category::{CategoryState, get_categories_by_user},
    user::UserQuery,
};

const FAILURE_MESSAGE: &str = "Failed to fetch categories";

/// Get the categories for the user in the `userId` query parameter, sorted by name.
pub async fn get_categories_endpoint(
    State(state): State<CategoryState>,
    WithRejection(Query(query), _): WithRejection<Query<UserQuery>, Error>,
) -> Response {
    let user_id = match query.user_id() {
        Ok(user_id) => user_id,
        Err(error) => return error.into_json_response(FAILURE_MESSAGE),
    };

    let connection = match lock_connection(&state.db_connection) {
        Ok(connection) => connection,
        Err(error) => return error.into_json_response(FAILURE_MESSAGE),
    };

    match get_categories_by_user(user_id, &connection) {
        Ok(categories) => ApiResponse::success(categories).into_response(),
        Err(error) => error.into_json_response(FAILURE_MESSAGE),
    }
}

#[cfg(test)]
mod get_categories_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Query, State},
        http::StatusCode,
    };
    use axum_extra::extract::WithRejection;

    use crate::{
        ObjectId,
        category::{CategoryState, seed_default_categories},
        test_utils::{get_test_connection, parse_json_body},
        user::UserQuery,
    };

    use super::get_categories_endpoint;

    fn get_state() -> CategoryState {
        CategoryState {
            db_connection: Arc::new(Mutex::new(get_test_connection())),
        }
    }

    fn query(user_id: Option<String>) -> WithRejection<Query<UserQuery>, crate::Error> {
        WithRejection(Query(UserQuery { user_id }), Default::default())
    }

    #[tokio::test]
    async fn returns_categories_sorted_by_name() {
        let state = get_state();
        let user_id = ObjectId::generate();
        seed_default_categories(user_id, &state.db_connection.lock().unwrap()).unwrap();

        let response =
            get_categories_endpoint(State(state), query(Some(user_id.to_string()))).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = parse_json_body(response).await;
        assert_eq!(body["success"], true);
        let categories = body["data"].as_array().unwrap();
        assert_eq!(categories.len(), 16);
        assert_eq!(categories[0]["name"], "Bills & Utilities");
        assert_eq!(categories[0]["userId"], user_id.to_string());
        assert!(categories[0]["_id"].is_string());
    }

    #[tokio::test]
    async fn missing_user_id_is_bad_request() {
        let response = get_categories_endpoint(State(get_state()), query(None)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = parse_json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "User ID is required");
    }

    #[tokio::test]
    async fn malformed_user_id_is_bad_request() {
        let response =
            get_categories_endpoint(State(get_state()), query(Some("1234".to_owned()))).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
