//! The dashboard statistics endpoint.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::WithRejection;
use time::OffsetDateTime;

use crate::{
    ApiResponse, Error,
    app_state::lock_connection,
    dashboard::{DashboardState, build_dashboard_stats},
    transaction::get_all_transactions_for_user,
    user::UserQuery,
};

const FAILURE_MESSAGE: &str = "Failed to fetch dashboard statistics";

/// Get the totals over all of the user's transactions.
pub async fn get_dashboard_endpoint(
    State(state): State<DashboardState>,
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

    match get_all_transactions_for_user(user_id, &connection) {
        Ok(transactions) => {
            let stats = build_dashboard_stats(&transactions, OffsetDateTime::now_utc());
            ApiResponse::success(stats).into_response()
        }
        Err(error) => error.into_json_response(FAILURE_MESSAGE),
    }
}

#[cfg(test)]
mod get_dashboard_endpoint_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    use crate::{ObjectId, build_router, test_utils::get_test_app_state};

    #[tokio::test]
    async fn single_expense_scenario() {
        let (state, _temp_dir) = get_test_app_state();
        let server = TestServer::new(build_router(state)).expect("Could not create test server");
        let user_id = ObjectId::generate();
        let other_user_id = ObjectId::generate();

        let category: serde_json::Value = server
            .post("/api/categories")
            .json(&json!({ "name": "Food", "type": "expense", "userId": user_id.to_string() }))
            .await
            .json();
        server
            .post("/api/transactions")
            .json(&json!({
                "amount": 25.50,
                "description": "Lunch",
                "categoryId": category["data"]["_id"],
                "userId": user_id.to_string(),
                "type": "expense",
            }))
            .await
            .assert_status(StatusCode::CREATED);
        server
            .post("/api/transactions")
            .json(&json!({
                "amount": 1000,
                "description": "Someone else's salary",
                "categoryId": ObjectId::generate().to_string(),
                "userId": other_user_id.to_string(),
                "type": "income",
            }))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .get("/api/dashboard")
            .add_query_param("userId", user_id)
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["totalExpenses"], 25.5);
        assert_eq!(body["data"]["totalIncome"], 0.0);
        assert_eq!(body["data"]["balance"], -25.5);
        assert_eq!(body["data"]["transactionCount"], 1);
        assert_eq!(body["data"]["topCategories"][0]["category"], "Food");
    }

    #[tokio::test]
    async fn missing_user_id_is_bad_request() {
        let (state, _temp_dir) = get_test_app_state();
        let server = TestServer::new(build_router(state)).expect("Could not create test server");

        let response = server.get("/api/dashboard").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({
            "success": false,
            "error": "User ID is required",
        }));
    }
}
