//! The log in endpoint.
//!
//! There are no passwords. Logging in with an email address finds or creates
//! the user for that address and makes sure they have the default categories.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use crate::{
    ApiResponse, Error,
    app_state::lock_connection,
    category::seed_default_categories,
    user::{UserState, get_or_create_user},
};

const FAILURE_MESSAGE: &str = "Failed to log in";

/// The JSON body for logging in.
#[derive(Debug, Deserialize)]
pub struct LogInForm {
    /// The email address to log in with.
    pub email: Option<String>,
    /// The display name to use if this is a new user.
    pub name: Option<String>,
}

/// Log in with an email address and respond with the user.
pub async fn log_in_endpoint(
    State(state): State<UserState>,
    WithRejection(Json(form), _): WithRejection<Json<LogInForm>, Error>,
) -> Response {
    let email = match form.email.as_deref().map(str::trim) {
        Some(email) if !email.is_empty() => email.to_owned(),
        _ => return Error::MissingFields.into_json_response(FAILURE_MESSAGE),
    };

    let connection = match lock_connection(&state.db_connection) {
        Ok(connection) => connection,
        Err(error) => return error.into_json_response(FAILURE_MESSAGE),
    };

    let user = match get_or_create_user(&email, form.name.as_deref(), &connection) {
        Ok(user) => user,
        Err(error) => return error.into_json_response(FAILURE_MESSAGE),
    };

    if let Err(error) = seed_default_categories(user.id, &connection) {
        return error.into_json_response(FAILURE_MESSAGE);
    }

    ApiResponse::success(user)
        .with_message("Logged in successfully")
        .into_response()
}
