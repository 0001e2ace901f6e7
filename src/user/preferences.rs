//! Endpoint for changing a user's preferences.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use crate::{
    ApiResponse, Error, ObjectId,
    app_state::lock_connection,
    currency::Currency,
    user::{PreferencesUpdate, Theme, UserState, update_preferences},
};

const FAILURE_MESSAGE: &str = "Failed to update preferences";

/// The JSON body for updating preferences. Omitted fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct PreferencesForm {
    pub currency: Option<String>,
    pub theme: Option<Theme>,
    pub language: Option<String>,
}

impl PreferencesForm {
    fn validate(self) -> Result<PreferencesUpdate, Error> {
        let currency = self
            .currency
            .as_deref()
            .map(str::parse::<Currency>)
            .transpose()?;
        let language = self
            .language
            .map(|language| language.trim().to_owned())
            .filter(|language| !language.is_empty());

        Ok(PreferencesUpdate {
            currency,
            theme: self.theme,
            language,
        })
    }
}

/// Update the preferences of the user with the ID in the path and respond with the user.
pub async fn update_preferences_endpoint(
    State(state): State<UserState>,
    Path(user_id): Path<String>,
    WithRejection(Json(form), _): WithRejection<Json<PreferencesForm>, Error>,
) -> Response {
    let user_id = match ObjectId::parse(&user_id) {
        Ok(user_id) => user_id,
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

    match update_preferences(user_id, update, &connection) {
        Ok(user) => ApiResponse::success(user)
            .with_message("Preferences updated successfully")
            .into_response(),
        Err(error) => error.into_json_response(FAILURE_MESSAGE),
    }
}
