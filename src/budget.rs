//! Budgets, which cap spending in a category over a period.
//!
//! Budgets are not stored yet: listing returns a fixed set of examples and
//! creating one only validates and echoes it back.

use axum::{
    Json,
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, macros::datetime};

use crate::{
    ApiResponse, Error, ObjectId,
    transaction::{parse_date_time, validate_amount},
    user::{UserQuery, parse_user_id},
};

/// How often a budget resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Weekly,
    Monthly,
    Yearly,
}

/// A spending limit and how much of it has been used.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub amount: f64,
    pub spent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<ObjectId>,
    pub user_id: ObjectId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<BudgetPeriod>,
    #[serde(
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<OffsetDateTime>,
    #[serde(
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// The JSON body for creating a budget.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetForm {
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub amount: Option<f64>,
    pub category_id: Option<String>,
    pub period: Option<BudgetPeriod>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl BudgetForm {
    /// Validate the form and build the budget it describes, with nothing spent.
    ///
    /// # Errors
    ///
    /// Returns [Error::MissingFields] if the user ID, name or amount is
    /// missing or the amount is zero, then the error for the first invalid field.
    pub fn into_budget(self, now: OffsetDateTime) -> Result<Budget, Error> {
        let (Some(user_id), Some(name), Some(amount)) = (
            non_blank(self.user_id.as_deref()),
            non_blank(self.name.as_deref()),
            self.amount.filter(|amount| *amount != 0.0),
        ) else {
            return Err(Error::MissingFields);
        };

        let category_id = non_blank(self.category_id.as_deref())
            .map(ObjectId::parse)
            .transpose()?;
        let start_date = non_blank(self.start_date.as_deref())
            .map(parse_date_time)
            .transpose()?;
        let end_date = non_blank(self.end_date.as_deref())
            .map(parse_date_time)
            .transpose()?;

        Ok(Budget {
            id: ObjectId::generate(),
            name: name.to_owned(),
            amount: validate_amount(amount)?,
            spent: 0.0,
            category_id,
            user_id: parse_user_id(Some(user_id))?,
            period: self.period,
            start_date,
            end_date,
            created_at: now,
            updated_at: now,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// The example budgets returned for every user.
pub fn sample_budgets(user_id: ObjectId, now: OffsetDateTime) -> Result<Vec<Budget>, Error> {
    let samples = [
        (
            "507f1f77bcf86cd799439012",
            "Monthly Food Budget",
            500.0,
            320.0,
            "507f1f77bcf86cd799439013",
        ),
        (
            "507f1f77bcf86cd799439014",
            "Transportation Budget",
            200.0,
            150.0,
            "507f1f77bcf86cd799439015",
        ),
    ];

    samples
        .into_iter()
        .map(|(id, name, amount, spent, category_id)| {
            Ok(Budget {
                id: ObjectId::parse(id)?,
                name: name.to_owned(),
                amount,
                spent,
                category_id: Some(ObjectId::parse(category_id)?),
                user_id,
                period: Some(BudgetPeriod::Monthly),
                start_date: Some(datetime!(2024-01-01 00:00 UTC)),
                end_date: Some(datetime!(2024-01-31 00:00 UTC)),
                created_at: now,
                updated_at: now,
            })
        })
        .collect()
}

/// List the user's budgets.
pub async fn get_budgets_endpoint(
    WithRejection(Query(query), _): WithRejection<Query<UserQuery>, Error>,
) -> Response {
    const FAILURE_MESSAGE: &str = "Failed to fetch budgets";

    let user_id = match query.user_id() {
        Ok(user_id) => user_id,
        Err(error) => return error.into_json_response(FAILURE_MESSAGE),
    };

    match sample_budgets(user_id, OffsetDateTime::now_utc()) {
        Ok(budgets) => ApiResponse::success(budgets).into_response(),
        Err(error) => error.into_json_response(FAILURE_MESSAGE),
    }
}

/// Validate a new budget and return it as if it had been saved.
pub async fn create_budget_endpoint(
    WithRejection(Json(form), _): WithRejection<Json<BudgetForm>, Error>,
) -> Response {
    match form.into_budget(OffsetDateTime::now_utc()) {
        Ok(budget) => ApiResponse::success(budget)
            .with_message("Budget created successfully")
            .with_status(StatusCode::CREATED),
        Err(error) => error.into_json_response("Failed to create budget"),
    }
}
