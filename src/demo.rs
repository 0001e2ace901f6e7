//! Sample data for the shared demo account.

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::WithRejection;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use time::{OffsetDateTime, macros::datetime};

use crate::{
    ApiResponse, AppState, Error, ObjectId,
    app_state::lock_connection,
    category::{Category, get_categories_by_user, seed_default_categories},
    currency::Currency,
    transaction::{NewTransaction, count_transactions_for_user, create_transaction},
    transaction_type::TransactionType,
};

/// The only user that demo data can be created for.
pub const DEMO_USER_ID: &str = "507f1f77bcf86cd799439011";

const FAILURE_MESSAGE: &str = "Failed to seed demo data";

/// The demo transactions as `(amount, description, type, date)`.
const DEMO_TRANSACTIONS: [(f64, &str, TransactionType, OffsetDateTime); 8] = [
    (
        1200.0,
        "Monthly Salary",
        TransactionType::Income,
        datetime!(2024-12-01 00:00 UTC),
    ),
    (
        350.0,
        "Grocery Shopping",
        TransactionType::Expense,
        datetime!(2024-12-02 00:00 UTC),
    ),
    (
        150.0,
        "Fuel",
        TransactionType::Expense,
        datetime!(2024-12-03 00:00 UTC),
    ),
    (
        80.0,
        "Movie Tickets",
        TransactionType::Expense,
        datetime!(2024-12-04 00:00 UTC),
    ),
    (
        500.0,
        "Freelance Project",
        TransactionType::Income,
        datetime!(2024-12-05 00:00 UTC),
    ),
    (
        200.0,
        "Electricity Bill",
        TransactionType::Expense,
        datetime!(2024-12-06 00:00 UTC),
    ),
    (
        120.0,
        "Restaurant Dinner",
        TransactionType::Expense,
        datetime!(2024-12-07 00:00 UTC),
    ),
    (
        300.0,
        "Online Course",
        TransactionType::Expense,
        datetime!(2024-12-08 00:00 UTC),
    ),
];

/// The state needed for seeding demo data.
#[derive(Debug, Clone)]
pub struct DemoState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DemoState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The JSON body for seeding demo data.
#[derive(Debug, Deserialize)]
pub struct SeedDemoForm {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// How much demo data the demo user has after seeding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DemoSeedCounts {
    /// The number of categories the user has.
    pub categories: usize,
    /// The number of transactions created, or the number that already existed.
    pub transactions: usize,
}

/// The result of [seed_demo_data].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemoSeedOutcome {
    pub counts: DemoSeedCounts,
    /// Whether the user already had categories and transactions, in which case nothing was created.
    pub already_existed: bool,
}

/// Give the demo user the default categories and a month of sample transactions.
///
/// Categories are only created when the user has none, and transactions only
/// when the user has none.
///
/// # Errors
///
/// Returns [Error::InvalidDemoUser] if `user_id` is not [DEMO_USER_ID], or an
/// error if a database query fails.
pub fn seed_demo_data(
    user_id: ObjectId,
    connection: &Connection,
) -> Result<DemoSeedOutcome, Error> {
    if user_id.to_string() != DEMO_USER_ID {
        return Err(Error::InvalidDemoUser);
    }

    let existing_categories = get_categories_by_user(user_id, connection)?;
    let existing_transaction_count = count_transactions_for_user(user_id, connection)?;

    if !existing_categories.is_empty() && existing_transaction_count > 0 {
        return Ok(DemoSeedOutcome {
            counts: DemoSeedCounts {
                categories: existing_categories.len(),
                transactions: existing_transaction_count,
            },
            already_existed: true,
        });
    }

    let categories = if existing_categories.is_empty() {
        seed_default_categories(user_id, connection)?.categories
    } else {
        existing_categories
    };

    let mut created_transactions = 0;

    if existing_transaction_count == 0 {
        let sql_transaction = connection.unchecked_transaction()?;

        for (amount, description, transaction_type, date) in DEMO_TRANSACTIONS {
            let Some(category) = find_demo_category(&categories, description, transaction_type)
            else {
                tracing::warn!("No {transaction_type} category for demo transaction {description}");
                continue;
            };

            create_transaction(
                NewTransaction {
                    amount,
                    description: description.to_owned(),
                    category_id: category.id,
                    user_id,
                    transaction_type,
                    date,
                    currency: Currency::Inr,
                },
                &sql_transaction,
            )?;
            created_transactions += 1;
        }

        sql_transaction.commit()?;
    }

    tracing::info!("Seeded {created_transactions} demo transactions for {user_id}");

    Ok(DemoSeedOutcome {
        counts: DemoSeedCounts {
            categories: categories.len(),
            transactions: created_transactions,
        },
        already_existed: false,
    })
}

/// The keyword that the category for a demo transaction should contain.
fn category_keyword(description: &str, transaction_type: TransactionType) -> &'static str {
    let description = description.to_lowercase();
    let mentions = |words: &[&str]| words.iter().any(|word| description.contains(word));

    match transaction_type {
        TransactionType::Income if mentions(&["salary"]) => "salary",
        TransactionType::Income if mentions(&["freelance"]) => "freelance",
        TransactionType::Income => "other income",
        TransactionType::Expense if mentions(&["grocery", "food"]) => "food",
        TransactionType::Expense if mentions(&["fuel", "transport"]) => "transportation",
        TransactionType::Expense if mentions(&["movie", "entertainment"]) => "entertainment",
        TransactionType::Expense if mentions(&["bill", "electricity"]) => "bills",
        TransactionType::Expense if mentions(&["restaurant", "dinner"]) => "food",
        TransactionType::Expense if mentions(&["course", "education"]) => "education",
        TransactionType::Expense => "other",
    }
}

/// The category whose name contains the keyword for `description`, falling
/// back to the first category of the same type.
fn find_demo_category<'a>(
    categories: &'a [Category],
    description: &str,
    transaction_type: TransactionType,
) -> Option<&'a Category> {
    let keyword = category_keyword(description, transaction_type);
    let mut same_type = categories
        .iter()
        .filter(|category| category.category_type == transaction_type);

    same_type
        .clone()
        .find(|category| category.name.as_ref().to_lowercase().contains(keyword))
        .or_else(|| same_type.next())
}

/// Seed the demo account with sample categories and transactions.
pub async fn seed_demo_endpoint(
    State(state): State<DemoState>,
    WithRejection(Json(form), _): WithRejection<Json<SeedDemoForm>, Error>,
) -> Response {
    // Any missing or different ID is treated as not the demo user.
    let user_id = match form.user_id.as_deref().map(ObjectId::parse) {
        Some(Ok(user_id)) => user_id,
        _ => return Error::InvalidDemoUser.into_json_response(FAILURE_MESSAGE),
    };

    let connection = match lock_connection(&state.db_connection) {
        Ok(connection) => connection,
        Err(error) => return error.into_json_response(FAILURE_MESSAGE),
    };

    match seed_demo_data(user_id, &connection) {
        Ok(outcome) if outcome.already_existed => ApiResponse::success(outcome.counts)
            .with_message("Demo data already exists")
            .into_response(),
        Ok(outcome) => ApiResponse::success(outcome.counts)
            .with_message("Demo data seeded successfully")
            .with_status(StatusCode::CREATED),
        Err(error) => error.into_json_response(FAILURE_MESSAGE),
    }
}
