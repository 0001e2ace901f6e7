//! The API endpoints URIs.
//!
//! Tests fill in endpoints that take a parameter, e.g., '/api/users/{user_id}', with
//! `format_endpoint`.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The dashboard page.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page listing recent visitors.
pub const VISITORS_VIEW: &str = "/admin/visitors";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for logging in a user.
pub const LOG_IN_API: &str = "/api/log_in";
/// The route to access a single user.
pub const USER: &str = "/api/users/{user_id}";
/// The route to update a user's preferences.
pub const USER_PREFERENCES: &str = "/api/users/{user_id}/preferences";
/// The route to list and create categories.
pub const CATEGORIES_API: &str = "/api/categories";
/// The route to update and delete a single category.
pub const CATEGORY: &str = "/api/categories/{category_id}";
/// The route to give a user the default categories.
pub const SEED_CATEGORIES: &str = "/api/seed-categories";
/// The route to list and create transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to update and delete a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route for the dashboard totals.
pub const DASHBOARD_API: &str = "/api/dashboard";
/// The route for the analytics.
pub const ANALYTICS_API: &str = "/api/analytics";
/// The route for filtered reports.
pub const REPORTS_API: &str = "/api/reports";
/// The route for downloading a report as CSV.
pub const REPORTS_EXPORT: &str = "/api/reports/export";
/// The route for the mock budgets.
pub const BUDGETS_API: &str = "/api/budgets";
/// The route to seed the demo user's data.
pub const SEED_DEMO: &str = "/api/seed-demo";
/// The route to record a page visit.
pub const LOG_VISITOR: &str = "/api/log-visitor";
/// The route to read and clear the visitor log.
pub const VISITORS_API: &str = "/api/visitors";
/// The route to check the database connection.
pub const TEST_DB: &str = "/api/test-db";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/users/{user_id}', '{user_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
#[cfg(test)]
pub fn format_endpoint(endpoint_path: &str, id: impl std::fmt::Display) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map_or(endpoint_path.len(), |offset| param_start + offset + 1);

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
