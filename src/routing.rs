//! Application router configuration.

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    analytics::get_analytics_endpoint,
    budget::{create_budget_endpoint, get_budgets_endpoint},
    category::{
        create_category_endpoint, delete_category_endpoint, get_categories_endpoint,
        seed_categories_endpoint, update_category_endpoint,
    },
    dashboard::{get_dashboard_endpoint, get_dashboard_page},
    demo::seed_demo_endpoint,
    endpoints,
    health::test_db_endpoint,
    not_found::get_404_not_found,
    report::{export_report_endpoint, get_report_endpoint},
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_transactions_endpoint,
        update_transaction_endpoint,
    },
    user::{get_user_endpoint, log_in_endpoint, update_preferences_endpoint},
    visitor::{
        clear_visitors_endpoint, get_visitors_endpoint, get_visitors_page, log_visitor_endpoint,
        visitor_logging_middleware,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::VISITORS_VIEW, get(get_visitors_page));

    let api_routes = Router::new()
        .route(endpoints::LOG_IN_API, post(log_in_endpoint))
        .route(endpoints::USER, get(get_user_endpoint))
        .route(endpoints::USER_PREFERENCES, put(update_preferences_endpoint))
        .route(
            endpoints::CATEGORIES_API,
            get(get_categories_endpoint).post(create_category_endpoint),
        )
        .route(
            endpoints::CATEGORY,
            put(update_category_endpoint).delete(delete_category_endpoint),
        )
        .route(endpoints::SEED_CATEGORIES, post(seed_categories_endpoint))
        .route(
            endpoints::TRANSACTIONS_API,
            get(get_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            put(update_transaction_endpoint).delete(delete_transaction_endpoint),
        )
        .route(endpoints::DASHBOARD_API, get(get_dashboard_endpoint))
        .route(endpoints::ANALYTICS_API, get(get_analytics_endpoint))
        .route(endpoints::REPORTS_API, get(get_report_endpoint))
        .route(endpoints::REPORTS_EXPORT, get(export_report_endpoint))
        .route(
            endpoints::BUDGETS_API,
            get(get_budgets_endpoint).post(create_budget_endpoint),
        )
        .route(endpoints::SEED_DEMO, post(seed_demo_endpoint))
        .route(endpoints::LOG_VISITOR, post(log_visitor_endpoint))
        .route(
            endpoints::VISITORS_API,
            get(get_visitors_endpoint).delete(clear_visitors_endpoint),
        )
        .route(endpoints::TEST_DB, get(test_db_endpoint));

    page_routes
        .merge(api_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .layer(middleware::from_fn_with_state(
            state.visitor_log.clone(),
            visitor_logging_middleware,
        ))
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}
