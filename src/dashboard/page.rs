//! The server-rendered dashboard page.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::{OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    Error,
    analytics::{MISSING_CATEGORY_LABEL, MonthlyTotals, TopCategory},
    app_state::lock_connection,
    currency::Currency,
    dashboard::{DashboardState, DashboardStats, build_dashboard_stats},
    endpoints,
    html::{
        CARD_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base,
    },
    internal_server_error::into_page_response,
    transaction::{TransactionWithCategory, get_all_transactions_for_user},
    transaction_type::TransactionType,
    user::{UserQuery, get_user},
};

/// The number of transactions listed under "Recent Transactions".
const RECENT_TRANSACTION_COUNT: usize = 10;

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Display the dashboard for the user in the `userId` query parameter, or a
/// form asking for a user ID when there is none.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Query(query): Query<UserQuery>,
) -> Response {
    if query.user_id.as_deref().is_none_or(|id| id.trim().is_empty()) {
        return base("Dashboard", &user_id_form_view()).into_response();
    }

    match build_page(&state, &query) {
        Ok(content) => base("Dashboard", &content).into_response(),
        Err(error) => into_page_response(error),
    }
}

fn build_page(state: &DashboardState, query: &UserQuery) -> Result<Markup, Error> {
    let user_id = query.user_id()?;
    let connection = lock_connection(&state.db_connection)?;

    // Users that have not logged in yet still get a dashboard in the default currency.
    let currency = match get_user(user_id, &connection) {
        Ok(user) => user.preferences.currency,
        Err(Error::NotFound) => Currency::default(),
        Err(error) => return Err(error),
    };

    let transactions = get_all_transactions_for_user(user_id, &connection)?;
    let stats = build_dashboard_stats(&transactions, OffsetDateTime::now_utc());

    Ok(dashboard_view(&stats, &transactions, currency))
}

fn user_id_form_view() -> Markup {
    html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            div class=(CARD_STYLE)
            {
                h1 class="text-xl font-bold mb-4" { "Dashboard" }
                p class="mb-4" { "Enter your user ID to see your dashboard." }

                form method="get" action=(endpoints::DASHBOARD_VIEW) class="flex gap-2"
                {
                    input
                        type="text"
                        name="userId"
                        placeholder="User ID"
                        required
                        class="border rounded px-2 py-1";
                    button type="submit" class="px-4 py-1 bg-blue-600 text-white rounded" { "View" }
                }
            }
        }
    }
}

fn dashboard_view(
    stats: &DashboardStats,
    transactions: &[TransactionWithCategory],
    currency: Currency,
) -> Markup {
    html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold mb-6" { "Dashboard" }

            section id="summary" class="grid grid-cols-2 md:grid-cols-4 gap-4 w-full mb-8"
            {
                (summary_card("Total Income", &currency.format(stats.total_income)))
                (summary_card("Total Expenses", &currency.format(stats.total_expenses)))
                (summary_card("Balance", &currency.format(stats.balance)))
                (summary_card("Transactions", &stats.transaction_count.to_string()))
            }

            (top_categories_table(&stats.top_categories, currency))
            (monthly_trend_table(&stats.monthly_trend, currency))
            (recent_transactions_table(transactions, currency))
        }
    }
}

fn summary_card(label: &str, value: &str) -> Markup {
    html! {
        div class=(CARD_STYLE)
        {
            p class="text-sm text-gray-600 dark:text-gray-400" { (label) }
            p class="text-2xl font-semibold" { (value) }
        }
    }
}

fn top_categories_table(top_categories: &[TopCategory], currency: Currency) -> Markup {
    html! {
        section id="top-categories" class="w-full mb-8"
        {
            h2 class="text-xl font-semibold mb-2" { "Top Spending Categories" }

            @if top_categories.is_empty() {
                p { "No expenses yet." }
            } @else {
                table class="w-full text-sm text-left"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th class=(TABLE_CELL_STYLE) { "Category" }
                            th class=(TABLE_CELL_STYLE) { "Amount" }
                            th class=(TABLE_CELL_STYLE) { "Transactions" }
                        }
                    }

                    tbody
                    {
                        @for top_category in top_categories {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td class=(TABLE_CELL_STYLE) { (top_category.category) }
                                td class=(TABLE_CELL_STYLE) {
                                    (currency.format(top_category.amount))
                                }
                                td class=(TABLE_CELL_STYLE) { (top_category.transactions) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn monthly_trend_table(monthly_trend: &[MonthlyTotals], currency: Currency) -> Markup {
    html! {
        section id="monthly-trend" class="w-full mb-8"
        {
            h2 class="text-xl font-semibold mb-2" { "Monthly Trend" }

            table class="w-full text-sm text-left"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th class=(TABLE_CELL_STYLE) { "Month" }
                        th class=(TABLE_CELL_STYLE) { "Income" }
                        th class=(TABLE_CELL_STYLE) { "Expenses" }
                        th class=(TABLE_CELL_STYLE) { "Net" }
                    }
                }

                tbody
                {
                    @for month in monthly_trend {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td class=(TABLE_CELL_STYLE) { (month.name) }
                            td class=(TABLE_CELL_STYLE) { (currency.format(month.income)) }
                            td class=(TABLE_CELL_STYLE) { (currency.format(month.expenses)) }
                            td class=(TABLE_CELL_STYLE) { (currency.format(month.value)) }
                        }
                    }
                }
            }
        }
    }
}

fn recent_transactions_table(
    transactions: &[TransactionWithCategory],
    currency: Currency,
) -> Markup {
    html! {
        section id="recent-transactions" class="w-full mb-8"
        {
            h2 class="text-xl font-semibold mb-2" { "Recent Transactions" }

            @if transactions.is_empty() {
                p { "No transactions yet." }
            } @else {
                table class="w-full text-sm text-left"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th class=(TABLE_CELL_STYLE) { "Date" }
                            th class=(TABLE_CELL_STYLE) { "Description" }
                            th class=(TABLE_CELL_STYLE) { "Category" }
                            th class=(TABLE_CELL_STYLE) { "Amount" }
                        }
                    }

                    tbody
                    {
                        @for item in transactions.iter().take(RECENT_TRANSACTION_COUNT) {
                            @let transaction = &item.transaction;
                            @let signed_amount = match transaction.transaction_type {
                                TransactionType::Income => transaction.amount,
                                TransactionType::Expense => -transaction.amount,
                            };

                            tr class=(TABLE_ROW_STYLE)
                            {
                                td class=(TABLE_CELL_STYLE) {
                                    (transaction.date.format(DATE_FORMAT).unwrap_or_default())
                                }
                                td class=(TABLE_CELL_STYLE) { (transaction.description) }
                                td class=(TABLE_CELL_STYLE) {
                                    (item.category_name_or(MISSING_CATEGORY_LABEL))
                                }
                                td class=(TABLE_CELL_STYLE) { (currency.format(signed_amount)) }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod dashboard_page_tests {
    use axum::{
        extract::{Query, State},
        http::StatusCode,
    };
    use scraper::Selector;
    use std::sync::{Arc, Mutex};
    use time::macros::datetime;

    use crate::{
        ObjectId,
        currency::Currency,
        dashboard::DashboardState,
        test_utils::{
            assert_status_ok, assert_valid_html, get_test_connection, parse_html_document,
        },
        transaction::{NewTransaction, create_transaction},
        transaction_type::TransactionType,
        user::UserQuery,
    };

    use super::get_dashboard_page;

    fn get_test_state() -> DashboardState {
        DashboardState {
            db_connection: Arc::new(Mutex::new(get_test_connection())),
        }
    }

    #[tokio::test]
    async fn shows_form_without_user_id() {
        let response =
            get_dashboard_page(State(get_test_state()), Query(UserQuery::default())).await;

        assert_status_ok(&response);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        let input_selector = Selector::parse("form input[name=userId]").unwrap();
        assert_eq!(document.select(&input_selector).count(), 1);
    }

    #[tokio::test]
    async fn shows_totals_and_recent_transactions() {
        let state = get_test_state();
        let user_id = ObjectId::generate();
        create_transaction(
            NewTransaction {
                amount: 25.5,
                description: "Lunch".to_owned(),
                category_id: ObjectId::generate(),
                user_id,
                transaction_type: TransactionType::Expense,
                date: datetime!(2024-12-02 12:00 UTC),
                currency: Currency::Inr,
            },
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();

        let response = get_dashboard_page(
            State(state),
            Query(UserQuery {
                user_id: Some(user_id.to_string()),
            }),
        )
        .await;

        assert_status_ok(&response);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);

        let summary_selector = Selector::parse("#summary p.text-2xl").unwrap();
        let summary: Vec<String> = document
            .select(&summary_selector)
            .map(|element| element.text().collect::<String>())
            .collect();
        assert_eq!(summary, vec!["₹0.00", "₹25.50", "-₹25.50", "1"]);

        let row_selector = Selector::parse("#recent-transactions tbody tr").unwrap();
        let rows: Vec<_> = document.select(&row_selector).collect();
        assert_eq!(rows.len(), 1);
        let row_text = rows[0].text().collect::<String>();
        assert!(row_text.contains("2024-12-02"));
        assert!(row_text.contains("Lunch"));
        assert!(row_text.contains("Other"));
    }

    #[tokio::test]
    async fn malformed_user_id_is_bad_request() {
        let response = get_dashboard_page(
            State(get_test_state()),
            Query(UserQuery {
                user_id: Some("nope".to_owned()),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
