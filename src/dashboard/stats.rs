//! Whole-history totals for a user's dashboard.

use serde::Serialize;
use time::OffsetDateTime;

use crate::{
    analytics::{MonthlyTotals, TopCategory, monthly_trend, sum_by_type, top_categories},
    transaction::TransactionWithCategory,
    transaction_type::TransactionType,
};

/// The number of expense categories listed on the dashboard.
const DASHBOARD_TOP_CATEGORY_COUNT: usize = 5;

/// The headline figures for a user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_income: f64,
    pub total_expenses: f64,
    /// Total income minus total expenses.
    pub balance: f64,
    pub transaction_count: usize,
    /// The expense categories with the most spending.
    pub top_categories: Vec<TopCategory>,
    pub monthly_trend: Vec<MonthlyTotals>,
}

/// Sum all of a user's transactions, with no date filter.
///
/// `now` is only used to pick the months in the monthly trend.
pub fn build_dashboard_stats(
    transactions: &[TransactionWithCategory],
    now: OffsetDateTime,
) -> DashboardStats {
    let transactions: Vec<&TransactionWithCategory> = transactions.iter().collect();

    let total_income = sum_by_type(&transactions, TransactionType::Income);
    let total_expenses = sum_by_type(&transactions, TransactionType::Expense);

    DashboardStats {
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
        transaction_count: transactions.len(),
        top_categories: top_categories(
            &transactions,
            TransactionType::Expense,
            DASHBOARD_TOP_CATEGORY_COUNT,
        ),
        monthly_trend: monthly_trend(&transactions, now),
    }
}

#[cfg(test)]
mod dashboard_stats_tests {
    use time::{OffsetDateTime, macros::datetime};

    use crate::{
        ObjectId,
        currency::Currency,
        transaction::{Transaction, TransactionWithCategory},
        transaction_type::TransactionType,
    };

    use super::build_dashboard_stats;

    fn transaction(
        amount: f64,
        transaction_type: TransactionType,
        date: OffsetDateTime,
    ) -> TransactionWithCategory {
        TransactionWithCategory {
            transaction: Transaction {
                id: ObjectId::generate(),
                amount,
                description: String::new(),
                category_id: ObjectId::generate(),
                user_id: ObjectId::generate(),
                transaction_type,
                date,
                currency: Currency::Inr,
                created_at: date,
                updated_at: date,
            },
            category: None,
        }
    }

    #[test]
    fn empty_history_has_zero_totals() {
        let stats = build_dashboard_stats(&[], OffsetDateTime::now_utc());

        assert_eq!(stats.total_income, 0.0);
        assert_eq!(stats.total_expenses, 0.0);
        assert_eq!(stats.balance, 0.0);
        assert_eq!(stats.transaction_count, 0);
        assert!(stats.top_categories.is_empty());
        assert_eq!(stats.monthly_trend.len(), 6);
    }

    #[test]
    fn balance_is_income_minus_expenses_over_all_time() {
        let now = datetime!(2025-06-15 00:00 UTC);
        let transactions = vec![
            transaction(1200.0, TransactionType::Income, datetime!(2020-01-01 00:00 UTC)),
            transaction(350.0, TransactionType::Expense, datetime!(2024-12-02 00:00 UTC)),
            transaction(150.0, TransactionType::Expense, now),
        ];

        let stats = build_dashboard_stats(&transactions, now);

        assert_eq!(stats.total_income, 1200.0);
        assert_eq!(stats.total_expenses, 500.0);
        assert_eq!(stats.balance, 700.0);
        assert_eq!(stats.transaction_count, 3);
        assert_eq!(stats.top_categories[0].category, "Other");
        assert_eq!(stats.top_categories[0].amount, 500.0);
        assert_eq!(stats.monthly_trend[5].expenses, 150.0);
    }
}
