//! Totals for the transactions in a report.

use std::collections::HashMap;

use serde::Serialize;

use crate::{
    analytics::{MISSING_CATEGORY_LABEL, sum_by_type},
    transaction::TransactionWithCategory,
    transaction_type::TransactionType,
};

const NOT_AVAILABLE: &str = "N/A";

/// The figures shown above a report's transaction list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_income: f64,
    pub transaction_count: usize,
    /// The mean amount over income and expenses alike, zero for an empty report.
    pub avg_transaction_amount: f64,
    /// The expense category with the largest total, or "N/A".
    pub top_expense_category: String,
    /// The income category with the largest total, or "N/A".
    pub top_income_category: String,
}

/// Summarise the (already filtered) transactions of a report.
pub fn build_report_summary(transactions: &[TransactionWithCategory]) -> ReportSummary {
    let references: Vec<&TransactionWithCategory> = transactions.iter().collect();

    let total_income = sum_by_type(&references, TransactionType::Income);
    let total_expenses = sum_by_type(&references, TransactionType::Expense);
    let transaction_count = transactions.len();

    let avg_transaction_amount = if transaction_count == 0 {
        0.0
    } else {
        let total: f64 = transactions
            .iter()
            .map(|transaction| transaction.transaction.amount)
            .sum();
        total / transaction_count as f64
    };

    ReportSummary {
        total_income,
        total_expenses,
        net_income: total_income - total_expenses,
        transaction_count,
        avg_transaction_amount,
        top_expense_category: top_category_name(transactions, TransactionType::Expense),
        top_income_category: top_category_name(transactions, TransactionType::Income),
    }
}

/// The name of the category with the largest total for `transaction_type`.
///
/// Ties go to the category seen first.
fn top_category_name(
    transactions: &[TransactionWithCategory],
    transaction_type: TransactionType,
) -> String {
    let mut order: Vec<&str> = Vec::new();
    let mut totals: HashMap<&str, f64> = HashMap::new();

    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.transaction.transaction_type == transaction_type)
    {
        let name = transaction.category_name_or(MISSING_CATEGORY_LABEL);

        if !totals.contains_key(name) {
            order.push(name);
        }

        *totals.entry(name).or_insert(0.0) += transaction.transaction.amount;
    }

    let mut top: Option<(&str, f64)> = None;

    for name in order {
        let total = totals[name];

        if top.is_none_or(|(_, best)| total > best) {
            top = Some((name, total));
        }
    }

    top.map_or_else(|| NOT_AVAILABLE.to_owned(), |(name, _)| name.to_owned())
}
