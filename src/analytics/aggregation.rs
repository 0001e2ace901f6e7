//! Transaction data aggregation for the analytics and dashboard views.
//!
//! Groups transactions by category, calendar month and weekday and derives
//! ratios such as the savings rate.

use std::collections::HashMap;

use serde::Serialize;
use time::{Duration, Month, OffsetDateTime, Weekday};

use crate::{Error, transaction::TransactionWithCategory, transaction_type::TransactionType};

/// The label used for transactions whose category no longer exists.
pub const MISSING_CATEGORY_LABEL: &str = "Other";

/// The chart colour for expense categories without a colour.
pub const DEFAULT_EXPENSE_COLOR: &str = "#FF6B6B";

/// The chart colour for income categories without a colour.
pub const DEFAULT_INCOME_COLOR: &str = "#4ECDC4";

/// The number of calendar months in the monthly trend, including the current month.
pub const TREND_MONTHS: u32 = 6;

/// The number of categories in the top category lists.
pub const TOP_CATEGORY_COUNT: usize = 5;

const NOT_AVAILABLE: &str = "N/A";

/// How far back the analytics look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeRange {
    /// The last 7 days.
    Week,
    /// The last 30 days.
    #[default]
    Month,
    /// The last 90 days.
    Quarter,
    /// The last 365 days.
    Year,
}

impl TimeRange {
    /// The number of days in the range.
    pub fn days(&self) -> u32 {
        match self {
            TimeRange::Week => 7,
            TimeRange::Month => 30,
            TimeRange::Quarter => 90,
            TimeRange::Year => 365,
        }
    }
}

impl TryFrom<u32> for TimeRange {
    type Error = Error;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        match days {
            7 => Ok(TimeRange::Week),
            30 => Ok(TimeRange::Month),
            90 => Ok(TimeRange::Quarter),
            365 => Ok(TimeRange::Year),
            other => Err(Error::InvalidTimeRange(other)),
        }
    }
}

/// The total for one category in a pie chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAmount {
    pub name: String,
    pub value: f64,
    pub color: String,
}

/// Income and expenses for one calendar month, e.g. "Jan 2025".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotals {
    pub name: String,
    pub income: f64,
    pub expenses: f64,
    /// Income minus expenses.
    pub value: f64,
}

/// A single value for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyValue {
    pub name: String,
    pub value: f64,
}

/// A category ranked by the amount of money that went through it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopCategory {
    pub category: String,
    pub amount: f64,
    /// The number of transactions in the category.
    pub transactions: usize,
}

/// Derived figures shown alongside the charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    pub avg_daily_spending: f64,
    pub avg_daily_income: f64,
    /// The weekday with the most spending, or "N/A" if there were no expenses.
    pub highest_expense_day: String,
    pub most_used_expense_category: String,
    pub most_used_income_category: String,
    /// The percentage of income that was not spent, zero when there was no income.
    pub savings_rate: f64,
}

/// Everything shown on the analytics page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub time_range: u32,
    pub total_income: f64,
    pub total_expenses: f64,
    pub expense_category_breakdown: Vec<CategoryAmount>,
    pub income_category_breakdown: Vec<CategoryAmount>,
    pub monthly_trend: Vec<MonthlyTotals>,
    pub monthly_income: Vec<MonthlyValue>,
    pub monthly_expenses: Vec<MonthlyValue>,
    pub top_expense_categories: Vec<TopCategory>,
    pub top_income_categories: Vec<TopCategory>,
    pub insights: Insights,
}

/// A running total for one category, kept in the order categories are first seen.
#[derive(Debug, Clone, PartialEq)]
struct CategoryTotal {
    name: String,
    color: String,
    amount: f64,
    count: usize,
}

/// Compute the analytics for the transactions dated within `time_range` of `now`.
pub fn build_analytics(
    transactions: &[TransactionWithCategory],
    now: OffsetDateTime,
    time_range: TimeRange,
) -> Analytics {
    let cutoff = now - Duration::days(i64::from(time_range.days()));
    let in_range: Vec<&TransactionWithCategory> = transactions
        .iter()
        .filter(|t| t.transaction.date >= cutoff)
        .collect();

    let expense_totals = totals_by_category(&in_range, TransactionType::Expense);
    let income_totals = totals_by_category(&in_range, TransactionType::Income);

    let monthly_trend = monthly_trend(&in_range, now);
    let monthly_income = monthly_trend
        .iter()
        .map(|month| MonthlyValue {
            name: month.name.clone(),
            value: month.income,
        })
        .collect();
    let monthly_expenses = monthly_trend
        .iter()
        .map(|month| MonthlyValue {
            name: month.name.clone(),
            value: month.expenses,
        })
        .collect();

    let top_expense_categories = rank_categories(&expense_totals, TOP_CATEGORY_COUNT);
    let top_income_categories = rank_categories(&income_totals, TOP_CATEGORY_COUNT);

    let total_income = sum_by_type(&in_range, TransactionType::Income);
    let total_expenses = sum_by_type(&in_range, TransactionType::Expense);
    let days = f64::from(time_range.days());

    let insights = Insights {
        avg_daily_spending: total_expenses / days,
        avg_daily_income: total_income / days,
        highest_expense_day: highest_expense_day(&in_range)
            .map_or_else(|| NOT_AVAILABLE.to_owned(), |weekday| weekday.to_string()),
        most_used_expense_category: first_category_name(&top_expense_categories),
        most_used_income_category: first_category_name(&top_income_categories),
        savings_rate: savings_rate(total_income, total_expenses),
    };

    Analytics {
        time_range: time_range.days(),
        total_income,
        total_expenses,
        expense_category_breakdown: to_breakdown(expense_totals),
        income_category_breakdown: to_breakdown(income_totals),
        monthly_trend,
        monthly_income,
        monthly_expenses,
        top_expense_categories,
        top_income_categories,
        insights,
    }
}

/// The percentage of `income` left over after `expenses`, or zero if there is no income.
pub fn savings_rate(income: f64, expenses: f64) -> f64 {
    if income > 0.0 {
        (income - expenses) / income * 100.0
    } else {
        0.0
    }
}

/// Sum the amounts of the transactions of one type.
pub fn sum_by_type(
    transactions: &[&TransactionWithCategory],
    transaction_type: TransactionType,
) -> f64 {
    transactions
        .iter()
        .filter(|t| t.transaction.transaction_type == transaction_type)
        .map(|t| t.transaction.amount)
        .sum()
}

/// Income and expenses for each of the [TREND_MONTHS] calendar months up to and including
/// the month of `now`, oldest first.
///
/// Transactions outside of those months are ignored.
pub fn monthly_trend(
    transactions: &[&TransactionWithCategory],
    now: OffsetDateTime,
) -> Vec<MonthlyTotals> {
    let months: Vec<(i32, Month)> = (0..TREND_MONTHS)
        .rev()
        .map(|months_ago| subtract_months(now.year(), now.month(), months_ago))
        .collect();

    let mut totals: Vec<MonthlyTotals> = months
        .iter()
        .map(|&(year, month)| MonthlyTotals {
            name: format_month_label(year, month),
            income: 0.0,
            expenses: 0.0,
            value: 0.0,
        })
        .collect();

    for t in transactions {
        let key = (t.transaction.date.year(), t.transaction.date.month());

        let Some(index) = months.iter().position(|&month| month == key) else {
            continue;
        };

        match t.transaction.transaction_type {
            TransactionType::Income => totals[index].income += t.transaction.amount,
            TransactionType::Expense => totals[index].expenses += t.transaction.amount,
        }
    }

    for month in &mut totals {
        month.value = month.income - month.expenses;
    }

    totals
}

/// The `count` categories of `transaction_type` with the largest totals.
///
/// Categories with equal totals keep the order they were first seen in.
pub fn top_categories(
    transactions: &[&TransactionWithCategory],
    transaction_type: TransactionType,
    count: usize,
) -> Vec<TopCategory> {
    rank_categories(&totals_by_category(transactions, transaction_type), count)
}

fn totals_by_category(
    transactions: &[&TransactionWithCategory],
    transaction_type: TransactionType,
) -> Vec<CategoryTotal> {
    let default_color = match transaction_type {
        TransactionType::Income => DEFAULT_INCOME_COLOR,
        TransactionType::Expense => DEFAULT_EXPENSE_COLOR,
    };

    let mut totals: Vec<CategoryTotal> = Vec::new();
    let mut index_by_name: HashMap<String, usize> = HashMap::new();

    for t in transactions
        .iter()
        .filter(|t| t.transaction.transaction_type == transaction_type)
    {
        let name = t.category_name_or(MISSING_CATEGORY_LABEL);

        let index = match index_by_name.get(name) {
            Some(&index) => index,
            None => {
                let color = t
                    .category
                    .as_ref()
                    .map(|category| category.color.as_str())
                    .filter(|color| !color.is_empty())
                    .unwrap_or(default_color);

                totals.push(CategoryTotal {
                    name: name.to_owned(),
                    color: color.to_owned(),
                    amount: 0.0,
                    count: 0,
                });
                index_by_name.insert(name.to_owned(), totals.len() - 1);
                totals.len() - 1
            }
        };

        totals[index].amount += t.transaction.amount;
        totals[index].count += 1;
    }

    totals
}

fn rank_categories(totals: &[CategoryTotal], count: usize) -> Vec<TopCategory> {
    let mut ranked = totals.to_vec();
    // `sort_by` is stable, so ties keep their first-seen order.
    ranked.sort_by(|a, b| b.amount.total_cmp(&a.amount));

    ranked
        .into_iter()
        .take(count)
        .map(|total| TopCategory {
            category: total.name,
            amount: total.amount,
            transactions: total.count,
        })
        .collect()
}

fn to_breakdown(totals: Vec<CategoryTotal>) -> Vec<CategoryAmount> {
    totals
        .into_iter()
        .map(|total| CategoryAmount {
            name: total.name,
            value: total.amount,
            color: total.color,
        })
        .collect()
}

fn first_category_name(categories: &[TopCategory]) -> String {
    categories
        .first()
        .map_or_else(|| NOT_AVAILABLE.to_owned(), |top| top.category.clone())
}

fn highest_expense_day(transactions: &[&TransactionWithCategory]) -> Option<Weekday> {
    let mut totals: Vec<(Weekday, f64)> = Vec::new();

    for t in transactions
        .iter()
        .filter(|t| t.transaction.transaction_type == TransactionType::Expense)
    {
        let weekday = t.transaction.date.weekday();

        match totals.iter_mut().find(|(day, _)| *day == weekday) {
            Some((_, total)) => *total += t.transaction.amount,
            None => totals.push((weekday, t.transaction.amount)),
        }
    }

    // Ties go to the day seen first.
    totals
        .into_iter()
        .reduce(|best, next| if next.1 > best.1 { next } else { best })
        .map(|(weekday, _)| weekday)
}

fn subtract_months(year: i32, month: Month, months_ago: u32) -> (i32, Month) {
    let zero_based = year * 12 + i32::from(month as u8) - 1 - months_ago as i32;
    let year = zero_based.div_euclid(12);
    let month_number = zero_based.rem_euclid(12) as u8 + 1;

    // `month_number` is always in 1..=12.
    let month = Month::try_from(month_number).unwrap_or(Month::January);

    (year, month)
}

/// Format a month like "Jan 2025".
pub fn format_month_label(year: i32, month: Month) -> String {
    let month = match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    };

    format!("{month} {year}")
}
