//! Spending and income analytics over a recent time range.

mod aggregation;
mod endpoint;

pub use aggregation::{
    MISSING_CATEGORY_LABEL, MonthlyTotals, TimeRange, TopCategory, build_analytics, monthly_trend,
    sum_by_type, top_categories,
};
pub use endpoint::get_analytics_endpoint;
