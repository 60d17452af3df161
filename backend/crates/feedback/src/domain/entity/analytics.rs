//! Analytics Aggregates

use crate::domain::value_object::{category::Category, status::FeedbackStatus};

/// Raw counts read from one consistent snapshot of the store
#[derive(Debug, Clone, Default)]
pub struct AnalyticsSnapshot {
    pub total_count: i64,
    /// Only categories that occur
    pub by_category: Vec<(Category, i64)>,
    /// Only statuses that occur
    pub by_status: Vec<(FeedbackStatus, i64)>,
    /// `("YYYY-MM", count)`, most recent first, at most 12 entries
    pub by_month: Vec<(String, i64)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: Category,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCount {
    pub status: FeedbackStatus,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyCount {
    /// Calendar month in UTC, `YYYY-MM`
    pub month: String,
    pub count: i64,
}

/// Maximum number of months reported
pub const MONTHLY_TREND_LIMIT: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackAnalytics {
    pub total_count: i64,
    /// Every category in declaration order, zero counts included
    pub category_stats: Vec<CategoryCount>,
    /// Every status in declaration order, zero counts included
    pub status_stats: Vec<StatusCount>,
    pub monthly_trends: Vec<MonthlyCount>,
}

impl From<AnalyticsSnapshot> for FeedbackAnalytics {
    fn from(snapshot: AnalyticsSnapshot) -> Self {
        let count_of_category = |category: Category| {
            snapshot
                .by_category
                .iter()
                .filter(|(c, _)| *c == category)
                .map(|(_, n)| n)
                .sum()
        };
        let count_of_status = |status: FeedbackStatus| {
            snapshot
                .by_status
                .iter()
                .filter(|(s, _)| *s == status)
                .map(|(_, n)| n)
                .sum()
        };

        Self {
            total_count: snapshot.total_count,
            category_stats: Category::ALL
                .into_iter()
                .map(|category| CategoryCount {
                    category,
                    count: count_of_category(category),
                })
                .collect(),
            status_stats: FeedbackStatus::ALL
                .into_iter()
                .map(|status| StatusCount {
                    status,
                    count: count_of_status(status),
                })
                .collect(),
            monthly_trends: snapshot
                .by_month
                .iter()
                .take(MONTHLY_TREND_LIMIT)
                .map(|(month, count)| MonthlyCount {
                    month: month.clone(),
                    count: *count,
                })
                .collect(),
        }
    }
}
