//! Typed Listing Filter
//!
//! Built from raw query strings and validated before any store is touched.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::domain::entity::feedback::Feedback;
use crate::domain::value_object::{category::Category, status::FeedbackStatus};
use crate::error::{FeedbackError, FeedbackResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedbackFilter {
    pub category: Option<Category>,
    pub status: Option<FeedbackStatus>,
    /// Inclusive lower bound on `created_at`
    pub start: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `created_at`
    pub end: Option<DateTime<Utc>>,
}

#[derive(Clone, Copy)]
enum Bound {
    Start,
    End,
}

impl FeedbackFilter {
    /// Blank strings are treated as absent.
    pub fn parse(
        category: Option<&str>,
        status: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> FeedbackResult<Self> {
        let category = non_blank(category).map(Category::parse).transpose()?;
        let status = non_blank(status).map(FeedbackStatus::parse).transpose()?;
        let start = non_blank(start_date)
            .map(|s| parse_bound(s, Bound::Start))
            .transpose()?;
        let end = non_blank(end_date)
            .map(|s| parse_bound(s, Bound::End))
            .transpose()?;

        if let (Some(start), Some(end)) = (start, end)
            && start > end
        {
            return Err(FeedbackError::Validation(
                "startDate must not be after endDate".into(),
            ));
        }

        Ok(Self {
            category,
            status,
            start,
            end,
        })
    }

    pub fn matches(&self, feedback: &Feedback) -> bool {
        self.category.is_none_or(|c| c == feedback.category)
            && self.status.is_none_or(|s| s == feedback.status)
            && self.start.is_none_or(|start| feedback.created_at >= start)
            && self.end.is_none_or(|end| feedback.created_at <= end)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// RFC 3339 timestamp, or `YYYY-MM-DD` covering the whole UTC day
fn parse_bound(input: &str, bound: Bound) -> FeedbackResult<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(input) {
        return Ok(at.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
        FeedbackError::Validation(format!(
            "Invalid date '{}': expected YYYY-MM-DD or RFC 3339",
            input
        ))
    })?;

    let time = match bound {
        Bound::Start => NaiveTime::MIN,
        Bound::End => NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999)
            .ok_or_else(|| FeedbackError::Internal("end of day out of range".into()))?,
    };

    Ok(date.and_time(time).and_utc())
}
