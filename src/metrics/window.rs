use chrono::{DateTime, Duration, FixedOffset, NaiveDate};

use crate::bitbucket::models::{PrState, PullRequest};
use crate::util::time;

/// Days the pull-request fetch reaches back before the activity window.
/// Lands on the Sunday of the week before last, so merges that closed just
/// before the window are still visible.
const LOOKBACK_DAYS: i64 = 8;

/// The run's date window: a Monday-anchored activity window plus the wider
/// pull-request retention bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub activity_start: NaiveDate,
    pub pull_request_start: NaiveDate,
}

impl ReportWindow {
    /// Window anchored at an explicit activity start date.
    pub fn for_date(activity_start: NaiveDate) -> Self {
        Self {
            activity_start,
            pull_request_start: activity_start - Duration::days(LOOKBACK_DAYS),
        }
    }

    /// Window anchored at the most recent Monday.
    pub fn current(today: NaiveDate) -> Self {
        Self::for_date(time::most_recent_monday(today))
    }

    /// Whether a pull request is kept at all: updated on or after the
    /// lookback bound.
    pub fn retains(&self, pr: &PullRequest) -> bool {
        time::on_or_after(&pr.updated_at, self.pull_request_start)
    }

    /// A pull request counts as new when created inside the activity window.
    pub fn is_new(&self, pr: &PullRequest) -> bool {
        time::on_or_after(&pr.created_at, self.activity_start)
    }

    /// Merged for window purposes: state MERGED and updated inside the
    /// activity window.
    pub fn is_merged_in_window(&self, pr: &PullRequest) -> bool {
        pr.state == PrState::Merged && time::on_or_after(&pr.updated_at, self.activity_start)
    }

    /// Whether an activity timestamp is credited to contributors.
    pub fn includes_activity(&self, ts: &DateTime<FixedOffset>) -> bool {
        time::on_or_after(ts, self.activity_start)
    }
}
