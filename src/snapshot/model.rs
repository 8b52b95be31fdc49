use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::bitbucket::models::PullRequest;
use crate::metrics::registry::{UserRegistry, UserStats};
use crate::metrics::window::ReportWindow;

/// One run's persisted output. Immutable once assembled; written once per
/// run, keyed externally by the run date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub pull_request_target_start_date: NaiveDate,
    pub activity_target_start_date: NaiveDate,
    pub recorded_at: DateTime<FixedOffset>,
    pub num_new_prs: u32,
    pub num_merged_prs: u32,
    /// Active contributors only, in name order.
    pub member_info: BTreeMap<String, UserStats>,
    /// Merged-in-window pull requests, in traversal order.
    pub merged_pr_info: Vec<MergedPrInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedPrInfo {
    pub repo: String,
    pub id: u64,
    pub author: String,
    pub time_to_merge_s: i64,
    pub from_ref: String,
    pub to_ref: String,
    pub num_comments: u32,
    pub num_rescopes: u32,
    pub num_files_changed: u32,
    pub num_files_added: u32,
    pub num_files_modified: u32,
    pub num_files_deleted: u32,
}

/// Shape the aggregated state into the persisted document. Contributors
/// with all counters at zero are dropped.
///
/// `recorded_at` is taken as an argument so it is the only field that can
/// differ between runs over identical input.
pub fn assemble(
    window: &ReportWindow,
    registry: &UserRegistry,
    pull_requests: &[PullRequest],
    recorded_at: DateTime<FixedOffset>,
) -> MetricsSnapshot {
    let num_new_prs = pull_requests.iter().filter(|pr| window.is_new(pr)).count() as u32;

    let member_info = registry
        .active_members()
        .map(|(name, stats)| (name.to_string(), stats.clone()))
        .collect();

    let merged_pr_info: Vec<MergedPrInfo> = pull_requests
        .iter()
        .filter(|pr| window.is_merged_in_window(pr))
        .map(|pr| MergedPrInfo {
            repo: pr.repo.clone(),
            id: pr.id,
            author: pr.author.clone(),
            time_to_merge_s: pr.time_to_merge_secs(),
            from_ref: pr.from_ref.clone(),
            to_ref: pr.to_ref.clone(),
            num_comments: pr.num_comments,
            num_rescopes: pr.num_rescopes,
            num_files_changed: pr.num_files_changed,
            num_files_added: pr.num_files_added,
            num_files_modified: pr.num_files_modified,
            num_files_deleted: pr.num_files_deleted,
        })
        .collect();

    MetricsSnapshot {
        pull_request_target_start_date: window.pull_request_start,
        activity_target_start_date: window.activity_start,
        recorded_at,
        num_new_prs,
        num_merged_prs: merged_pr_info.len() as u32,
        member_info,
        merged_pr_info,
    }
}
