use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::util::time;

/// Page envelope shared by every paginated resource.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub values: Vec<T>,
    #[serde(default)]
    pub is_last_page: bool,
    #[serde(default)]
    pub next_page_start: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct UserRecord {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthorRecord {
    pub user: UserRecord,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefRecord {
    pub display_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestRecord {
    pub id: u64,
    pub state: PrState,
    pub created_date: i64,
    pub updated_date: i64,
    pub author: AuthorRecord,
    pub from_ref: RefRecord,
    pub to_ref: RefRecord,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    pub created_date: i64,
    pub user: UserRecord,
    pub action: Action,
}

#[derive(Debug, Deserialize)]
pub struct ChangeRecord {
    #[serde(rename = "type")]
    pub change_type: ChangeType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrState {
    Open,
    Merged,
    Declined,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Commented,
    Approved,
    /// The "needs work" verdict.
    Reviewed,
    Rescoped,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeType {
    Add,
    Modify,
    Delete,
    #[serde(other)]
    Other,
}

/// One pull request retained for the run, with the counters the activity
/// and change passes accumulate into.
#[derive(Debug, Clone)]
pub struct PullRequest {
    pub repo: String,
    pub id: u64,
    pub state: PrState,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
    /// Registry key of the author.
    pub author: String,
    pub from_ref: String,
    pub to_ref: String,
    pub num_comments: u32,
    pub num_rescopes: u32,
    pub num_files_changed: u32,
    pub num_files_added: u32,
    pub num_files_modified: u32,
    pub num_files_deleted: u32,
}

impl PullRequest {
    pub fn from_record(record: PullRequestRecord, repo: &str) -> Result<Self> {
        Ok(Self {
            repo: repo.to_string(),
            id: record.id,
            state: record.state,
            created_at: time::from_epoch_ms(record.created_date)?,
            updated_at: time::from_epoch_ms(record.updated_date)?,
            author: record.author.user.name,
            from_ref: record.from_ref.display_id,
            to_ref: record.to_ref.display_id,
            num_comments: 0,
            num_rescopes: 0,
            num_files_changed: 0,
            num_files_added: 0,
            num_files_modified: 0,
            num_files_deleted: 0,
        })
    }

    pub fn time_to_merge_secs(&self) -> i64 {
        time::time_to_merge_secs(&self.created_at, &self.updated_at)
    }
}

/// A single review event; dropped as soon as it has been classified.
#[derive(Debug, Clone)]
pub struct Activity {
    pub created_at: DateTime<FixedOffset>,
    pub user: String,
    pub action: Action,
}

impl Activity {
    pub fn from_record(record: ActivityRecord) -> Result<Self> {
        Ok(Self {
            created_at: time::from_epoch_ms(record.created_date)?,
            user: record.user.name,
            action: record.action,
        })
    }
}
