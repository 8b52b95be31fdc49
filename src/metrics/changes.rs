use crate::bitbucket::models::{ChangeType, PullRequest};

/// Tally one change record into the pull request's file counters.
/// Unrecognized types bump only the changed total.
pub fn apply_change(pr: &mut PullRequest, change_type: ChangeType) {
    pr.num_files_changed += 1;

    match change_type {
        ChangeType::Add => pr.num_files_added += 1,
        ChangeType::Modify => pr.num_files_modified += 1,
        ChangeType::Delete => pr.num_files_deleted += 1,
        ChangeType::Other => {}
    }
}
