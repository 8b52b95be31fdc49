use std::collections::HashSet;

use crate::bitbucket::models::{Action, Activity, PullRequest};

use super::registry::UserRegistry;
use super::window::ReportWindow;

/// Per-pull-request dedup state: one user contributes at most one review
/// and one approval per pull request, no matter how many activity records
/// they generate on it. Reset for every pull request; lives across all of
/// that pull request's activity pages.
#[derive(Debug, Default)]
pub struct ReviewTracker {
    reviewed: HashSet<String>,
    approved: HashSet<String>,
}

impl ReviewTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn mark_reviewed(&mut self, registry: &mut UserRegistry, name: &str) {
        if self.reviewed.insert(name.to_string()) {
            registry.get_or_create(name).num_prs_reviewed += 1;
        }
    }

    fn mark_approved(&mut self, registry: &mut UserRegistry, name: &str) {
        if self.approved.insert(name.to_string()) {
            registry.get_or_create(name).num_prs_approved += 1;
        }
    }
}

/// Route one activity into the pull request's and the actor's counters.
///
/// Stale (outside-window) activity and comments on one's own pull request
/// never credit the actor; the pull request's own totals are unaffected by
/// either rule.
pub fn apply_activity(
    pr: &mut PullRequest,
    activity: &Activity,
    window: &ReportWindow,
    tracker: &mut ReviewTracker,
    registry: &mut UserRegistry,
) {
    // Every actor lands in the registry, active or not.
    registry.get_or_create(&activity.user);

    let in_window = window.includes_activity(&activity.created_at);
    let actor_is_author = activity.user == pr.author;

    match activity.action {
        Action::Commented => {
            pr.num_comments += 1;

            if !in_window || actor_is_author {
                return;
            }

            registry.get_or_create(&activity.user).num_comments += 1;
            tracker.mark_reviewed(registry, &activity.user);
        }
        Action::Approved => {
            if !in_window {
                return;
            }
            tracker.mark_approved(registry, &activity.user);
            // An approval counts as a review as well.
            tracker.mark_reviewed(registry, &activity.user);
        }
        Action::Reviewed => {
            if !in_window {
                return;
            }
            tracker.mark_reviewed(registry, &activity.user);
        }
        Action::Rescoped => {
            // Counted unconditionally, window or not.
            pr.num_rescopes += 1;
        }
        Action::Other => {}
    }
}
