use tracing::{debug, info};

use crate::bitbucket::models::{
    Activity, ActivityRecord, ChangeRecord, PullRequest, PullRequestRecord,
};
use crate::bitbucket::{BitbucketClient, PageControl};
use crate::error::Result;
use crate::snapshot::{self, MetricsSnapshot};
use crate::util::time;

use super::changes;
use super::classify::{self, ReviewTracker};
use super::registry::UserRegistry;
use super::window::ReportWindow;

/// Fold one page of pull-request records into `out`.
///
/// Precondition: the pull-requests resource returns records in descending
/// update order. The first record older than the lookback bound therefore
/// means every remaining record and page is older too, and traversal stops
/// without fetching them.
pub fn ingest_pull_request_page(
    records: Vec<PullRequestRecord>,
    repo: &str,
    window: &ReportWindow,
    registry: &mut UserRegistry,
    out: &mut Vec<PullRequest>,
) -> Result<PageControl> {
    for record in records {
        let pr = PullRequest::from_record(record, repo)?;
        registry.get_or_create(&pr.author);

        if !window.retains(&pr) {
            return Ok(PageControl::Stop);
        }

        // Creation is credited here, during the fetch, whether or not the
        // pull request picks up any classified activity later.
        if window.is_new(&pr) {
            registry.get_or_create(&pr.author).num_prs_created += 1;
        }

        out.push(pr);
    }

    Ok(PageControl::Continue)
}

/// Fold one page of activity records into the pull request's counters.
pub fn classify_page(
    records: Vec<ActivityRecord>,
    pr: &mut PullRequest,
    window: &ReportWindow,
    tracker: &mut ReviewTracker,
    registry: &mut UserRegistry,
) -> Result<PageControl> {
    for record in records {
        let activity = Activity::from_record(record)?;
        classify::apply_activity(pr, &activity, window, tracker, registry);
    }

    Ok(PageControl::Continue)
}

/// Collect every retained pull request across the configured repositories.
pub async fn fetch_pull_requests(
    client: &BitbucketClient,
    repos: &[String],
    window: &ReportWindow,
    registry: &mut UserRegistry,
) -> Result<Vec<PullRequest>> {
    let mut pull_requests = Vec::new();

    for repo in repos {
        let url = client.pull_requests_url(repo);
        client
            .get_paged(&url, Some("all"), |records| {
                ingest_pull_request_page(records, repo, window, registry, &mut pull_requests)
            })
            .await?;
        debug!(repo, total = pull_requests.len(), "Repository fetched");
    }

    Ok(pull_requests)
}

/// Classify the activity stream of every retained pull request, one at a
/// time, in page-arrival order.
pub async fn fetch_activities(
    client: &BitbucketClient,
    pull_requests: &mut [PullRequest],
    window: &ReportWindow,
    registry: &mut UserRegistry,
) -> Result<()> {
    for pr in pull_requests.iter_mut() {
        let url = client.activities_url(&pr.repo, pr.id);
        let mut tracker = ReviewTracker::new();

        client
            .get_paged(&url, None, |records| {
                classify_page(records, pr, window, &mut tracker, registry)
            })
            .await?;
    }

    Ok(())
}

/// Tally file changes for every merged-in-window pull request.
pub async fn fetch_changes(
    client: &BitbucketClient,
    pull_requests: &mut [PullRequest],
    window: &ReportWindow,
) -> Result<()> {
    for pr in pull_requests
        .iter_mut()
        .filter(|pr| window.is_merged_in_window(pr))
    {
        let url = client.changes_url(&pr.repo, pr.id);

        client
            .get_paged::<ChangeRecord, _>(&url, None, |records| {
                for record in records {
                    changes::apply_change(pr, record.change_type);
                }
                Ok(PageControl::Continue)
            })
            .await?;
    }

    Ok(())
}

/// Run the full collection pipeline and assemble the snapshot: pull
/// requests, then activities, then changes, strictly in sequence.
pub async fn run(
    client: &BitbucketClient,
    repos: &[String],
    window: &ReportWindow,
) -> Result<MetricsSnapshot> {
    let mut registry = UserRegistry::new();

    let mut pull_requests = fetch_pull_requests(client, repos, window, &mut registry).await?;
    info!(count = pull_requests.len(), "Collected pull requests");

    fetch_activities(client, &mut pull_requests, window, &mut registry).await?;
    fetch_changes(client, &mut pull_requests, window).await?;

    Ok(snapshot::assemble(
        window,
        &registry,
        &pull_requests,
        time::now_local(),
    ))
}
