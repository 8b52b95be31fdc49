use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::models::Page;
use crate::error::Result;

const API_PREFIX: &str = "/rest/api/1.0";

/// Returned by a page callback to keep paging or cut the traversal short.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControl {
    Continue,
    Stop,
}

/// Thin wrapper over the Bitbucket Server REST API. Every call is
/// sequential and blocking from the pipeline's point of view; any transport
/// failure aborts the run.
#[derive(Clone)]
pub struct BitbucketClient {
    http: Client,
    api_url: String,
    project: String,
    token: String,
}

impl BitbucketClient {
    pub fn new(base_url: &str, project: &str, token: &str) -> Result<Self> {
        let http = Client::builder().user_agent("revmetrics").build()?;

        Ok(Self {
            http,
            api_url: format!("{}{API_PREFIX}", base_url.trim_end_matches('/')),
            project: project.to_string(),
            token: token.to_string(),
        })
    }

    pub fn pull_requests_url(&self, repo: &str) -> String {
        format!(
            "{}/projects/{}/repos/{}/pull-requests",
            self.api_url, self.project, repo
        )
    }

    pub fn activities_url(&self, repo: &str, id: u64) -> String {
        format!("{}/{id}/activities", self.pull_requests_url(repo))
    }

    pub fn changes_url(&self, repo: &str, id: u64) -> String {
        format!("{}/{id}/changes", self.pull_requests_url(repo))
    }

    /// Walk one paginated resource, handing each page's `values` to
    /// `on_page`. Stops when the API reports the last page, when
    /// `nextPageStart` is absent, or when the callback asks to.
    pub async fn get_paged<T, F>(&self, url: &str, state: Option<&str>, mut on_page: F) -> Result<()>
    where
        T: DeserializeOwned,
        F: FnMut(Vec<T>) -> Result<PageControl>,
    {
        let mut start = 0u64;

        loop {
            let mut request = self
                .http
                .get(url)
                .bearer_auth(&self.token)
                .query(&[("start", start)]);
            if let Some(state) = state {
                request = request.query(&[("state", state)]);
            }

            debug!(url, start, "request");
            let response = request.send().await?.error_for_status()?;
            let page: Page<T> = response.json().await?;

            let is_last_page = page.is_last_page || page.next_page_start.is_none();
            let next_page_start = page.next_page_start.unwrap_or(0);

            if on_page(page.values)? == PageControl::Stop {
                break;
            }
            if is_last_page {
                break;
            }
            start = next_page_start;
        }

        Ok(())
    }
}
