use crate::error::{ExplorerError, Result};
use crate::github::types::{Issue, RepoName, Repository, RepositoryDetails, RepositoryStats};
use crate::github::RepositoryLookup;
use octocrab::Octocrab;

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

const ISSUES_PER_PAGE: &str = "30";

#[derive(Clone)]
pub struct GitHubClient {
    octo: Octocrab,
}

impl GitHubClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let octo = Octocrab::builder()
            .base_uri(base_url)
            .map_err(|e| ExplorerError::GitHub(e.to_string()))?
            .build()
            .map_err(|e| ExplorerError::GitHub(e.to_string()))?;

        Ok(Self { octo })
    }

    pub async fn fetch_repository(&self, name: &RepoName) -> Result<Repository> {
        let route = format!("/repos/{}/{}", name.owner(), name.name());
        log::debug!("GET {route}");
        self.octo
            .get(route, None::<&()>)
            .await
            .map_err(|e| ExplorerError::GitHub(e.to_string()))
    }

    /// Stats and open issues for the details screen, fetched concurrently.
    pub async fn fetch_details(&self, full_name: &str) -> Result<RepositoryDetails> {
        let name: RepoName = full_name.parse()?;
        let stats_route = format!("/repos/{}/{}", name.owner(), name.name());
        let issues_route = format!("/repos/{}/{}/issues", name.owner(), name.name());
        let params = [("state", "open"), ("per_page", ISSUES_PER_PAGE)];

        let stats = async {
            self.octo
                .get::<RepositoryStats, _, ()>(&stats_route, None)
                .await
                .map_err(|e| ExplorerError::GitHub(e.to_string()))
        };
        let issues = async {
            self.octo
                .get::<Vec<Issue>, _, _>(&issues_route, Some(&params))
                .await
                .map_err(|e| ExplorerError::GitHub(e.to_string()))
        };

        let (stats, mut issues) = futures::try_join!(stats, issues)?;
        issues.retain(|issue| !issue.is_pull_request());
        Ok(RepositoryDetails { stats, issues })
    }
}

impl RepositoryLookup for GitHubClient {
    async fn fetch_repository(&self, name: &RepoName) -> Result<Repository> {
        GitHubClient::fetch_repository(self, name).await
    }
}
