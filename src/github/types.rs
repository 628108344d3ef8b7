use crate::error::ExplorerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A repository as returned by `GET /repos/{owner}/{name}`, trimmed to the
/// fields the dashboard keeps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub owner: Owner,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
    pub avatar_url: String,
}

impl Repository {
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Details route for this entry.
    pub fn route(&self) -> String {
        format!("/repositories/{}", self.full_name)
    }
}

/// A validated `owner/name` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoName {
    owner: String,
    name: String,
}

impl RepoName {
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for RepoName {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_matches('/');
        let invalid = || ExplorerError::InvalidName(s.to_string());
        let (owner, name) = trimmed.split_once('/').ok_or_else(invalid)?;
        let valid_segment =
            |seg: &str| !seg.is_empty() && !seg.contains('/') && !seg.chars().any(char::is_whitespace);
        if !valid_segment(owner) || !valid_segment(name) {
            return Err(invalid());
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositoryStats {
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub open_issues_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Issue {
    pub title: String,
    pub html_url: String,
    pub user: IssueAuthor,
    /// Present when the item is a pull request.
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

impl Issue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssueAuthor {
    pub login: String,
}

/// Everything the details screen fetches on open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryDetails {
    pub stats: RepositoryStats,
    pub issues: Vec<Issue>,
}
