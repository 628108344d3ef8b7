pub mod client;
pub mod types;

use crate::error::Result;
use std::future::Future;
use types::{RepoName, Repository};

/// Resolves an `owner/name` pair to a repository record.
pub trait RepositoryLookup {
    fn fetch_repository(&self, name: &RepoName) -> impl Future<Output = Result<Repository>> + Send;
}
