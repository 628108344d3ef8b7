use crate::error::{ExplorerError, Result};
use crate::github::types::{RepoName, Repository};
use crate::github::RepositoryLookup;
use crate::storage::LocalStorage;

pub const STORAGE_KEY: &str = "@GithubExplorer:repositories";

pub const EMPTY_INPUT_ERROR: &str = "Digite o autor/nome do repositório.";
pub const LOOKUP_FAILED_ERROR: &str = "Erro na busca por esse repositório";

/// Search text, inline error and the append-only result list.
pub struct Dashboard {
    input: String,
    input_error: Option<String>,
    repositories: Vec<Repository>,
    storage: Option<LocalStorage>,
}

impl Dashboard {
    /// Starts from whatever `storage` holds under [`STORAGE_KEY`], or empty
    /// when persistence is off.
    pub fn new(storage: Option<LocalStorage>) -> Self {
        let repositories = storage.as_ref().map(load_repositories).unwrap_or_default();
        Self {
            input: String::new(),
            input_error: None,
            repositories,
            storage,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn input_error(&self) -> Option<&str> {
        self.input_error.as_deref()
    }

    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    pub fn input_push(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn input_backspace(&mut self) {
        self.input.pop();
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Validates the input. Returns the name to look up, or `None` after
    /// setting the inline error.
    pub fn begin_search(&mut self) -> Option<RepoName> {
        let query = self.input.trim();
        if query.is_empty() {
            self.input_error = Some(EMPTY_INPUT_ERROR.to_string());
            return None;
        }
        match query.parse::<RepoName>() {
            Ok(name) => Some(name),
            Err(e) => {
                log::debug!("rejected search input: {e}");
                self.input_error = Some(LOOKUP_FAILED_ERROR.to_string());
                None
            }
        }
    }

    pub fn finish_search(&mut self, result: Result<Repository>) {
        match result {
            Ok(repository) => {
                self.repositories.push(repository);
                self.persist();
                self.input.clear();
                self.input_error = None;
            }
            Err(e) => {
                log::debug!("repository lookup failed: {e}");
                self.input_error = Some(LOOKUP_FAILED_ERROR.to_string());
            }
        }
    }

    /// One complete submit: validate, look up once, append or set the error.
    pub async fn search<L: RepositoryLookup>(&mut self, lookup: &L) {
        if let Some(name) = self.begin_search() {
            let result = lookup.fetch_repository(&name).await;
            self.finish_search(result);
        }
    }

    fn persist(&self) {
        let Some(storage) = &self.storage else {
            return;
        };
        let saved = serde_json::to_string(&self.repositories)
            .map_err(ExplorerError::from)
            .and_then(|json| storage.set_item(STORAGE_KEY, &json));
        if let Err(e) = saved {
            log::warn!("could not save repositories to {}: {e}", storage.path().display());
        }
    }
}

fn load_repositories(storage: &LocalStorage) -> Vec<Repository> {
    let stored = match storage.get_item(STORAGE_KEY) {
        Ok(Some(s)) => s,
        Ok(None) => return Vec::new(),
        Err(e) => {
            log::warn!("could not read {}: {e}", storage.path().display());
            return Vec::new();
        }
    };
    match serde_json::from_str(&stored) {
        Ok(repositories) => repositories,
        Err(e) => {
            log::warn!("ignoring unreadable {STORAGE_KEY} entry: {e}");
            Vec::new()
        }
    }
}
