use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("github error: {0}")]
    GitHub(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid repository name: {0:?} (expected owner/name)")]
    InvalidName(String),
}

pub type Result<T> = std::result::Result<T, ExplorerError>;
