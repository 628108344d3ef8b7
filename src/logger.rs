use crate::error::{ExplorerError, Result};
use log::LevelFilter;
use simple_logger::SimpleLogger;

/// `configured` wins when it parses; otherwise `fallback` is used.
pub fn init(configured: Option<&str>, fallback: LevelFilter) -> Result<()> {
    let level = resolve_level(configured, fallback);
    SimpleLogger::new()
        .with_level(level)
        .init()
        .map_err(|e| ExplorerError::Config(format!("logger: {e}")))
}

fn resolve_level(configured: Option<&str>, fallback: LevelFilter) -> LevelFilter {
    match configured.map(str::parse::<LevelFilter>) {
        Some(Ok(level)) => level,
        Some(Err(_)) => {
            eprintln!("warning: unknown log level {configured:?}, using {fallback}");
            fallback
        }
        None => fallback,
    }
}
