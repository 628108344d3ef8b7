use crate::github::client::DEFAULT_API_BASE_URL;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_base_url: String,
    pub persist: bool,
    #[serde(default)]
    pub storage_path: Option<PathBuf>,
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            persist: true,
            storage_path: None,
            log_level: None,
        }
    }
}

/// Command-line values that take precedence over file and environment.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub api_base_url: Option<String>,
    pub storage_path: Option<PathBuf>,
    pub no_persist: bool,
    pub log_level: Option<String>,
}

impl Config {
    pub fn load(overrides: Overrides) -> Self {
        let config_file = config_dir().join("github-explorer").join("config.toml");

        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        if config_file.exists() {
            figment = figment.merge(Toml::file(&config_file));
        }

        figment = figment.merge(Env::prefixed("GITHUB_EXPLORER_"));

        if let Some(url) = overrides.api_base_url {
            figment = figment.merge(Serialized::default("api_base_url", url));
        }
        if let Some(path) = overrides.storage_path {
            figment = figment.merge(Serialized::default("storage_path", path));
        }
        if overrides.no_persist {
            figment = figment.merge(Serialized::default("persist", false));
        }
        if let Some(level) = overrides.log_level {
            figment = figment.merge(Serialized::default("log_level", level));
        }

        match figment.extract() {
            Ok(config) => config,
            Err(e) => {
                eprintln!("warning: config parse error, using defaults: {e}");
                Config::default()
            }
        }
    }

    pub fn resolved_storage_path(&self) -> PathBuf {
        self.storage_path
            .clone()
            .unwrap_or_else(|| config_dir().join("github-explorer").join("storage.json"))
    }
}

pub fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(".config"))
        })
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn with_config_home<F: FnOnce(&std::path::Path)>(f: F) {
        let dir = tempfile::tempdir().unwrap();
        let previous = std::env::var("XDG_CONFIG_HOME").ok();
        std::env::set_var("XDG_CONFIG_HOME", dir.path());
        f(dir.path());
        match previous {
            Some(p) => std::env::set_var("XDG_CONFIG_HOME", p),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }

    #[test]
    #[serial]
    fn defaults_without_file_or_env() {
        with_config_home(|home| {
            let config = Config::load(Overrides::default());
            assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
            assert!(config.persist);
            assert_eq!(
                config.resolved_storage_path(),
                home.join("github-explorer").join("storage.json")
            );
        });
    }

    #[test]
    #[serial]
    fn file_then_env_then_overrides() {
        with_config_home(|home| {
            let dir = home.join("github-explorer");
            std::fs::create_dir_all(&dir).unwrap();
            std::fs::write(
                dir.join("config.toml"),
                "api_base_url = \"http://file.example\"\npersist = true\nlog_level = \"info\"\n",
            )
            .unwrap();

            let config = Config::load(Overrides::default());
            assert_eq!(config.api_base_url, "http://file.example");
            assert_eq!(config.log_level.as_deref(), Some("info"));

            std::env::set_var("GITHUB_EXPLORER_API_BASE_URL", "http://env.example");
            let config = Config::load(Overrides::default());
            assert_eq!(config.api_base_url, "http://env.example");

            let config = Config::load(Overrides {
                api_base_url: Some("http://cli.example".to_string()),
                no_persist: true,
                ..Overrides::default()
            });
            std::env::remove_var("GITHUB_EXPLORER_API_BASE_URL");
            assert_eq!(config.api_base_url, "http://cli.example");
            assert!(!config.persist);
        });
    }

    #[test]
    #[serial]
    fn broken_file_falls_back_to_defaults() {
        with_config_home(|home| {
            let dir = home.join("github-explorer");
            std::fs::create_dir_all(&dir).unwrap();
            std::fs::write(dir.join("config.toml"), "persist = \"sometimes\"").unwrap();

            let config = Config::load(Overrides::default());
            assert!(config.persist);
            assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        });
    }
}
