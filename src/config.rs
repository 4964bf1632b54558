use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

const APP_DIR: &str = "arxiv-dashboard";
const CONFIG_FILE: &str = "config.toml";
const DATABASE_FILE: &str = "research_dashboard.db";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database_path: PathBuf,
    pub log_file: Option<PathBuf>,
    pub feed: FeedConfig,
    pub server: ServerConfig,
}

/// Query parameters for the arXiv Atom API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub endpoint: String,
    pub category: String,
    pub start: u32,
    pub max_results: u32,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    Relevance,
    LastUpdatedDate,
    SubmittedDate,
}

impl SortBy {
    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::Relevance => "relevance",
            SortBy::LastUpdatedDate => "lastUpdatedDate",
            SortBy::SubmittedDate => "submittedDate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub page_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        let database_path = dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DATABASE_FILE);

        Self {
            database_path,
            log_file: None,
            feed: FeedConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://export.arxiv.org/api/query".to_string(),
            category: "cs.AI".to_string(),
            start: 0,
            max_results: 20,
            sort_by: SortBy::SubmittedDate,
            sort_order: SortOrder::Descending,
            timeout_secs: 30,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".to_string(),
            page_size: 5,
        }
    }
}

impl Config {
    /// Load from the default location, falling back to defaults when the file is absent.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        if config.server.page_size == 0 {
            tracing::warn!("server.page_size must be positive, using default");
            config.server.page_size = ServerConfig::default().page_size;
        }
        Ok(config)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.feed.category, "cs.AI");
        assert_eq!(config.feed.max_results, 20);
        assert_eq!(config.feed.sort_by, SortBy::SubmittedDate);
        assert_eq!(config.feed.sort_order, SortOrder::Descending);
        assert_eq!(config.server.page_size, 5);
        assert!(config.database_path.ends_with(DATABASE_FILE));
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = Config::from_toml(
            r#"
database_path = "/tmp/papers.db"

[feed]
category = "cs.CL"
sort_by = "lastUpdatedDate"
sort_order = "ascending"

[server]
page_size = 10
"#,
        )
        .unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/papers.db"));
        assert_eq!(config.feed.category, "cs.CL");
        assert_eq!(config.feed.sort_by, SortBy::LastUpdatedDate);
        assert_eq!(config.feed.sort_order, SortOrder::Ascending);
        assert_eq!(config.feed.endpoint, "http://export.arxiv.org/api/query");
        assert_eq!(config.server.page_size, 10);
        assert_eq!(config.server.bind, "127.0.0.1:5000");
    }

    #[test]
    fn zero_page_size_falls_back() {
        let config = Config::from_toml("[server]\npage_size = 0\n").unwrap();
        assert_eq!(config.server.page_size, 5);
    }

    #[test]
    fn load_from_reads_file() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[feed]\nmax_results = 7\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.feed.max_results, 7);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(Config::from_toml("[feed\n").is_err());
    }
}
