//! Site configuration (_config.yml)

use anyhow::{anyhow, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::content::Language;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub url: String,

    // Directory
    pub content_dir: String,
    pub static_dir: String,
    pub i18n_dir: String,
    pub counter_file: String,

    // Writing
    pub default_language: Language,
    pub timezone: String,
    pub highlight_theme: String,

    // Pagination
    pub per_page: usize,

    // Policies
    pub on_invalid_file: InvalidFilePolicy,
    pub on_invalid_date: InvalidDatePolicy,
    pub page_overflow: PageOverflow,
    pub on_load_failure: LoadFailurePolicy,

    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Quillpost".to_string(),
            subtitle: String::new(),
            author: "Anonymous".to_string(),
            url: "http://localhost:8080".to_string(),

            content_dir: "content".to_string(),
            static_dir: "static".to_string(),
            i18n_dir: "i18n".to_string(),
            counter_file: "visits.json".to_string(),

            default_language: Language::En,
            timezone: "UTC".to_string(),
            highlight_theme: "InspiredGitHub".to_string(),

            per_page: 10,

            on_invalid_file: InvalidFilePolicy::default(),
            on_invalid_date: InvalidDatePolicy::default(),
            page_overflow: PageOverflow::default(),
            on_load_failure: LoadFailurePolicy::default(),

            server: ServerConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Resolve the configured IANA timezone
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| anyhow!("Invalid timezone {:?}: {}", self.timezone, e))
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// What the loader does when a single source file cannot be built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidFilePolicy {
    /// Abort the whole load on the first broken file
    #[default]
    Abort,
    /// Log a warning and leave the file out
    Skip,
}

/// How an unparseable `date` field is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidDatePolicy {
    /// Fall back to the current time
    #[default]
    Now,
    /// Fail the document
    Error,
}

/// Behaviour of pagination for a page past the last one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageOverflow {
    /// Show the last page
    #[default]
    Clamp,
    /// Show an empty page
    Empty,
}

/// What `serve` does when the content cannot be loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadFailurePolicy {
    /// Exit with the load error
    Refuse,
    /// Serve an empty blog and log the error
    #[default]
    Empty,
}
