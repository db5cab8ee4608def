//! quillpost: a small bilingual (English/Portuguese) Markdown blog server
//!
//! Posts are Markdown files with a YAML front-matter block, stored under
//! `content/<lang>/`. They are loaded once at startup into an immutable
//! [`content::PostLibrary`] and served as HTML pages rendered with Tera.

pub mod commands;
pub mod config;
pub mod content;
pub mod counter;
pub mod helpers;
pub mod i18n;
pub mod query;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::{ContentLoader, PostLibrary};

/// A blog rooted at a directory
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Markdown sources, one subdirectory per language
    pub content_dir: PathBuf,
    /// Files served under `/static`
    pub static_dir: PathBuf,
    /// Optional translation overrides
    pub i18n_dir: PathBuf,
    /// Visit counter file
    pub counter_path: PathBuf,
}

impl Blog {
    /// Open the blog in a directory, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };
        config.tz()?;

        let content_dir = base_dir.join(&config.content_dir);
        let static_dir = base_dir.join(&config.static_dir);
        let i18n_dir = base_dir.join(&config.i18n_dir);
        let counter_path = base_dir.join(&config.counter_file);

        Ok(Self {
            config,
            base_dir,
            content_dir,
            static_dir,
            i18n_dir,
            counter_path,
        })
    }

    /// Loader configured with this blog's policies
    pub fn loader(&self) -> Result<ContentLoader> {
        ContentLoader::from_config(&self.config)
    }

    /// Load every post of every language
    pub fn load_library(&self) -> Result<PostLibrary> {
        Ok(self.loader()?.load_library(&self.content_dir)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_without_config() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        assert_eq!(blog.content_dir, dir.path().join("content"));
        assert_eq!(blog.counter_path, dir.path().join("visits.json"));
        assert!(blog.load_library().unwrap().is_empty());
    }

    #[test]
    fn test_config_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("_config.yml"),
            "content_dir: posts\nstatic_dir: public\ncounter_file: data/visits.json\n",
        )
        .unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        assert_eq!(blog.content_dir, dir.path().join("posts"));
        assert_eq!(blog.static_dir, dir.path().join("public"));
        assert_eq!(blog.counter_path, dir.path().join("data/visits.json"));
    }

    #[test]
    fn test_invalid_timezone_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("_config.yml"), "timezone: Mars/Olympus\n").unwrap();
        assert!(Blog::new(dir.path()).is_err());
    }
}
