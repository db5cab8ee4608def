//! Errors raised while building the post collection

use std::path::PathBuf;
use thiserror::Error;

use super::Language;

/// Failure to split or decode a front-matter block
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("front-matter opened with `---` is never closed")]
    Unterminated,

    #[error("malformed front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Failure to build a single post, or a conflict between two posts
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk {path:?}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("{path:?}: {source}")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },

    #[error("{path:?}: unparseable date {value:?}")]
    InvalidDate { path: PathBuf, value: String },

    #[error("{path:?}: failed to render markdown: {source}")]
    Render {
        path: PathBuf,
        #[source]
        source: syntect::Error,
    },

    #[error("duplicate slug {slug:?} in language {lang}: {first:?} and {second:?}")]
    DuplicateSlug {
        lang: Language,
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}
