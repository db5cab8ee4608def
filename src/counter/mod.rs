//! Visit counter persisted to a JSON file
//!
//! Counts are held in memory behind a mutex and written back after every
//! hit. A failed write is logged and otherwise ignored: the counter is a
//! convenience, never a reason to fail a request.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::content::Language;

/// On-disk representation of the counter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisitCounts {
    /// Post page views across all posts
    pub total: u64,
    /// Views per post, keyed by `<lang>/<slug>`
    pub posts: BTreeMap<String, u64>,
}

impl VisitCounts {
    /// Views of one post
    pub fn views(&self, lang: Language, slug: &str) -> u64 {
        self.posts.get(&post_key(lang, slug)).copied().unwrap_or(0)
    }
}

fn post_key(lang: Language, slug: &str) -> String {
    format!("{}/{}", lang.code(), slug)
}

/// Thread-safe visit counter backed by a JSON file
#[derive(Debug)]
pub struct VisitCounter {
    path: PathBuf,
    counts: Mutex<VisitCounts>,
}

impl VisitCounter {
    /// Load the counter from disk; a missing or unreadable file starts from zero
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let counts = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<VisitCounts>(&content) {
                Ok(counts) => counts,
                Err(e) => {
                    tracing::warn!("Ignoring corrupt visit counter {:?}: {}", path, e);
                    VisitCounts::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => VisitCounts::default(),
            Err(e) => {
                tracing::warn!("Failed to read visit counter {:?}: {}", path, e);
                VisitCounts::default()
            }
        };

        Self {
            path,
            counts: Mutex::new(counts),
        }
    }

    /// Record one view of a post and return its new count
    pub async fn hit(&self, lang: Language, slug: &str) -> u64 {
        let mut counts = self.counts.lock().await;
        counts.total += 1;
        let views = counts.posts.entry(post_key(lang, slug)).or_insert(0);
        *views += 1;
        let views = *views;

        if let Err(e) = save(&self.path, &counts).await {
            tracing::warn!("Failed to persist visit counter {:?}: {}", self.path, e);
        }

        views
    }

    /// Copy of the current counts
    pub async fn snapshot(&self) -> VisitCounts {
        self.counts.lock().await.clone()
    }
}

/// Write through a temporary file so a crash never leaves half a JSON document
async fn save(path: &Path, counts: &VisitCounts) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let content = serde_json::to_string_pretty(counts)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, content).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}
