//! Create a new post

use anyhow::{bail, Result};
use chrono::Utc;
use std::fs;
use std::path::PathBuf;

use crate::content::Language;
use crate::Blog;

/// Scaffold `content/<lang>/<slug>.md` and return its path
pub fn create_post(
    blog: &Blog,
    title: &str,
    lang: Language,
    slug: Option<&str>,
) -> Result<PathBuf> {
    let slug = slug::slugify(slug.unwrap_or(title));
    if slug.is_empty() {
        bail!("Cannot derive a slug from {:?}; pass --slug", title);
    }

    let target_dir = blog.content_dir.join(lang.code());
    fs::create_dir_all(&target_dir)?;

    let file_path = target_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        bail!("File already exists: {:?}", file_path);
    }

    let now = Utc::now().with_timezone(&blog.config.tz()?);
    // A JSON string is also a valid double-quoted YAML scalar
    let content = format!(
        "---\ntitle: {}\ndate: {}\ndescription: \"\"\ntags: []\n---\n",
        serde_json::to_string(title)?,
        now.format("%Y-%m-%d %H:%M:%S %z")
    );

    fs::write(&file_path, content)?;
    tracing::info!("Created {:?}", file_path);

    Ok(file_path)
}
