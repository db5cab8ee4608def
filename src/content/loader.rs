//! Content loader - walks the content tree and builds the post collection

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

use super::error::ContentError;
use super::{Language, Post, PostBuilder, PostLibrary};
use crate::config::{InvalidFilePolicy, SiteConfig};

/// Decides whether a file found while walking is a post source
pub type SourcePredicate = Arc<dyn Fn(&Path) -> bool + Send + Sync>;

/// Check if a file is a markdown file
pub fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("md") || e.eq_ignore_ascii_case("markdown"))
        .unwrap_or(false)
}

/// Recursively list the files under `root` accepted by `is_source`, in file
/// name order. Directories and rejected files are skipped silently.
pub fn walk_sources<F>(root: &Path, is_source: F) -> Result<Vec<PathBuf>, ContentError>
where
    F: Fn(&Path) -> bool,
{
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| ContentError::Walk {
            path: root.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if entry.file_type().is_file() && is_source(path) {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

/// Loads posts from the content directory
#[derive(Clone)]
pub struct ContentLoader {
    builder: PostBuilder,
    on_invalid_file: InvalidFilePolicy,
    is_source: SourcePredicate,
}

impl ContentLoader {
    /// Create a new content loader
    pub fn new(builder: PostBuilder, on_invalid_file: InvalidFilePolicy) -> Self {
        Self {
            builder,
            on_invalid_file,
            is_source: Arc::new(is_markdown_file),
        }
    }

    /// Create a loader with the date and file policies of a site configuration
    pub fn from_config(config: &SiteConfig) -> anyhow::Result<Self> {
        let builder = PostBuilder::new(config.tz()?, config.on_invalid_date);
        Ok(Self::new(builder, config.on_invalid_file))
    }

    /// Replace the predicate selecting source files
    pub fn with_predicate<F>(mut self, is_source: F) -> Self
    where
        F: Fn(&Path) -> bool + Send + Sync + 'static,
    {
        self.is_source = Arc::new(is_source);
        self
    }

    /// Load every language under the content root
    pub fn load_library(&self, content_root: &Path) -> Result<PostLibrary, ContentError> {
        let mut library = HashMap::new();
        for lang in Language::ALL {
            library.insert(lang, self.load_posts(content_root, lang)?);
        }
        Ok(PostLibrary::new(library))
    }

    /// Load the posts of one language from `content_root/<lang>`, newest first
    pub fn load_posts(&self, content_root: &Path, lang: Language) -> Result<Vec<Post>, ContentError> {
        let lang_dir = content_root.join(lang.code());
        if !lang_dir.is_dir() {
            tracing::debug!("No content directory for {}: {:?}", lang, lang_dir);
            return Ok(Vec::new());
        }

        let mut posts: Vec<Post> = Vec::new();
        let mut seen: HashMap<String, PathBuf> = HashMap::new();

        for path in walk_sources(&lang_dir, |p| (self.is_source)(p))? {
            tracing::debug!("Loading {:?}", path);

            let built = self.builder.build(&path, content_root, lang).and_then(|post| {
                match seen.get(&post.slug) {
                    Some(first) => Err(ContentError::DuplicateSlug {
                        lang,
                        slug: post.slug.clone(),
                        first: first.clone(),
                        second: path.clone(),
                    }),
                    None => Ok(post),
                }
            });

            match built {
                Ok(post) => {
                    seen.insert(post.slug.clone(), path);
                    posts.push(post);
                }
                Err(e) => match self.on_invalid_file {
                    InvalidFilePolicy::Abort => return Err(e),
                    InvalidFilePolicy::Skip => {
                        tracing::warn!("Skipping post: {}", e);
                    }
                },
            }
        }

        // Newest first; slug breaks ties so the order is stable across runs
        posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));

        tracing::info!("Loaded {} posts for {}", posts.len(), lang);

        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InvalidDatePolicy;
    use chrono_tz::Tz;
    use std::fs;

    fn loader(policy: InvalidFilePolicy) -> ContentLoader {
        ContentLoader::new(PostBuilder::new(Tz::UTC, InvalidDatePolicy::Now), policy)
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn post(date: &str) -> String {
        format!("---\ntitle: Post\ndate: {}\n---\nBody\n", date)
    }

    #[test]
    fn test_posts_sorted_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "en/a.md", &post("2025-01-01"));
        write(dir.path(), "en/b.md", &post("2025-06-01"));

        let posts = loader(InvalidFilePolicy::Abort)
            .load_posts(dir.path(), Language::En)
            .unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["b", "a"]);
    }

    #[test]
    fn test_date_sort_invariant() {
        let dir = tempfile::tempdir().unwrap();
        for (i, date) in ["2023-03-01", "2025-01-09", "2024-12-31", "2024-12-31 12:00", "2022-07-14"]
            .iter()
            .enumerate()
        {
            write(dir.path(), &format!("en/nested/p{}.md", i), &post(date));
        }

        let posts = loader(InvalidFilePolicy::Abort)
            .load_posts(dir.path(), Language::En)
            .unwrap();
        assert_eq!(posts.len(), 5);
        for pair in posts.windows(2) {
            assert!(pair[0].date >= pair[1].date);
        }
    }

    #[test]
    fn test_only_markdown_files_are_loaded() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "en/post.md", &post("2025-01-01"));
        write(dir.path(), "en/image.png", "not markdown");
        write(dir.path(), "en/notes.txt", "not markdown");
        fs::create_dir_all(dir.path().join("en/empty-dir.md")).unwrap();

        let posts = loader(InvalidFilePolicy::Abort)
            .load_posts(dir.path(), Language::En)
            .unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].source, "en/post.md");
    }

    #[test]
    fn test_custom_predicate() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "en/post.md", &post("2025-01-01"));
        write(dir.path(), "en/other.txt", &post("2025-01-02"));

        let posts = loader(InvalidFilePolicy::Abort)
            .with_predicate(|p| p.extension().is_some_and(|e| e == "txt"))
            .load_posts(dir.path(), Language::En)
            .unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "other");
    }

    #[test]
    fn test_languages_are_partitioned() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "en/hello.md", &post("2025-01-01"));
        write(dir.path(), "pt/hello.md", &post("2025-01-01"));
        write(dir.path(), "pt/ola.md", &post("2025-01-02"));

        let library = loader(InvalidFilePolicy::Abort)
            .load_library(dir.path())
            .unwrap();
        assert_eq!(library.posts(Language::En).len(), 1);
        assert_eq!(library.posts(Language::Pt).len(), 2);
        assert_eq!(library.find(Language::Pt, "hello").unwrap().lang, Language::Pt);
    }

    #[test]
    fn test_missing_language_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let posts = loader(InvalidFilePolicy::Abort)
            .load_posts(dir.path(), Language::Pt)
            .unwrap();
        assert!(posts.is_empty());
    }

    #[test]
    fn test_abort_on_first_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "en/good.md", &post("2025-01-01"));
        write(dir.path(), "en/bad.md", "---\ntitle: [broken\n---\n");

        let err = loader(InvalidFilePolicy::Abort)
            .load_posts(dir.path(), Language::En)
            .unwrap_err();
        assert!(matches!(err, ContentError::FrontMatter { .. }));
    }

    #[test]
    fn test_skip_invalid_files() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "en/good.md", &post("2025-01-01"));
        write(dir.path(), "en/bad.md", "---\ntitle: [broken\n---\n");

        let posts = loader(InvalidFilePolicy::Skip)
            .load_posts(dir.path(), Language::En)
            .unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "good");
    }

    #[test]
    fn test_duplicate_slug_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "en/2024/intro.md", &post("2024-01-01"));
        write(dir.path(), "en/2025/intro.md", &post("2025-01-01"));

        let err = loader(InvalidFilePolicy::Abort)
            .load_posts(dir.path(), Language::En)
            .unwrap_err();
        assert!(matches!(err, ContentError::DuplicateSlug { slug, .. } if slug == "intro"));

        let posts = loader(InvalidFilePolicy::Skip)
            .load_posts(dir.path(), Language::En)
            .unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].source, "en/2024/intro.md");
    }

    #[test]
    fn test_loading_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "en/a.md", &post("2025-01-01"));
        write(dir.path(), "en/b.md", &post("2025-02-01"));

        let loader = loader(InvalidFilePolicy::Abort);
        let first = loader.load_posts(dir.path(), Language::En).unwrap();
        let second = loader.load_posts(dir.path(), Language::En).unwrap();
        assert_eq!(first, second);
    }
}
