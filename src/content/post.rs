//! Post model and the builder that turns one source file into a post

use chrono::{DateTime, FixedOffset, Local};
use chrono_tz::Tz;
use serde::Serialize;
use std::fs;
use std::path::Path;

use super::error::ContentError;
use super::frontmatter::{DateField, FrontMatter, DEFAULT_TITLE};
use super::{Language, MarkdownRenderer};
use crate::config::InvalidDatePolicy;

/// Assumed reading speed, in words per minute
pub const WORDS_PER_MINUTE: usize = 200;

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    /// Post title
    pub title: String,

    /// Slug (URL path segment), the source file name without its extension
    pub slug: String,

    /// Publication date
    pub date: DateTime<FixedOffset>,

    /// Short summary, empty when not given
    pub description: String,

    /// Post tags, in front-matter order
    pub tags: Vec<String>,

    /// Rendered HTML content
    pub content: String,

    /// Estimated minutes to read
    pub reading_time: usize,

    /// Whitespace-delimited words in the markdown body
    pub word_count: usize,

    /// Language partition the post was loaded from
    pub lang: Language,

    /// Source file path, relative to the content root
    pub source: String,
}

impl Post {
    /// Whether the post carries exactly this tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// The description, or `None` when it is blank
    pub fn summary(&self) -> Option<&str> {
        Some(self.description.trim()).filter(|d| !d.is_empty())
    }

    /// Get the previous (newer) post in a date-sorted list
    pub fn prev<'a>(&self, posts: &'a [Post]) -> Option<&'a Post> {
        let pos = posts.iter().position(|p| p.slug == self.slug)?;
        pos.checked_sub(1).map(|i| &posts[i])
    }

    /// Get the next (older) post in a date-sorted list
    pub fn next<'a>(&self, posts: &'a [Post]) -> Option<&'a Post> {
        let pos = posts.iter().position(|p| p.slug == self.slug)?;
        posts.get(pos + 1)
    }
}

/// Slug of a source file: its file name with the extension stripped
pub fn slug_of(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Number of whitespace-delimited words
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// `ceil(words / 200)`, never less than one minute
pub fn reading_time(words: usize) -> usize {
    words.div_ceil(WORDS_PER_MINUTE).max(1)
}

/// Builds a [`Post`] from a single source file
#[derive(Debug, Clone)]
pub struct PostBuilder {
    renderer: MarkdownRenderer,
    tz: Tz,
    on_invalid_date: InvalidDatePolicy,
}

impl PostBuilder {
    pub fn new(tz: Tz, on_invalid_date: InvalidDatePolicy) -> Self {
        Self {
            renderer: MarkdownRenderer::new(),
            tz,
            on_invalid_date,
        }
    }

    /// Read, parse and render one file.
    ///
    /// `root` is the content root the file was found under; it only serves to
    /// record a relative `source` path.
    pub fn build(&self, path: &Path, root: &Path, lang: Language) -> Result<Post, ContentError> {
        let raw = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let (fm, body) = FrontMatter::parse(&raw).map_err(|source| ContentError::FrontMatter {
            path: path.to_path_buf(),
            source,
        })?;

        let date = match fm.date_in(self.tz) {
            DateField::Parsed(date) => date,
            DateField::Missing => now(),
            DateField::Invalid(value) => match self.on_invalid_date {
                InvalidDatePolicy::Now => {
                    tracing::warn!("Unparseable date {:?} in {:?}, using now", value, path);
                    now()
                }
                InvalidDatePolicy::Error => {
                    return Err(ContentError::InvalidDate {
                        path: path.to_path_buf(),
                        value,
                    })
                }
            },
        };

        let content = self
            .renderer
            .render(body)
            .map_err(|source| ContentError::Render {
                path: path.to_path_buf(),
                source,
            })?;

        let slug = slug_of(path).ok_or_else(|| ContentError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "file name is not valid UTF-8",
            ),
        })?;

        let word_count = count_words(body);

        let source = path
            .strip_prefix(root)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        Ok(Post {
            title: fm.title_or(DEFAULT_TITLE),
            slug,
            date,
            description: fm.description(),
            tags: fm.tags(),
            content,
            reading_time: reading_time(word_count),
            word_count,
            lang,
            source,
        })
    }
}

fn now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn builder() -> PostBuilder {
        PostBuilder::new(Tz::UTC, InvalidDatePolicy::Now)
    }

    #[test]
    fn test_slug_ignores_title() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "my-first-post.md",
            "---\ntitle: Something Else Entirely\n---\nHi\n",
        );
        let post = builder().build(&path, dir.path(), Language::En).unwrap();
        assert_eq!(post.slug, "my-first-post");
        assert_eq!(post.title, "Something Else Entirely");
        assert_eq!(post.source, "my-first-post.md");
    }

    #[test]
    fn test_slug_of() {
        assert_eq!(slug_of(Path::new("a/b/hello.md")).as_deref(), Some("hello"));
        assert_eq!(slug_of(Path::new("v1.2-notes.md")).as_deref(), Some("v1.2-notes"));
    }

    #[test]
    fn test_reading_time() {
        assert_eq!(reading_time(0), 1);
        assert_eq!(reading_time(1), 1);
        assert_eq!(reading_time(200), 1);
        assert_eq!(reading_time(201), 2);
        assert_eq!(reading_time(1000), 5);
    }

    #[test]
    fn test_reading_time_is_monotonic() {
        let mut last = reading_time(0);
        for words in 1..2000 {
            let current = reading_time(words);
            assert!(current >= last);
            last = current;
        }
    }

    #[test]
    fn test_build_full_post() {
        let dir = tempfile::tempdir().unwrap();
        let body = "word ".repeat(450);
        let path = write(
            dir.path(),
            "rust.md",
            &format!(
                "---\ntitle: Rust\ndate: 2025-06-01\ndescription: About Rust\ntags: [rust, code]\n---\n{}\n\n```rust\nfn main() {{}}\n```\n",
                body
            ),
        );
        let post = builder().build(&path, dir.path(), Language::Pt).unwrap();
        assert_eq!(post.title, "Rust");
        assert_eq!(post.description, "About Rust");
        assert_eq!(post.summary(), Some("About Rust"));
        assert_eq!(post.tags, vec!["rust", "code"]);
        assert_eq!(post.date.format("%Y-%m-%d").to_string(), "2025-06-01");
        assert_eq!(post.lang, Language::Pt);
        assert!(post.word_count >= 450);
        assert_eq!(post.reading_time, 3);
        assert!(post.content.contains("language-rust"));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "bare.md", "Just a body.\n");
        let before = Local::now().fixed_offset();
        let post = builder().build(&path, dir.path(), Language::En).unwrap();
        assert_eq!(post.title, DEFAULT_TITLE);
        assert_eq!(post.description, "");
        assert_eq!(post.summary(), None);
        assert!(post.tags.is_empty());
        assert!(post.date >= before);
        assert_eq!(post.reading_time, 1);
    }

    #[test]
    fn test_invalid_date_falls_back_to_now() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "bad.md", "---\ndate: \"2025-13-45\"\n---\nx\n");
        let before = Local::now().fixed_offset();
        let post = builder().build(&path, dir.path(), Language::En).unwrap();
        assert!(post.date >= before);
    }

    #[test]
    fn test_invalid_date_is_an_error_under_strict_policy() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "bad.md", "---\ndate: \"2025-13-45\"\n---\nx\n");
        let strict = PostBuilder::new(Tz::UTC, InvalidDatePolicy::Error);
        let err = strict.build(&path, dir.path(), Language::En).unwrap_err();
        assert!(matches!(err, ContentError::InvalidDate { value, .. } if value == "2025-13-45"));
    }

    #[test]
    fn test_malformed_frontmatter_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "broken.md", "---\ntitle: [oops\n---\nx\n");
        let err = builder().build(&path, dir.path(), Language::En).unwrap_err();
        assert!(matches!(err, ContentError::FrontMatter { .. }));
    }

    #[test]
    fn test_unreadable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = builder()
            .build(&dir.path().join("missing.md"), dir.path(), Language::En)
            .unwrap_err();
        assert!(matches!(err, ContentError::Io { .. }));
    }

    #[test]
    fn test_prev_next() {
        let dir = tempfile::tempdir().unwrap();
        let posts: Vec<Post> = ["c", "b", "a"]
            .iter()
            .map(|name| {
                let path = write(dir.path(), &format!("{}.md", name), "x\n");
                builder().build(&path, dir.path(), Language::En).unwrap()
            })
            .collect();
        assert!(posts[0].prev(&posts).is_none());
        assert_eq!(posts[0].next(&posts).unwrap().slug, "b");
        assert_eq!(posts[2].prev(&posts).unwrap().slug, "b");
        assert!(posts[2].next(&posts).is_none());
    }
}
