//! Content module - turns markdown sources into the post collection

mod error;
mod frontmatter;
mod language;
mod library;
pub mod loader;
mod markdown;
mod post;

pub use error::{ContentError, FrontMatterError};
pub use frontmatter::{parse_date_string, DateField, FrontMatter, DEFAULT_TITLE};
pub use language::{Language, UnknownLanguage};
pub use library::PostLibrary;
pub use loader::{is_markdown_file, walk_sources, ContentLoader};
pub use markdown::{highlight_css, MarkdownRenderer};
pub use post::{count_words, reading_time, slug_of, Post, PostBuilder, WORDS_PER_MINUTE};
