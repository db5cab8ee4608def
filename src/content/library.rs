//! Loaded post collection, one date-sorted partition per language

use std::collections::HashMap;

use super::{Language, Post};

/// Read-only snapshot of every loaded post.
///
/// Built once at start-up and shared behind an `Arc`; nothing mutates it
/// afterwards, so concurrent readers need no locking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostLibrary {
    posts: HashMap<Language, Vec<Post>>,
}

impl PostLibrary {
    /// Wrap already sorted partitions
    pub fn new(posts: HashMap<Language, Vec<Post>>) -> Self {
        Self { posts }
    }

    /// An empty library, used when loading fails and the server keeps running
    pub fn empty() -> Self {
        Self::default()
    }

    /// Posts of one language, newest first
    pub fn posts(&self, lang: Language) -> &[Post] {
        self.posts.get(&lang).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Look up a post by slug within a language
    pub fn find(&self, lang: Language, slug: &str) -> Option<&Post> {
        self.posts(lang).iter().find(|p| p.slug == slug)
    }

    /// Total number of posts across languages
    pub fn len(&self) -> usize {
        self.posts.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
