//! Query layer - pure functions over a loaded post collection
//!
//! None of these functions mutate or take ownership of the collection; they
//! borrow it and hand back references in the collection's own order.

mod pagination;

use indexmap::IndexMap;

use crate::content::Post;

pub use pagination::{paginate, paginate_with, Page, Pagination, DEFAULT_PER_PAGE};

/// Posts whose title or description contains `query`, ignoring case.
/// An empty (or blank) query matches everything.
pub fn search<'a, I>(posts: I, query: &str) -> Vec<&'a Post>
where
    I: IntoIterator<Item = &'a Post>,
{
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return posts.into_iter().collect();
    }

    posts
        .into_iter()
        .filter(|p| {
            p.title.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Posts carrying exactly `tag` (case-sensitive). An empty tag keeps everything.
pub fn filter_by_tag<'a, I>(posts: I, tag: &str) -> Vec<&'a Post>
where
    I: IntoIterator<Item = &'a Post>,
{
    if tag.is_empty() {
        return posts.into_iter().collect();
    }

    posts.into_iter().filter(|p| p.has_tag(tag)).collect()
}

/// Number of posts per tag, in order of first appearance
pub fn collect_tag_counts<'a, I>(posts: I) -> IndexMap<String, usize>
where
    I: IntoIterator<Item = &'a Post>,
{
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for post in posts {
        for tag in &post.tags {
            *counts.entry(tag.clone()).or_insert(0) += 1;
        }
    }
    counts
}

/// Tag counts ordered by descending count, then by name
pub fn tags_by_frequency(counts: &IndexMap<String, usize>) -> Vec<(&str, usize)> {
    let mut tags: Vec<_> = counts.iter().map(|(t, c)| (t.as_str(), *c)).collect();
    tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    tags
}
