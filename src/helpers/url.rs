//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::content::{Language, Post};

/// Characters left untouched in a path segment or query value
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Encode a single URL path segment or query value
pub fn encode(value: &str) -> String {
    utf8_percent_encode(value, SEGMENT).to_string()
}

/// Home page of a language
///
/// # Examples
/// ```ignore
/// home_url(Language::Pt) // -> "/pt/"
/// ```
pub fn home_url(lang: Language) -> String {
    format!("/{}/", lang.code())
}

/// Permalink of a post
pub fn post_url(post: &Post) -> String {
    format!("/{}/posts/{}", post.lang.code(), encode(&post.slug))
}

/// Page listing all tags
pub fn tags_url(lang: Language) -> String {
    format!("/{}/tags", lang.code())
}

/// Page listing the posts of one tag
///
/// # Examples
/// ```ignore
/// tag_url(Language::En, "web dev") // -> "/en/tags/web%20dev"
/// ```
pub fn tag_url(lang: Language, tag: &str) -> String {
    format!("/{}/tags/{}", lang.code(), encode(tag))
}

/// Search page, optionally with a query
pub fn search_url(lang: Language, query: &str) -> String {
    if query.is_empty() {
        format!("/{}/search", lang.code())
    } else {
        format!("/{}/search?q={}", lang.code(), encode(query))
    }
}

/// Link to another page of a paginated listing, keeping an existing query string
///
/// # Examples
/// ```ignore
/// page_url("/en/search?q=go", 2) // -> "/en/search?q=go&page=2"
/// page_url("/en/", 1)            // -> "/en/"
/// ```
pub fn page_url(base: &str, page: usize) -> String {
    if page <= 1 {
        return base.to_string();
    }
    let sep = if base.contains('?') { '&' } else { '?' };
    format!("{}{}page={}", base, sep, page)
}
