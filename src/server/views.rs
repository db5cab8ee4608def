//! Template context construction

use tera::Context;

use super::AppState;
use crate::content::{Language, Post};
use crate::helpers::{
    date_xml, format_long_date, home_url, page_url, post_url, search_url, tag_url, tags_url,
};
use crate::query::Pagination;
use crate::templates::{
    LanguageLink, NavData, NavPost, PagerData, PostData, PostSummary, SiteData, TagLink,
};

/// Context shared by every page: site data, translations, navigation and
/// the link to the same page in the other language
pub fn base_context(state: &AppState, lang: Language, other_url: String) -> Context {
    let mut context = Context::new();
    context.insert(
        "site",
        &SiteData {
            title: state.config.title.clone(),
            subtitle: state.config.subtitle.clone(),
            author: state.config.author.clone(),
            url: state.config.url.clone(),
        },
    );
    context.insert("lang", lang.code());
    context.insert("html_lang", lang.html_lang());
    context.insert("t", &state.i18n.get_all_translations(lang));
    context.insert(
        "nav",
        &NavData {
            home: home_url(lang),
            tags: tags_url(lang),
            search: search_url(lang, ""),
        },
    );
    context.insert(
        "other_lang",
        &LanguageLink {
            code: lang.other().code().to_string(),
            url: other_url,
        },
    );
    context
}

fn tag_links(post: &Post) -> Vec<TagLink> {
    post.tags
        .iter()
        .map(|tag| TagLink {
            name: tag.clone(),
            url: tag_url(post.lang, tag),
            count: None,
        })
        .collect()
}

/// Listing view of a post
pub fn summarize(state: &AppState, post: &Post) -> PostSummary {
    PostSummary {
        title: post.title.clone(),
        url: post_url(post),
        date: format_long_date(&post.date, post.lang),
        date_iso: date_xml(&post.date),
        description: post.summary().map(str::to_string),
        reading_time: state
            .i18n
            .get_plural(post.lang, "post.reading_time", post.reading_time),
        tags: tag_links(post),
    }
}

/// Full view of a post
pub fn post_data(state: &AppState, post: &Post, visits: u64) -> PostData {
    PostData {
        summary: summarize(state, post),
        content: post.content.clone(),
        visits: state
            .i18n
            .get_plural(post.lang, "post.visits", visits as usize),
    }
}

pub fn nav_post(post: &Post) -> NavPost {
    NavPost {
        title: post.title.clone(),
        url: post_url(post),
    }
}

/// Pager links for a listing whose first page lives at `base`
pub fn pager(pagination: &Pagination, base: &str) -> PagerData {
    PagerData {
        current: pagination.current_page,
        total: pagination.total_pages,
        has_prev: pagination.has_prev,
        has_next: pagination.has_next,
        prev_url: page_url(base, pagination.prev_page),
        next_url: page_url(base, pagination.next_page),
    }
}

/// Insert a page of posts and its pager into the context
pub fn insert_listing(
    context: &mut Context,
    state: &AppState,
    posts: &[&Post],
    pagination: &Pagination,
    base: &str,
) {
    let summaries: Vec<PostSummary> = posts.iter().map(|p| summarize(state, p)).collect();
    context.insert("posts", &summaries);
    context.insert("pager", &pager(pagination, base));
}
