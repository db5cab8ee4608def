//! Request handlers

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tera::Context;

use super::views;
use super::AppState;
use crate::content::{Language, Post};
use crate::helpers::{home_url, post_url, search_url, tag_url, tags_url};
use crate::query::{
    collect_tag_counts, filter_by_tag, paginate_with, search as search_posts, tags_by_frequency,
};
use crate::templates::TagLink;

/// Query string accepted by listing pages. Values are kept as text so a
/// malformed `page` falls back to the first page instead of a 400.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    page: Option<String>,
    q: Option<String>,
}

impl ListQuery {
    fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(1)
    }

    fn query(&self) -> &str {
        self.q.as_deref().map(str::trim).unwrap_or_default()
    }
}

/// Error surfaced as a 500 page
pub struct ServerError(anyhow::Error);

impl<E: Into<anyhow::Error>> From<E> for ServerError {
    fn from(e: E) -> Self {
        Self(e.into())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {:#}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}

type HandlerResult = Result<Response, ServerError>;

fn render(state: &AppState, template: &str, context: &Context) -> HandlerResult {
    Ok(Html(state.templates.render(template, context)?).into_response())
}

fn not_found_page(state: &AppState, lang: Language) -> HandlerResult {
    let context = views::base_context(state, lang, home_url(lang.other()));
    let body = state.templates.render("404.html", &context)?;
    Ok((StatusCode::NOT_FOUND, Html(body)).into_response())
}

/// `/` sends visitors to the default language
pub async fn root(State(state): State<Arc<AppState>>) -> Redirect {
    Redirect::to(&home_url(state.config.default_language))
}

pub async fn highlight_css(State(state): State<Arc<AppState>>) -> Response {
    (
        [(header::CONTENT_TYPE, "text/css")],
        state.highlight_css.clone(),
    )
        .into_response()
}

/// Paginated list of every post of a language
pub async fn index(
    State(state): State<Arc<AppState>>,
    Path(lang): Path<String>,
    Query(query): Query<ListQuery>,
) -> HandlerResult {
    let Ok(lang) = lang.parse::<Language>() else {
        return not_found_page(&state, state.config.default_language);
    };

    let posts: Vec<&Post> = state.library.posts(lang).iter().collect();
    let page = paginate_with(
        &posts,
        query.page(),
        state.config.per_page as i64,
        state.config.page_overflow,
    );

    let mut context = views::base_context(&state, lang, home_url(lang.other()));
    views::insert_listing(
        &mut context,
        &state,
        page.items,
        &page.pagination,
        &home_url(lang),
    );
    render(&state, "index.html", &context)
}

/// A single post; every view bumps its visit count
pub async fn post(
    State(state): State<Arc<AppState>>,
    Path((lang, slug)): Path<(String, String)>,
) -> HandlerResult {
    let Ok(lang) = lang.parse::<Language>() else {
        return not_found_page(&state, state.config.default_language);
    };
    let posts = state.library.posts(lang);
    let Some(post) = state.library.find(lang, &slug) else {
        return not_found_page(&state, lang);
    };

    let visits = state.counter.hit(lang, &post.slug).await;

    let other_url = state
        .library
        .find(lang.other(), &post.slug)
        .map(post_url)
        .unwrap_or_else(|| home_url(lang.other()));

    let mut context = views::base_context(&state, lang, other_url);
    context.insert("post", &views::post_data(&state, post, visits));
    context.insert("newer", &post.prev(posts).map(views::nav_post));
    context.insert("older", &post.next(posts).map(views::nav_post));
    render(&state, "post.html", &context)
}

/// Every tag of a language with its post count, most used first
pub async fn tags(State(state): State<Arc<AppState>>, Path(lang): Path<String>) -> HandlerResult {
    let Ok(lang) = lang.parse::<Language>() else {
        return not_found_page(&state, state.config.default_language);
    };

    let counts = collect_tag_counts(state.library.posts(lang));
    let tags: Vec<TagLink> = tags_by_frequency(&counts)
        .into_iter()
        .map(|(name, count)| TagLink {
            name: name.to_string(),
            url: tag_url(lang, name),
            count: Some(state.i18n.get_plural(lang, "tags.count", count)),
        })
        .collect();

    let mut context = views::base_context(&state, lang, tags_url(lang.other()));
    context.insert("tags", &tags);
    render(&state, "tags.html", &context)
}

/// Paginated posts carrying one tag
pub async fn tag(
    State(state): State<Arc<AppState>>,
    Path((lang, tag)): Path<(String, String)>,
    Query(query): Query<ListQuery>,
) -> HandlerResult {
    let Ok(lang) = lang.parse::<Language>() else {
        return not_found_page(&state, state.config.default_language);
    };

    let tagged = filter_by_tag(state.library.posts(lang), &tag);
    let page = paginate_with(
        &tagged,
        query.page(),
        state.config.per_page as i64,
        state.config.page_overflow,
    );

    let mut context = views::base_context(&state, lang, tags_url(lang.other()));
    context.insert("tag", &tag);
    views::insert_listing(
        &mut context,
        &state,
        page.items,
        &page.pagination,
        &tag_url(lang, &tag),
    );
    render(&state, "tag.html", &context)
}

/// Substring search over titles and descriptions
pub async fn search(
    State(state): State<Arc<AppState>>,
    Path(lang): Path<String>,
    Query(query): Query<ListQuery>,
) -> HandlerResult {
    let Ok(lang) = lang.parse::<Language>() else {
        return not_found_page(&state, state.config.default_language);
    };

    let q = query.query();
    let found = search_posts(state.library.posts(lang), q);
    let page = paginate_with(
        &found,
        query.page(),
        state.config.per_page as i64,
        state.config.page_overflow,
    );

    let mut context = views::base_context(&state, lang, search_url(lang.other(), q));
    context.insert("query", q);
    views::insert_listing(
        &mut context,
        &state,
        page.items,
        &page.pagination,
        &search_url(lang, q),
    );
    render(&state, "search.html", &context)
}

/// Anything unrouted; the 404 page follows the language prefix when there is one
pub async fn not_found(State(state): State<Arc<AppState>>, uri: Uri) -> HandlerResult {
    let lang = uri
        .path()
        .trim_start_matches('/')
        .split('/')
        .next()
        .and_then(|segment| segment.parse::<Language>().ok())
        .unwrap_or(state.config.default_language);
    not_found_page(&state, lang)
}
