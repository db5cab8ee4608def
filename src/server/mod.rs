//! HTTP server
//!
//! Posts are loaded once before the listener starts; the resulting
//! [`PostLibrary`] is never touched again, so handlers read it without locks.

mod handlers;
mod views;

use anyhow::Result;
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::{LoadFailurePolicy, SiteConfig};
use crate::content::{highlight_css, PostLibrary};
use crate::counter::VisitCounter;
use crate::i18n::I18n;
use crate::templates::TemplateRenderer;
use crate::Blog;

/// Shared, read-only state handed to every handler
pub struct AppState {
    pub config: SiteConfig,
    pub library: Arc<PostLibrary>,
    pub i18n: I18n,
    pub templates: TemplateRenderer,
    pub counter: VisitCounter,
    pub highlight_css: String,
}

impl AppState {
    /// Assemble the state around an already loaded library
    pub fn new(blog: &Blog, library: PostLibrary) -> Result<Self> {
        let mut i18n = I18n::builtin()?;
        i18n.load_overrides(&blog.i18n_dir)?;

        Ok(Self {
            config: blog.config.clone(),
            library: Arc::new(library),
            i18n,
            templates: TemplateRenderer::new()?,
            counter: VisitCounter::load(&blog.counter_path),
            highlight_css: highlight_css(&blog.config.highlight_theme)?,
        })
    }
}

/// Build the application router
pub fn router(state: Arc<AppState>, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/highlight.css", get(handlers::highlight_css))
        .route("/:lang", get(handlers::index))
        .route("/:lang/", get(handlers::index))
        .route("/:lang/posts/:slug", get(handlers::post))
        .route("/:lang/tags", get(handlers::tags))
        .route("/:lang/tags/:tag", get(handlers::tag))
        .route("/:lang/search", get(handlers::search))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Load the content and serve it until Ctrl+C
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let library = match blog.load_library() {
        Ok(library) => library,
        Err(e) => match blog.config.on_load_failure {
            LoadFailurePolicy::Refuse => return Err(e.into()),
            LoadFailurePolicy::Empty => {
                tracing::error!("Failed to load posts, serving an empty blog: {}", e);
                PostLibrary::empty()
            }
        },
    };

    let state = Arc::new(AppState::new(blog, library)?);
    let app = router(state, &blog.static_dir);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
