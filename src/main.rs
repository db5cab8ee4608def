//! CLI entry point for quillpost

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quillpost::content::Language;
use quillpost::Blog;

#[derive(Parser)]
#[command(name = "quillpost")]
#[command(version)]
#[command(about = "A small bilingual Markdown blog server", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the blog server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on (overrides `server.port`)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (overrides `server.ip`)
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// List posts or tags
    List {
        /// Type to list (posts, tags)
        #[arg(default_value = "posts")]
        r#type: String,

        /// Only list one language
        #[arg(short, long)]
        lang: Option<Language>,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Language of the post
        #[arg(short, long, default_value = "en")]
        lang: Language,

        /// File name without extension (defaults to the slugified title)
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Validate every post without serving
    Check,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "quillpost=debug,info"
    } else {
        "quillpost=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Serve { port, ip } => {
            let blog = Blog::new(&base_dir)?;
            let ip = ip.unwrap_or_else(|| blog.config.server.ip.clone());
            let port = port.unwrap_or(blog.config.server.port);
            quillpost::server::start(&blog, &ip, port).await?;
        }

        Commands::List { r#type, lang } => {
            let blog = Blog::new(&base_dir)?;
            quillpost::commands::list::run(&blog, &r#type, lang).await?;
        }

        Commands::New { title, lang, slug } => {
            let blog = Blog::new(&base_dir)?;
            let path = quillpost::commands::new::create_post(&blog, &title, lang, slug.as_deref())?;
            println!("Created: {:?}", path);
        }

        Commands::Check => {
            let blog = Blog::new(&base_dir)?;
            quillpost::commands::check::run(&blog)?;
        }

        Commands::Version => {
            println!("quillpost version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
