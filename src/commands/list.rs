//! List posts or tags

use anyhow::{bail, Result};
use std::io::{self, Write};

use crate::content::{Language, PostLibrary};
use crate::counter::{VisitCounter, VisitCounts};
use crate::query::{collect_tag_counts, tags_by_frequency};
use crate::Blog;

/// Print posts or tags of one language, or of every language
pub async fn run(blog: &Blog, content_type: &str, lang: Option<Language>) -> Result<()> {
    let library = blog.load_library()?;
    let visits = VisitCounter::load(&blog.counter_path).snapshot().await;
    let stdout = io::stdout();
    write_listing(&mut stdout.lock(), &library, &visits, content_type, lang)
}

pub fn write_listing<W: Write>(
    out: &mut W,
    library: &PostLibrary,
    visits: &VisitCounts,
    content_type: &str,
    lang: Option<Language>,
) -> Result<()> {
    let langs: Vec<Language> = match lang {
        Some(lang) => vec![lang],
        None => Language::ALL.to_vec(),
    };

    match content_type {
        "post" | "posts" => {
            for lang in langs {
                let posts = library.posts(lang);
                writeln!(out, "Posts [{}] ({}):", lang, posts.len())?;
                for post in posts {
                    writeln!(
                        out,
                        "  {} - {} [{}] ({} views)",
                        post.date.format("%Y-%m-%d"),
                        post.title,
                        post.source,
                        visits.views(lang, &post.slug)
                    )?;
                }
            }
        }
        "tag" | "tags" => {
            for lang in langs {
                let counts = collect_tag_counts(library.posts(lang));
                writeln!(out, "Tags [{}] ({}):", lang, counts.len())?;
                for (tag, count) in tags_by_frequency(&counts) {
                    writeln!(out, "  {} ({})", tag, count)?;
                }
            }
        }
        _ => {
            bail!("Unknown type: {}. Available: post, tag", content_type);
        }
    }

    Ok(())
}
