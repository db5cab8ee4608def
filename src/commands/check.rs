//! Validate every source file without starting the server

use anyhow::{bail, Result};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::config::InvalidDatePolicy;
use crate::content::{is_markdown_file, walk_sources, ContentError, Language, PostBuilder};
use crate::Blog;

/// Outcome of a check run
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Files that built cleanly
    pub posts: usize,
    /// One entry per broken file or conflicting slug
    pub problems: Vec<ContentError>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Build every post strictly, collecting all problems instead of stopping
/// at the first one. Unparseable dates count as problems here whatever the
/// configured policy says.
pub fn check(blog: &Blog) -> Result<CheckReport> {
    let builder = PostBuilder::new(blog.config.tz()?, InvalidDatePolicy::Error);
    let mut report = CheckReport::default();

    for lang in Language::ALL {
        let lang_dir = blog.content_dir.join(lang.code());
        if !lang_dir.is_dir() {
            continue;
        }

        let mut seen: HashMap<String, PathBuf> = HashMap::new();
        let sources = match walk_sources(&lang_dir, is_markdown_file) {
            Ok(sources) => sources,
            Err(e) => {
                report.problems.push(e);
                continue;
            }
        };

        for path in sources {
            match builder.build(&path, &blog.content_dir, lang) {
                Ok(post) => match seen.get(&post.slug) {
                    Some(first) => report.problems.push(ContentError::DuplicateSlug {
                        lang,
                        slug: post.slug,
                        first: first.clone(),
                        second: path,
                    }),
                    None => {
                        seen.insert(post.slug, path);
                        report.posts += 1;
                    }
                },
                Err(e) => report.problems.push(e),
            }
        }
    }

    Ok(report)
}

/// Print the report; fails when any problem was found
pub fn run(blog: &Blog) -> Result<()> {
    let report = check(blog)?;
    for problem in &report.problems {
        println!("  {}", problem);
    }
    if !report.is_ok() {
        bail!("{} problem(s) found", report.problems.len());
    }
    println!("{} posts OK", report.posts);
    Ok(())
}
