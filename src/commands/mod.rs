//! CLI subcommands that work on a blog directory without serving it

pub mod check;
pub mod list;
pub mod new;
