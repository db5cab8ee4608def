//! Helper functions for templates
//!
//! URL builders and date formatting shared by the server handlers when they
//! prepare template context.

mod date;
mod url;

pub use date::*;
pub use url::*;
