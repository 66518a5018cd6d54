//! `quotecast-quotes` — quote corpus loading and random selection.
//!
//! The corpus is a JSON array of `{"quoteText": …, "quoteAuthor": …}`
//! records. It is re-read from disk on every pick, so edits to the file show
//! up in the very next quote without a restart.

pub mod corpus;
pub mod error;

pub use corpus::{Corpus, Quote};
pub use error::{QuoteError, Result};
