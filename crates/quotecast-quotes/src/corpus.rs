use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{QuoteError, Result};

/// A single quote record as stored in the corpus file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(rename = "quoteText")]
    pub text: String,
    #[serde(rename = "quoteAuthor")]
    pub author: String,
}

impl Quote {
    /// Render the quote the way it is sent to chats: `"text" - author`.
    pub fn formatted(&self) -> String {
        format!("\"{}\" - {}", self.text, self.author)
    }
}

/// An ordered, non-empty-checked collection of quotes.
#[derive(Debug, Clone)]
pub struct Corpus {
    quotes: Vec<Quote>,
}

impl Corpus {
    /// Load the corpus from a JSON file.
    ///
    /// Called fresh on every quote request — the file is the source of truth
    /// and is never cached across picks.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let quotes: Vec<Quote> = serde_json::from_str(&raw)?;
        Ok(Self { quotes })
    }

    pub fn from_quotes(quotes: Vec<Quote>) -> Self {
        Self { quotes }
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Pick one quote uniformly at random.
    ///
    /// The index is drawn from `[0, len)` — the upper bound is exclusive, so
    /// a pick can never land past the end of the collection.
    pub fn pick(&self) -> Result<&Quote> {
        if self.quotes.is_empty() {
            return Err(QuoteError::EmptyCorpus);
        }
        let index = rand::thread_rng().gen_range(0..self.quotes.len());
        Ok(&self.quotes[index])
    }
}
