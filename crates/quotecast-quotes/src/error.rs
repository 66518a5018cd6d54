use thiserror::Error;

/// Errors that can occur while loading or sampling the quote corpus.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// The corpus file exists and parses, but contains zero quotes.
    #[error("the quote corpus is empty")]
    EmptyCorpus,

    /// The corpus file could not be read.
    #[error("failed to read corpus file: {0}")]
    Io(#[from] std::io::Error),

    /// The corpus file is not valid JSON in the expected record format.
    #[error("failed to parse corpus file: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, QuoteError>;
