use thiserror::Error;

/// Errors from reference generation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RefError {
    /// All 99 suffixes for one prefix and body are already taken.
    #[error("identifier suffixes exhausted for {prefix}{body}")]
    SuffixExhausted { prefix: String, body: String },
}

/// Result alias for reference generation.
pub type RefResult<T> = Result<T, RefError>;
