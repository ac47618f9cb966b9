use thiserror::Error;

/// Errors produced by value conversions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("unsupported value: {0}")]
    UnsupportedValue(String),

    #[error("unknown isa: {0}")]
    UnknownIsa(String),
}

/// Result alias for value conversions.
pub type TypeResult<T> = Result<T, TypeError>;
