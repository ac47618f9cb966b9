use thiserror::Error;

/// Errors raised when a reference is dereferenced or the graph is edited.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// No object is stored under this reference value.
    #[error("dangling reference: {0}")]
    DanglingReference(String),

    /// An object exists but is not of the requested variant.
    #[error("reference {reference} is not a {expected}")]
    TypeMismatch {
        reference: String,
        expected: &'static str,
    },

    /// The graph the reference belonged to has been dropped, or the
    /// reference was never attached to one.
    #[error("object graph released")]
    ReleasedGraph,

    /// Another object is already stored under this value.
    #[error("duplicate reference: {0}")]
    DuplicateReference(String),
}

/// Result alias for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
