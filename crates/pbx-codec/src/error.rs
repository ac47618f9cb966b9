use pbx_refs::RefError;
use pbx_store::GraphError;
use pbx_types::TypeError;
use thiserror::Error;

/// Errors that abort a decode. No partial graph is ever returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("record {reference} has no isa")]
    MissingDiscriminator { reference: String },

    #[error("unknown isa: {0}")]
    UnknownVariant(String),

    #[error("record {reference} is missing required field {field}")]
    MissingField { reference: String, field: String },

    #[error("field {field} of {reference} has the wrong type")]
    WrongType { reference: String, field: String },

    #[error("root object {0} is not a PBXProject")]
    RootObjectNotProject(String),

    #[error(transparent)]
    Value(#[from] TypeError),
}

/// Result alias for decoding.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Errors that abort an encode. No partial output is ever returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("document has no root object")]
    MissingRootObject,

    #[error("no section registered for {0}")]
    UnregisteredSection(String),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Reference(#[from] RefError),
}

/// Result alias for encoding.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Errors loading output settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}
