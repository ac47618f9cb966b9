//! Reference identifier generation.
//!
//! Objects created in memory carry temporary references. Before a document is
//! written, every temporary reference is replaced with a 24-character
//! identifier: a 2-letter prefix fixed per [`ObjectKind`](pbx_types::ObjectKind),
//! a 20-digit hexadecimal body derived from a context string, and a 2-digit
//! suffix that disambiguates repeated contexts.
//!
//! # Modules
//!
//! - [`generator`]: [`ReferenceGenerator`], the per-pass dedupe state
//! - [`hasher`]: [`IdentifierHasher`], domain-separated BLAKE3 bodies
//! - [`prefix`]: The per-kind prefix table

pub mod error;
pub mod generator;
pub mod hasher;
pub mod prefix;

pub use error::{RefError, RefResult};
pub use generator::ReferenceGenerator;
pub use hasher::IdentifierHasher;
pub use prefix::reference_prefix;

/// Total length of a generated identifier.
pub const IDENTIFIER_LEN: usize = 24;
