//! Decoding and encoding of pbxproj documents.
//!
//! The decoder takes values already parsed from the ASCII plist text (or its
//! JSON form) and builds a [`ProjectDocument`](pbx_store::ProjectDocument).
//! The encoder fixes temporary references, projects every object into a
//! plist value with human-readable comments, and renders the exact text
//! grammar Xcode writes.
//!
//! # Modules
//!
//! - [`decoder`]: [`ProjectDecoder`], one parser per `isa`
//! - [`encoder`]: [`ProjectEncoder`] and the section table
//! - [`settings`]: [`OutputSettings`], presentation-only ordering policy
//! - [`codec`]: [`ProjectCodec`], both directions configured together

pub mod codec;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod settings;

mod fields;
mod fixer;
mod projection;
mod writer;

#[cfg(test)]
mod test_support;

pub use codec::ProjectCodec;
pub use decoder::ProjectDecoder;
pub use encoder::{ProjectEncoder, SECTIONS};
pub use error::{DecodeError, DecodeResult, EncodeError, EncodeResult, SettingsError};
pub use settings::{BuildPhaseFileSortOrder, FileListSortOrder, NavigatorSortOrder, OutputSettings};
pub use writer::{ROOT_OBJECT_COMMENT, UTF8_MARKER};
