//! Foundation value types for pbxproj documents.
//!
//! Every other pbx crate depends on `pbx-types`. Nothing in here knows about
//! the object graph; these are plain values.
//!
//! # Key Types
//!
//! - [`ObjectKind`]: The closed set of `isa` discriminators the graph stores
//! - [`RawValue`]: Nested parser output consumed by the decoder
//! - [`CommentedString`]: A string plus an optional `/* comment */` annotation
//! - [`PlistValue`]: Recursive presentation value produced per encode
//! - [`PlistDictionary`]: Dictionary whose keys dedupe on string alone

pub mod commented;
pub mod error;
pub mod kind;
pub mod plist;
pub mod value;

pub use commented::CommentedString;
pub use error::{TypeError, TypeResult};
pub use kind::ObjectKind;
pub use plist::{PlistDictionary, PlistValue};
pub use value::RawValue;
