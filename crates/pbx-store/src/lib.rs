//! Object graph for pbxproj documents.
//!
//! Objects live in an arena, [`ObjectGraph`], partitioned into one bucket per
//! [`ObjectKind`](pbx_types::ObjectKind). Cross-object edges are
//! [`ObjectReference`]s rather than pointers, so groups containing groups
//! and targets depending on targets form no ownership cycles.
//!
//! # Key Types
//!
//! - [`ObjectGraph`]: Shared handle to the arena
//! - [`ObjectReference`]: Value-identified handle with a weak graph link
//! - [`ProjectObject`]: The closed set of object variants
//! - [`GraphObject`]: Typed views used by [`ObjectGraph::resolve`]
//! - [`ReferenceRegistry`]: Shared get-or-create table used while decoding
//! - [`ProjectDocument`]: Version header plus root object plus graph

pub mod document;
pub mod edit;
pub mod error;
pub mod graph;
pub mod objects;
pub mod reference;
pub mod registry;

pub use document::{ProjectDocument, DEFAULT_ARCHIVE_VERSION};
pub use error::{GraphError, GraphResult};
pub use graph::{Entry, ObjectBuckets, ObjectGraph};
pub use objects::{GraphObject, ProjectObject};
pub use reference::{ObjectReference, TEMPORARY_PREFIX};
pub use registry::ReferenceRegistry;
