//! The AAS-to-graph schema contract.
//!
//! This module is pure data plus pure functions: the fixed mapping from AAS
//! concepts (Identifiables, SubmodelElements, References,
//! MultiLanguageProperty, list-indexed children, "prefixed" flattened
//! composite properties) to node labels, relationship names, and property
//! names. It is consumed symmetrically by the ingestion writer that builds
//! the graph (out of scope here) and by the query translator in
//! [`crate::translate`], which assumes the same shape. Nothing in this
//! module allocates beyond the `'static` tables below; there is no runtime
//! class-name registry and no mutable state.

pub mod flattening;
pub mod labels;
pub mod relationships;

pub use flattening::{flattened_properties, FlattenedProperties};
pub use labels::{IdentifiableKind, NodeKind};
pub use relationships::{is_virtual_relationship, list_index_policy, Relationship};
