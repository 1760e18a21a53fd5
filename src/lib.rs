//! aasgraph-query - AAS query DSL to property-graph query compiler
//!
//! This crate translates a JSON-encoded query language over the Asset
//! Administration Shell (AAS) metamodel into a Cypher-family query string,
//! targeting a graph database where an AAS environment has been materialized
//! as typed nodes and labeled relationships (see [`schema`] for the exact
//! contract). It covers the read path only:
//! - Parsing the JSON query DSL into a typed AST ([`dsl`], [`ast`])
//! - Decomposing AAS field-path strings ([`path`])
//! - Lowering the AST into MATCH/WHERE/RETURN fragments ([`translate`])
//!
//! Ingestion, the graph driver, and any CLI/HTTP front-end are external
//! collaborators and out of scope for this crate.

pub mod ast;
pub mod config;
pub mod dsl;
pub mod error;
pub mod path;
pub mod schema;
pub mod translate;

pub use error::TranslateError;
pub use translate::translate;
