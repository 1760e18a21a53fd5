//! Crate-level error taxonomy.
//!
//! Every failure surfaced by [`crate::translate::translate`] is one of
//! these four kinds; no partial query is ever returned. Each pipeline
//! stage owns its own error enum (`DslError`, `PathError`, `LowerError`,
//! `ConfigError`); this type composes them into one top-level error via
//! `#[from]` rather than sharing a single flat enum across stages.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranslateError {
    /// Parser-level: missing `$condition`, unknown operator key, wrong
    /// operand arity, malformed Value object.
    #[error("invalid query: {0}")]
    Query(#[from] crate::dsl::DslError),

    /// Path-model-level: missing `#`, unknown attribute name, malformed
    /// list index, impossible root.
    #[error("invalid field path: {0}")]
    Path(#[from] crate::path::PathError),

    /// Lowering-level: deliberately unsupported constructs, or an
    /// attribute step that is syntactically valid but inapplicable to
    /// the alias it is resolved against.
    #[error("could not lower condition: {0}")]
    Lower(#[from] crate::translate::LowerError),

    /// Surfaced only by the `EmitterConfig` constructors, never by
    /// `translate` itself.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}
