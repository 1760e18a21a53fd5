//! Errors produced while lowering an [`crate::ast::Condition`] into a
//! WHERE predicate and its supporting MATCH fragments.

use thiserror::Error;

use crate::path::PathError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LowerError {
    /// A deliberately rejected construct: `$hexCast`, `$timeCast`,
    /// equality between two list-valued operands, or a dangling `keys`
    /// step with no trailing `value`/`type` component.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// An attribute step that is syntactically valid but inapplicable to
    /// the alias it resolves against in this translation (e.g. `language`
    /// on an alias that was never established as a `MultiLanguageProperty`).
    #[error("schema violation: {0}")]
    SchemaViolation(String),

    /// A field path failed to decompose.
    #[error("{0}")]
    Path(#[from] PathError),
}
