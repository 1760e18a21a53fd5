//! Lowers a parsed query DSL [`crate::ast::Condition`] into a Cypher-family
//! MATCH/WHERE/RETURN query string.
//!
//! `translate` itself is the only public surface: everything else here is
//! an implementation detail split across the alias registry (path -> node
//! resolution), the match builder (MATCH fragment text), the condition
//! lowerer (WHERE predicate text), and the emitter (final assembly). There
//! is no shared mutable state beyond a single [`TranslationContext`]
//! created fresh per call — no cache, no thread pool, nothing async.

mod alias_registry;
mod condition_lowerer;
mod context;
mod emitter;
mod errors;
mod literal;
mod match_builder;

pub use context::{AliasKind, TranslationContext};
pub use errors::LowerError;

use serde_json::Value as Json;

use crate::config::EmitterConfig;
use crate::error::TranslateError;

/// Translates a JSON query DSL document into a graph query string.
///
/// This is the crate's sole entry point: parse the DSL, decompose its
/// field paths, resolve them against the schema contract, lower the
/// resulting AST into a WHERE predicate, and assemble MATCH/WHERE/RETURN.
/// Deterministic — the same input and configuration always produce
/// byte-identical output.
pub fn translate(query: &Json, config: &EmitterConfig) -> Result<String, TranslateError> {
    let condition = crate::dsl::parse(query).map_err(|e| {
        log::error!("query DSL parse failed for {query}: {e}");
        e
    })?;

    let mut ctx = TranslationContext::new();
    let where_clause = condition_lowerer::lower_condition(&mut ctx, &condition, config)
        .map_err(|e| {
            log::error!("failed to lower condition {query}: {e}");
            e
        })?;

    Ok(emitter::emit(&ctx, &where_clause, config))
}
