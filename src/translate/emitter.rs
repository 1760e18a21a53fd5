//! Assembles the final MATCH/WHERE/RETURN query text.

use crate::config::EmitterConfig;

use super::context::TranslationContext;

/// Renders the translation's MATCH fragments, WHERE predicate, and RETURN
/// variable into the final query string.
///
/// Panics only if `ctx` has no fragments or no return variable recorded —
/// both are guaranteed by [`super::translate`] having resolved at least the
/// condition's root path before calling this.
pub(crate) fn emit(ctx: &TranslationContext, where_clause: &str, config: &EmitterConfig) -> String {
    let match_body = ctx
        .match_fragments()
        .map(|fragment| format!("  {fragment}"))
        .collect::<Vec<_>>()
        .join(&config.match_separator);

    let return_variable = ctx
        .return_variable()
        .expect("translate always resolves at least one path before emitting");

    format!("MATCH\n{match_body}\nWHERE {where_clause}\nRETURN {return_variable}")
}
