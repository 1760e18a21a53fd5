//! Per-translation mutable state.
//!
//! [`TranslationContext`] is created fresh by [`crate::translate::translate`],
//! populated during lowering, and discarded after emission — there is no
//! long-lived cache and no cross-query sharing. A single record is
//! threaded explicitly through the alias registry, match builder, and
//! condition lowerer rather than relying on per-instance mutable fields
//! or module-level globals.

use std::collections::HashMap;

use indexmap::{IndexMap, IndexSet};

use crate::schema::IdentifiableKind;

/// What kind of graph node an alias was bound to when it was created.
/// Drives the context-sensitive leaf resolution in
/// [`crate::translate::alias_registry`] (e.g. whether a trailing `value`
/// step means a plain scalar property, a `MultiLanguageProperty`'s
/// `value_text`, or a `Reference`'s `keys_value`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasKind {
    Identifiable(IdentifiableKind),
    SubmodelElement,
    /// A `SubmodelElement` alias that a `language` step has shown to be a
    /// `MultiLanguageProperty`. Aliases start out as plain
    /// `SubmodelElement` and are upgraded in place the first time a
    /// `language` step is resolved against them — see
    /// `alias_registry::resolve_language`.
    MultiLanguageProperty,
    Reference,
    AssetInformation,
    SpecificAssetId,
}

#[derive(Debug, Default)]
pub struct TranslationContext {
    /// Canonical path-prefix key -> (variable name, alias kind). Insertion
    /// order is preserved, but lookups are by key, not position.
    alias_map: IndexMap<String, (String, AliasKind)>,
    /// One monotonic counter per variable-naming family (`aas`, `sm`,
    /// `cd`, `sme`, `assetInformation`, `semanticId`, `submodels`,
    /// `specificAssetIds`, `externalSubjectId`).
    counters: HashMap<&'static str, u32>,
    /// MATCH fragment strings in first-touch order, deduplicated by exact
    /// string equality.
    match_fragments: IndexSet<String>,
    /// Array-all segment key -> alias, populated only while lowering a
    /// `$match`'s operands (see `condition_lowerer::lower_match`). Outside
    /// of that, an array-all segment always mints a fresh alias.
    correlated_array_aliases: HashMap<String, String>,
    /// Root-path-key ("$aas"/"$sm"/"$cd") -> inline `(property, rendered
    /// literal)` pairs queued by an enclosing `$and`'s equality-lifting
    /// pre-pass (see `condition_lowerer::lower_and`), consumed the moment
    /// that root's node fragment is first emitted. Empty outside of that.
    pending_root_properties: HashMap<String, Vec<(String, String)>>,
    return_variable: Option<String>,
}

impl TranslationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn alias_for(&self, key: &str) -> Option<(String, AliasKind)> {
        self.alias_map.get(key).cloned()
    }

    pub(crate) fn insert_alias(&mut self, key: String, alias: String, kind: AliasKind) {
        self.alias_map.insert(key, (alias, kind));
    }

    /// Upgrades a previously-registered alias's kind in place (used when a
    /// `language` step reveals that an alias assumed generic is actually a
    /// `MultiLanguageProperty`).
    pub(crate) fn upgrade_kind(&mut self, key: &str, kind: AliasKind) {
        if let Some(entry) = self.alias_map.get_mut(key) {
            entry.1 = kind;
        }
    }

    pub(crate) fn next_alias(&mut self, family: &'static str) -> String {
        let counter = self.counters.entry(family).or_insert(0);
        let alias = format!("{family}{counter}");
        *counter += 1;
        alias
    }

    /// Records a MATCH fragment. A fragment identical (by exact string
    /// equality) to one already recorded is a no-op.
    pub(crate) fn add_fragment(&mut self, fragment: String) {
        self.match_fragments.insert(fragment);
    }

    pub(crate) fn set_return_variable_if_absent(&mut self, variable: String) {
        if self.return_variable.is_none() {
            self.return_variable = Some(variable);
        }
    }

    /// The alias forced for an array-all segment key by an enclosing
    /// `$match`, if any.
    pub(crate) fn correlated_alias(&self, key: &str) -> Option<String> {
        self.correlated_array_aliases.get(key).cloned()
    }

    /// Forces a single shared alias for an array-all segment key, minting
    /// one from the `sme` family the first time the key is seen.
    pub(crate) fn force_correlated_alias(&mut self, key: String) -> String {
        if let Some(existing) = self.correlated_array_aliases.get(&key) {
            return existing.clone();
        }
        let alias = self.next_alias("sme");
        self.correlated_array_aliases.insert(key, alias.clone());
        alias
    }

    /// Queues an inline node-pattern property for a root that hasn't been
    /// emitted yet. Has no effect on a root whose fragment was already
    /// materialized — inline lifting only applies to the first touch.
    pub(crate) fn queue_root_property(&mut self, root_key: String, property: String, rendered: String) {
        self.pending_root_properties
            .entry(root_key)
            .or_default()
            .push((property, rendered));
    }

    /// Drains and returns the inline properties queued for `root_key`, if
    /// any, for the match builder to fold into that root's node pattern.
    pub(crate) fn take_root_properties(&mut self, root_key: &str) -> Vec<(String, String)> {
        self.pending_root_properties.remove(root_key).unwrap_or_default()
    }

    pub fn match_fragments(&self) -> impl Iterator<Item = &String> {
        self.match_fragments.iter()
    }

    pub fn return_variable(&self) -> Option<&str> {
        self.return_variable.as_deref()
    }
}
