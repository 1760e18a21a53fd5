//! Renders MATCH traversal fragments over the schema contract.
//!
//! These are pure string-building functions: given an alias, a label, a
//! relationship name, and whatever predicate/edge-property a caller has
//! already decided belongs on the fragment, they render the fragment
//! text. Deciding *which* fragment to build — and deduplicating it — is
//! [`crate::translate::alias_registry`]'s job; this module only knows how
//! to spell one out.

use super::literal::quote_str;

/// A bare root node pattern: `(<alias>:<label>)`.
pub(crate) fn root_fragment(alias: &str, label: &str) -> String {
    format!("({alias}:{label})")
}

/// A root node pattern carrying inline properties lifted out of the WHERE
/// predicate by an enclosing `$and`'s equality-lifting pre-pass, e.g.
/// `(sm0:Submodel {idShort: 'TechnicalData'})`. Falls back to
/// [`root_fragment`]'s bare form when `properties` is empty.
pub(crate) fn root_fragment_with_properties(
    alias: &str,
    label: &str,
    properties: &[(String, String)],
) -> String {
    if properties.is_empty() {
        return root_fragment(alias, label);
    }
    let rendered = properties
        .iter()
        .map(|(prop, value)| format!("{prop}: {value}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("({alias}:{label} {{{rendered}}})")
}

/// A SubmodelElement chain link: `(<parent>)-[:<rel>]->(<alias>:SubmodelElement {{idShort: '<name>'}})`,
/// optionally carrying a `list_index` edge property and optionally
/// omitting the `idShort` predicate (array-all segments match any
/// element).
pub(crate) fn sme_child_fragment(
    parent_alias: &str,
    rel: &str,
    child_alias: &str,
    id_short: Option<&str>,
    list_index: Option<u64>,
    quote: char,
) -> String {
    let node = match id_short {
        Some(name) => format!(
            "{child_alias}:SubmodelElement {{idShort: {}}}",
            quote_str(name, quote)
        ),
        None => format!("{child_alias}:SubmodelElement"),
    };
    let edge = edge_pattern(rel, list_index);
    format!("({parent_alias}){edge}({node})")
}

/// A single edge to an intermediate node of a given label, e.g.
/// `(<parent>)-[:assetInformation]->(<alias>:AssetInformation)`.
pub(crate) fn edge_to_node_fragment(
    parent_alias: &str,
    rel: &str,
    child_alias: &str,
    label: &str,
    list_index: Option<u64>,
) -> String {
    let edge = edge_pattern(rel, list_index);
    format!("({parent_alias}){edge}({child_alias}:{label})")
}

fn edge_pattern(rel: &str, list_index: Option<u64>) -> String {
    match list_index {
        Some(i) => format!("-[:{rel} {{list_index: {i}}}]->"),
        None => format!("-[:{rel}]->"),
    }
}
