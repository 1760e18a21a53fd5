//! Resolves a decomposed field path to either a graph node (an alias plus
//! the node kind it was bound to) or a leaf expression string ready to
//! drop into a WHERE predicate, materializing whatever MATCH fragments
//! the traversal needs along the way.
//!
//! The central invariant this module guarantees: two lowerings of the
//! *same path-prefix key* within one [`TranslationContext`] always return
//! the same alias. Array-all segments (`name[]`) are the one deliberate
//! exception — see [`resolve_sme_segment`] and the module-level note on
//! `$match` correlation in [`crate::translate::condition_lowerer`].

use crate::config::EmitterConfig;
use crate::path::{Attribute, ParsedPath, Root, Segment, Step};
use crate::schema::{flattened_properties, list_index_policy, IdentifiableKind, NodeKind, Relationship};

use super::context::{AliasKind, TranslationContext};
use super::errors::LowerError;
use super::match_builder as mb;

/// A fully resolved leaf: a ready-to-emit expression string and whether
/// it names a list-valued property (so the condition lowerer can apply
/// list-equality promotion).
pub(crate) struct Resolved {
    pub expr: String,
    pub is_list: bool,
}

/// Resolves a parsed field path to its leaf expression.
pub(crate) fn resolve(
    ctx: &mut TranslationContext,
    parsed: &ParsedPath<'_>,
    config: &EmitterConfig,
) -> Result<Resolved, LowerError> {
    let (mut alias, mut kind, mut key) = resolve_root(ctx, &parsed.root, config)?;
    let mut pending_keys_index: Option<Option<u64>> = None;

    for (i, step) in parsed.steps.iter().enumerate() {
        let is_last = i == parsed.steps.len() - 1;

        match step {
            Step::Keys(idx) => {
                if kind != AliasKind::Reference {
                    return Err(LowerError::SchemaViolation(format!(
                        "a `keys` step is only valid on a Reference alias, found {kind:?} at {key:?}"
                    )));
                }
                pending_keys_index = Some(*idx);
            }
            Step::SpecificAssetIds(idx) => {
                let rel = Relationship::SpecificAssetIds;
                let new_key = format!("{key}:{}[{idx:?}]", rel.name());
                let list_index = (config.list_index_on_value_edges
                    && list_index_policy("AssetInformation", rel.name()))
                .then_some(*idx)
                .flatten();
                let (new_alias, new_kind) = step_to_node(
                    ctx,
                    &alias,
                    &new_key,
                    rel,
                    "specificAssetIds",
                    NodeKind::SpecificAssetId.label(),
                    AliasKind::SpecificAssetId,
                    list_index,
                );
                alias = new_alias;
                kind = new_kind;
                key = new_key;
            }
            Step::Attribute(Attribute::AssetInformation) => {
                (alias, kind, key) = advance_simple_node(
                    ctx,
                    &alias,
                    &key,
                    Relationship::AssetInformation,
                    "assetInformation",
                    NodeKind::AssetInformation.label(),
                    AliasKind::AssetInformation,
                );
            }
            Step::Attribute(Attribute::SemanticId) => {
                (alias, kind, key) = advance_simple_node(
                    ctx,
                    &alias,
                    &key,
                    Relationship::SemanticId,
                    "semanticId",
                    NodeKind::Reference.label(),
                    AliasKind::Reference,
                );
            }
            Step::Attribute(Attribute::ExternalSubjectId) => {
                (alias, kind, key) = advance_simple_node(
                    ctx,
                    &alias,
                    &key,
                    Relationship::ExternalSubjectId,
                    "externalSubjectId",
                    NodeKind::Reference.label(),
                    AliasKind::Reference,
                );
            }
            Step::Attribute(Attribute::Submodels) => {
                (alias, kind, key) = advance_simple_node(
                    ctx,
                    &alias,
                    &key,
                    Relationship::Submodels,
                    "submodels",
                    IdentifiableKind::Submodel.label(),
                    AliasKind::Identifiable(IdentifiableKind::Submodel),
                );
            }
            Step::Attribute(Attribute::Value) => {
                if !is_last {
                    return Err(LowerError::SchemaViolation(
                        "`value` must be the final attribute step".to_string(),
                    ));
                }
                return resolve_value_leaf(ctx, &alias, &key, kind, pending_keys_index.take());
            }
            Step::Attribute(Attribute::Type) => {
                if !is_last {
                    return Err(LowerError::SchemaViolation(
                        "`type` must be the final attribute step".to_string(),
                    ));
                }
                return resolve_type_leaf(&alias, kind, pending_keys_index.take());
            }
            Step::Attribute(Attribute::Language) => {
                if !is_last {
                    return Err(LowerError::SchemaViolation(
                        "`language` must be the final attribute step".to_string(),
                    ));
                }
                return resolve_language_leaf(ctx, &alias, &key, kind);
            }
            Step::Attribute(attr) => {
                if !is_last {
                    return Err(LowerError::SchemaViolation(format!(
                        "`{}` must be the final attribute step",
                        attr.name()
                    )));
                }
                return Ok(Resolved {
                    expr: format!("{alias}.{}", attr.name()),
                    is_list: false,
                });
            }
        }
    }

    if let Some(idx) = pending_keys_index {
        return Err(LowerError::Unsupported(format!(
            "`keys{}` is not followed by a `value` or `type` step",
            idx.map(|i| format!("[{i}]")).unwrap_or_else(|| "[]".to_string())
        )));
    }

    // All steps were node-creating; the path terminates on a node rather
    // than a leaf attribute. Only a Reference has a sensible default
    // ("semanticId used terminally" per the schema contract).
    match kind {
        AliasKind::Reference => Ok(Resolved {
            expr: format!("{alias}.keys_value[0]"),
            is_list: false,
        }),
        other => Err(LowerError::SchemaViolation(format!(
            "path terminates on a {other:?} node without a leaf attribute"
        ))),
    }
}

/// Resolves the path's root to its starting (alias, kind, canonical key),
/// materializing the root MATCH fragment and any SME chain links.
fn resolve_root(
    ctx: &mut TranslationContext,
    root: &Root<'_>,
    config: &EmitterConfig,
) -> Result<(String, AliasKind, String), LowerError> {
    match root {
        Root::Aas => Ok(root_identifiable(ctx, "$aas", "aas", IdentifiableKind::Aas)),
        Root::Sm => Ok(root_identifiable(ctx, "$sm", "sm", IdentifiableKind::Submodel)),
        Root::Cd => Ok(root_identifiable(
            ctx,
            "$cd",
            "cd",
            IdentifiableKind::ConceptDescription,
        )),
        Root::Sme(segments) => {
            let (mut alias, _, mut key) =
                root_identifiable(ctx, "$sm", "sm", IdentifiableKind::Submodel);
            for (i, seg) in segments.iter().enumerate() {
                let rel = if i == 0 {
                    Relationship::SubmodelElements
                } else {
                    Relationship::Value
                };
                let (new_alias, new_key) =
                    resolve_sme_segment(ctx, &alias, &key, rel, seg, config)?;
                alias = new_alias;
                key = new_key;
            }
            Ok((alias, AliasKind::SubmodelElement, key))
        }
    }
}

fn root_identifiable(
    ctx: &mut TranslationContext,
    key: &str,
    family: &'static str,
    ik: IdentifiableKind,
) -> (String, AliasKind, String) {
    if let Some((alias, kind)) = ctx.alias_for(key) {
        return (alias, kind, key.to_string());
    }
    let alias = ctx.next_alias(family);
    let properties = ctx.take_root_properties(key);
    ctx.add_fragment(mb::root_fragment_with_properties(&alias, ik.label(), &properties));
    ctx.insert_alias(key.to_string(), alias.clone(), AliasKind::Identifiable(ik));
    ctx.set_return_variable_if_absent(alias.clone());
    (alias, AliasKind::Identifiable(ik), key.to_string())
}

/// Builds the canonical key component for one SME segment, shared with
/// `condition_lowerer`'s `$match` correlation pre-pass so both agree on
/// what counts as "the same array-all segment".
pub(crate) fn sme_segment_key(prev_key: &str, rel: Relationship, seg: &Segment<'_>) -> String {
    let component = match seg {
        Segment::Named(name) => name.to_string(),
        Segment::ArrayIndexed(name, idx) => format!("{name}[{idx}]"),
        Segment::ArrayAll(name) => format!("{name}[]"),
    };
    format!("{prev_key}:{}:{component}", rel.name())
}

fn resolve_sme_segment(
    ctx: &mut TranslationContext,
    parent_alias: &str,
    parent_key: &str,
    rel: Relationship,
    seg: &Segment<'_>,
    config: &EmitterConfig,
) -> Result<(String, String), LowerError> {
    let key = sme_segment_key(parent_key, rel, seg);

    match seg {
        Segment::Named(name) => {
            if let Some((alias, _)) = ctx.alias_for(&key) {
                return Ok((alias, key));
            }
            let alias = ctx.next_alias("sme");
            ctx.add_fragment(mb::sme_child_fragment(
                parent_alias,
                rel.name(),
                &alias,
                Some(*name),
                None,
                config.quote,
            ));
            ctx.insert_alias(key.clone(), alias.clone(), AliasKind::SubmodelElement);
            Ok((alias, key))
        }
        Segment::ArrayIndexed(name, idx) => {
            if let Some((alias, _)) = ctx.alias_for(&key) {
                return Ok((alias, key));
            }
            let alias = ctx.next_alias("sme");
            let list_index = (config.list_index_on_value_edges
                && list_index_policy("SubmodelElementList", Relationship::Value.name()))
            .then_some(*idx);
            ctx.add_fragment(mb::sme_child_fragment(
                parent_alias,
                rel.name(),
                &alias,
                Some(*name),
                list_index,
                config.quote,
            ));
            ctx.insert_alias(key.clone(), alias.clone(), AliasKind::SubmodelElement);
            Ok((alias, key))
        }
        Segment::ArrayAll(_) => {
            if let Some(forced) = ctx.correlated_alias(&key) {
                if let Some((alias, _)) = ctx.alias_for(&key) {
                    return Ok((alias, key));
                }
                ctx.add_fragment(mb::sme_child_fragment(
                    parent_alias,
                    rel.name(),
                    &forced,
                    None,
                    None,
                    config.quote,
                ));
                ctx.insert_alias(key.clone(), forced.clone(), AliasKind::SubmodelElement);
                return Ok((forced, key));
            }
            // Default: every occurrence of an uncorrelated array-all
            // segment is its own traversal — "any element", possibly a
            // different one each time. See condition_lowerer's $match
            // handling for the correlated case.
            let alias = ctx.next_alias("sme");
            ctx.add_fragment(mb::sme_child_fragment(
                parent_alias,
                rel.name(),
                &alias,
                None,
                None,
                config.quote,
            ));
            Ok((alias, key))
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn step_to_node(
    ctx: &mut TranslationContext,
    parent_alias: &str,
    new_key: &str,
    rel: Relationship,
    family: &'static str,
    label: &str,
    new_kind: AliasKind,
    list_index: Option<u64>,
) -> (String, AliasKind) {
    if let Some((alias, kind)) = ctx.alias_for(new_key) {
        return (alias, kind);
    }
    let alias = ctx.next_alias(family);
    ctx.add_fragment(mb::edge_to_node_fragment(
        parent_alias,
        rel.name(),
        &alias,
        label,
        list_index,
    ));
    ctx.insert_alias(new_key.to_string(), alias.clone(), new_kind);
    (alias, new_kind)
}

fn advance_simple_node(
    ctx: &mut TranslationContext,
    alias: &str,
    key: &str,
    rel: Relationship,
    family: &'static str,
    label: &str,
    new_kind: AliasKind,
) -> (String, AliasKind, String) {
    let new_key = format!("{key}:{}", rel.name());
    let (new_alias, kind) = step_to_node(ctx, alias, &new_key, rel, family, label, new_kind, None);
    (new_alias, kind, new_key)
}

fn resolve_value_leaf(
    ctx: &mut TranslationContext,
    alias: &str,
    key: &str,
    kind: AliasKind,
    pending_keys_index: Option<Option<u64>>,
) -> Result<Resolved, LowerError> {
    match kind {
        AliasKind::Reference => {
            let idx = pending_keys_index.unwrap_or(None);
            let keys_value = keys_property("value");
            Ok(match idx {
                Some(i) => Resolved {
                    expr: format!("{alias}.{keys_value}[{i}]"),
                    is_list: false,
                },
                None => Resolved {
                    expr: format!("{alias}.{keys_value}"),
                    is_list: true,
                },
            })
        }
        AliasKind::MultiLanguageProperty => {
            reject_pending_index(pending_keys_index)?;
            Ok(Resolved {
                expr: format!("{alias}.{}", multi_language_property("text")),
                is_list: true,
            })
        }
        AliasKind::SubmodelElement => {
            reject_pending_index(pending_keys_index)?;
            let _ = (ctx, key);
            Ok(Resolved {
                expr: format!("{alias}.value"),
                is_list: false,
            })
        }
        other => Err(LowerError::SchemaViolation(format!(
            "`value` is not meaningful on a {other:?} alias"
        ))),
    }
}

fn resolve_type_leaf(
    alias: &str,
    kind: AliasKind,
    pending_keys_index: Option<Option<u64>>,
) -> Result<Resolved, LowerError> {
    match kind {
        AliasKind::Reference => {
            let idx = pending_keys_index.unwrap_or(None);
            let keys_type = keys_property("type");
            Ok(match idx {
                Some(i) => Resolved {
                    expr: format!("{alias}.{keys_type}[{i}]"),
                    is_list: false,
                },
                None => Resolved {
                    expr: format!("{alias}.{keys_type}"),
                    is_list: true,
                },
            })
        }
        other => Err(LowerError::SchemaViolation(format!(
            "`type` is only valid on a Reference alias, found {other:?}"
        ))),
    }
}

fn resolve_language_leaf(
    ctx: &mut TranslationContext,
    alias: &str,
    key: &str,
    kind: AliasKind,
) -> Result<Resolved, LowerError> {
    match kind {
        AliasKind::SubmodelElement => {
            ctx.upgrade_kind(key, AliasKind::MultiLanguageProperty);
            Ok(Resolved {
                expr: format!("{alias}.{}", multi_language_property("language")),
                is_list: true,
            })
        }
        AliasKind::MultiLanguageProperty => Ok(Resolved {
            expr: format!("{alias}.{}", multi_language_property("language")),
            is_list: true,
        }),
        other => Err(LowerError::SchemaViolation(format!(
            "`language` is not meaningful on a {other:?} alias"
        ))),
    }
}

/// The flattened `Reference.keys` property name for `component`
/// (`"type"`/`"value"`), sourced from the schema contract's parallel-list
/// flattening rule rather than hardcoded at each call site.
fn keys_property(component: &str) -> String {
    flattened_properties("keys")
        .expect("schema contract defines a flattening rule for `keys`")
        .property(component)
}

/// The flattened `MultiLanguageProperty.value` property name for
/// `component` (`"language"`/`"text"`).
fn multi_language_property(component: &str) -> String {
    flattened_properties("value")
        .expect("schema contract defines a flattening rule for MultiLanguageProperty `value`")
        .property(component)
}

fn reject_pending_index(pending_keys_index: Option<Option<u64>>) -> Result<(), LowerError> {
    if pending_keys_index.is_some() {
        return Err(LowerError::SchemaViolation(
            "a `keys` index only applies to a Reference alias".to_string(),
        ));
    }
    Ok(())
}
