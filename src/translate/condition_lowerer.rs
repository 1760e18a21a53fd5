//! Lowers a parsed [`crate::ast::Condition`] into a single WHERE predicate
//! string, materializing whatever MATCH fragments the referenced paths
//! need via [`super::alias_registry`].

use crate::ast::{Cast, CompareOp, Condition, Expression, Value};
use crate::config::EmitterConfig;
use crate::path::{self, Attribute, Root, Segment, Step};

use super::alias_registry::{self, Resolved};
use super::context::TranslationContext;
use super::errors::LowerError;
use super::literal::{format_number, quote_str};

/// Lowers the top-level condition to its WHERE predicate text (without the
/// `WHERE` keyword itself — the emitter adds that).
pub(crate) fn lower_condition(
    ctx: &mut TranslationContext,
    condition: &Condition,
    config: &EmitterConfig,
) -> Result<String, LowerError> {
    lower_expression(ctx, &condition.expr, config)
}

fn lower_expression(
    ctx: &mut TranslationContext,
    expr: &Expression,
    config: &EmitterConfig,
) -> Result<String, LowerError> {
    match expr {
        Expression::Compare(op, left, right) => lower_compare(ctx, *op, left, right, config),
        Expression::And(operands) => lower_and(ctx, operands, config),
        Expression::Or(operands) => lower_combinator(ctx, operands, "OR", config),
        Expression::Not(inner) => {
            let lowered = lower_expression(ctx, inner, config)?;
            Ok(format!("NOT ({lowered})"))
        }
        Expression::Match(operands) => lower_match(ctx, operands, config),
    }
}

fn lower_combinator(
    ctx: &mut TranslationContext,
    operands: &[Expression],
    joiner: &str,
    config: &EmitterConfig,
) -> Result<String, LowerError> {
    let parts = operands
        .iter()
        .map(|op| {
            let lowered = lower_expression(ctx, op, config)?;
            Ok(if needs_parens(op) {
                format!("({lowered})")
            } else {
                lowered
            })
        })
        .collect::<Result<Vec<String>, LowerError>>()?;
    Ok(parts.join(&format!(" {joiner} ")))
}

/// A nested `And`/`Or`/`Match` operand is parenthesized when joined into a
/// different combinator; a bare comparison or `Not` never needs it.
fn needs_parens(expr: &Expression) -> bool {
    matches!(expr, Expression::And(_) | Expression::Or(_) | Expression::Match(_))
}

/// Lowers an `And`, first lifting any direct conjunct of the shape
/// `$eq(<Identifiable-root>#<scalar>, <literal>)` into that root's node
/// pattern instead of the WHERE predicate: `$sm#idShort` equality folds
/// into `(sm0:Submodel {idShort: '...'})` rather than being repeated as
/// `WHERE sm0.idShort = '...'`. Only direct operands of this `And` are
/// eligible — a comparison nested inside a sibling `Or`/`Not`/`Match` is
/// left in WHERE untouched.
fn lower_and(
    ctx: &mut TranslationContext,
    operands: &[Expression],
    config: &EmitterConfig,
) -> Result<String, LowerError> {
    let mut remaining = Vec::with_capacity(operands.len());
    for operand in operands {
        match liftable_equality(operand, config)? {
            // Only liftable if that root hasn't already been materialized
            // as a node — once a root's fragment is emitted, queuing a
            // property for it would be silently dropped, never read back.
            Some((root_key, property, rendered)) if ctx.alias_for(&root_key).is_none() => {
                ctx.queue_root_property(root_key, property, rendered);
            }
            _ => remaining.push(operand),
        }
    }

    if remaining.is_empty() {
        // Every conjunct was liftable; the WHERE section must still exist.
        return Ok("true".to_string());
    }

    let parts = remaining
        .into_iter()
        .map(|op| {
            let lowered = lower_expression(ctx, op, config)?;
            Ok(if needs_parens(op) {
                format!("({lowered})")
            } else {
                lowered
            })
        })
        .collect::<Result<Vec<String>, LowerError>>()?;
    Ok(parts.join(" AND "))
}

/// Recognizes a liftable direct equality conjunct: `$field` against an
/// Identifiable root (`$aas`/`$sm`/`$cd`) with exactly one scalar attribute
/// step and no further path, compared with a non-`$field` literal. Returns
/// `Ok(None)` for anything else. A malformed `$field` path string still
/// surfaces as `LowerError::Path` rather than being silently treated as
/// "not liftable".
fn liftable_equality(
    expr: &Expression,
    config: &EmitterConfig,
) -> Result<Option<(String, String, String)>, LowerError> {
    let Expression::Compare(CompareOp::Eq, left, right) = expr else {
        return Ok(None);
    };
    let (field_path, literal) = match (left, right) {
        (Value::Field(p), other) if !matches!(other, Value::Field(_)) => (p, other),
        (other, Value::Field(p)) if !matches!(other, Value::Field(_)) => (p, other),
        _ => return Ok(None),
    };

    let parsed = path::parse(field_path)?;
    let root_key = match parsed.root {
        Root::Aas => "$aas",
        Root::Sm => "$sm",
        Root::Cd => "$cd",
        Root::Sme(_) => return Ok(None),
    };
    let [Step::Attribute(attr)] = parsed.steps.as_slice() else {
        return Ok(None);
    };
    if !is_liftable_attribute(*attr) {
        return Ok(None);
    }

    let rendered = match literal {
        Value::Str(s) => quote_str(s, config.quote),
        Value::Num(n) => format_number(*n),
        Value::Bool(b) => b.to_string(),
        Value::Cast(_, _) | Value::Field(_) => return Ok(None),
    };
    Ok(Some((root_key.to_string(), attr.name().to_string(), rendered)))
}

/// Scalar attributes that resolve directly to `<alias>.<property>` with no
/// intermediate node and no schema-sensitive context — the only shapes
/// safe to fold into a node pattern instead of WHERE.
fn is_liftable_attribute(attr: Attribute) -> bool {
    matches!(
        attr,
        Attribute::Id
            | Attribute::IdShort
            | Attribute::AssetKind
            | Attribute::AssetType
            | Attribute::GlobalAssetId
            | Attribute::ValueType
            | Attribute::Name
    )
}

fn lower_compare(
    ctx: &mut TranslationContext,
    op: CompareOp,
    left: &Value,
    right: &Value,
    config: &EmitterConfig,
) -> Result<String, LowerError> {
    let lhs = lower_value(ctx, left, config)?;
    let rhs = lower_value(ctx, right, config)?;

    if op == CompareOp::Eq && lhs.is_list && rhs.is_list {
        return Err(LowerError::Unsupported(
            "equality between two list-valued operands has unspecified semantics".to_string(),
        ));
    }

    if op == CompareOp::Eq && (lhs.is_list || rhs.is_list) {
        let (scalar, list) = if lhs.is_list {
            (&rhs.expr, &lhs.expr)
        } else {
            (&lhs.expr, &rhs.expr)
        };
        return Ok(format!("{scalar} IN {list}"));
    }

    Ok(format!("{} {} {}", lhs.expr, compare_operator(op), rhs.expr))
}

fn compare_operator(op: CompareOp) -> &'static str {
    match op {
        CompareOp::Eq => "=",
        CompareOp::Ne => "<>",
        CompareOp::Gt => ">",
        CompareOp::Ge => ">=",
        CompareOp::Lt => "<",
        CompareOp::Le => "<=",
        CompareOp::Contains => "CONTAINS",
        CompareOp::StartsWith => "STARTS WITH",
        CompareOp::EndsWith => "ENDS WITH",
        CompareOp::Regex => "=~",
    }
}

struct LoweredValue {
    expr: String,
    is_list: bool,
}

fn lower_value(
    ctx: &mut TranslationContext,
    value: &Value,
    config: &EmitterConfig,
) -> Result<LoweredValue, LowerError> {
    match value {
        Value::Field(path_str) => {
            let parsed = path::parse(path_str)?;
            let Resolved { expr, is_list } = alias_registry::resolve(ctx, &parsed, config)?;
            Ok(LoweredValue { expr, is_list })
        }
        Value::Str(s) => Ok(LoweredValue {
            expr: quote_str(s, config.quote),
            is_list: false,
        }),
        Value::Num(n) => Ok(LoweredValue {
            expr: format_number(*n),
            is_list: false,
        }),
        Value::Bool(b) => Ok(LoweredValue {
            expr: b.to_string(),
            is_list: false,
        }),
        Value::Cast(Cast::Hex, _) => Err(LowerError::Unsupported("$hexCast".to_string())),
        Value::Cast(Cast::Time, _) => Err(LowerError::Unsupported("$timeCast".to_string())),
        Value::Cast(cast, inner) => {
            let lowered = lower_value(ctx, inner, config)?;
            let func = cast_function_name(cast, config);
            Ok(LoweredValue {
                expr: format!("{func}({})", lowered.expr),
                is_list: lowered.is_list,
            })
        }
    }
}

fn cast_function_name(cast: &Cast, config: &EmitterConfig) -> &str {
    match cast {
        Cast::Str => &config.cast_functions.str_fn,
        Cast::Num => &config.cast_functions.num_fn,
        Cast::Bool => &config.cast_functions.bool_fn,
        Cast::DateTime => &config.cast_functions.date_time_fn,
        Cast::Hex | Cast::Time => unreachable!("rejected before reaching cast_function_name"),
    }
}

/// Lowers a `$match`, first canonicalizing every array-all segment shared
/// by more than one operand to a single forced alias, then delegating to
/// the same join logic as `$and`.
fn lower_match(
    ctx: &mut TranslationContext,
    operands: &[Expression],
    config: &EmitterConfig,
) -> Result<String, LowerError> {
    let mut seen: indexmap::IndexMap<String, u32> = indexmap::IndexMap::new();
    for operand in operands {
        let mut keys = Vec::new();
        collect_array_all_keys(operand, &mut keys)?;
        for key in keys {
            *seen.entry(key).or_insert(0u32) += 1;
        }
    }
    for (key, count) in seen {
        if count > 1 {
            ctx.force_correlated_alias(key);
        }
    }
    lower_combinator(ctx, operands, "AND", config)
}

/// Walks an expression tree collecting the canonical key of every
/// array-all (`name[]`) segment reached by a `$field` it contains.
fn collect_array_all_keys(expr: &Expression, out: &mut Vec<String>) -> Result<(), LowerError> {
    match expr {
        Expression::Compare(_, left, right) => {
            collect_from_value(left, out)?;
            collect_from_value(right, out)?;
        }
        Expression::And(operands) | Expression::Or(operands) | Expression::Match(operands) => {
            for operand in operands {
                collect_array_all_keys(operand, out)?;
            }
        }
        Expression::Not(inner) => collect_array_all_keys(inner, out)?,
    }
    Ok(())
}

fn collect_from_value(value: &Value, out: &mut Vec<String>) -> Result<(), LowerError> {
    match value {
        Value::Field(path_str) => {
            let parsed = path::parse(path_str)?;
            if let path::Root::Sme(segments) = &parsed.root {
                let mut key = "$sm".to_string();
                for (i, seg) in segments.iter().enumerate() {
                    let rel = if i == 0 {
                        crate::schema::Relationship::SubmodelElements
                    } else {
                        crate::schema::Relationship::Value
                    };
                    key = alias_registry::sme_segment_key(&key, rel, seg);
                    if matches!(seg, Segment::ArrayAll(_)) {
                        out.push(key.clone());
                    }
                }
            }
        }
        Value::Cast(_, inner) => collect_from_value(inner, out)?,
        Value::Str(_) | Value::Num(_) | Value::Bool(_) => {}
    }
    Ok(())
}
