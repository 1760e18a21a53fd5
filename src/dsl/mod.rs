//! Parses the JSON query DSL into a [`crate::ast::Condition`].
//!
//! Dispatch on operator/cast keys is an exhaustive table keyed on the
//! single recognized key present in an object — no "first match in
//! iteration order wins" behavior on ambiguous input. Any object with zero
//! or more than one recognized key, or with a key outside the closed set,
//! is rejected immediately with a typed error.

mod errors;

pub use errors::DslError;

use serde_json::Value as Json;

use crate::ast::{CompareOp, Condition, Expression};

const COMBINATORS: &[&str] = &["$and", "$or", "$not", "$match"];
const COMPARATORS: &[&str] = &[
    "$eq",
    "$ne",
    "$gt",
    "$ge",
    "$lt",
    "$le",
    "$contains",
    "$starts-with",
    "$ends-with",
    "$regex",
];
const VALUE_KEYS: &[&str] = &[
    "$field",
    "$strVal",
    "$numVal",
    "$boolean",
    "$strCast",
    "$numCast",
    "$hexCast",
    "$boolCast",
    "$dateTimeCast",
    "$timeCast",
];

/// Parses `{"$condition": <expr>}` into a [`Condition`].
pub fn parse(query: &Json) -> Result<Condition, DslError> {
    let obj = query
        .as_object()
        .ok_or_else(|| DslError::NotAnObject(query.to_string()))?;

    if obj.len() != 1 || !obj.contains_key("$condition") {
        return Err(DslError::MissingCondition(query.to_string()));
    }

    let expr = parse_expression(&obj["$condition"])?;
    Ok(Condition { expr })
}

fn recognized_key<'a>(
    obj: &'a serde_json::Map<String, Json>,
    keys: &[&'static str],
    context: &'static str,
) -> Result<(&'a str, &'a Json), DslError> {
    let present: Vec<&str> = keys
        .iter()
        .filter(|k| obj.contains_key(**k))
        .copied()
        .collect();

    match present.as_slice() {
        [key] => Ok((key, &obj[*key])),
        _ => Err(DslError::WrongKeyCount {
            expected: "one recognized key",
            found: present.len(),
            value: Json::Object(obj.clone()).to_string(),
        }),
    }
    .map_err(|e| {
        // Distinguish "no recognized key at all, but some other unknown key
        // was present" from "ambiguous, multiple recognized keys" — both
        // collapse to WrongKeyCount, but an entirely unrecognized single
        // key gets its own, more specific error.
        if present.is_empty() && obj.len() == 1 {
            let key = obj.keys().next().cloned().unwrap_or_default();
            return DslError::UnknownOperator { context, key };
        }
        e
    })
}

fn parse_expression(value: &Json) -> Result<Expression, DslError> {
    let obj = value
        .as_object()
        .ok_or_else(|| DslError::NotAnObject(value.to_string()))?;

    let mut all_keys: Vec<&'static str> = Vec::with_capacity(COMBINATORS.len() + COMPARATORS.len());
    all_keys.extend_from_slice(COMBINATORS);
    all_keys.extend_from_slice(COMPARATORS);

    let (key, operand) = recognized_key(obj, &all_keys, "expression")?;

    match key {
        "$and" => Ok(Expression::And(parse_operand_list(operand, key, 2)?)),
        "$or" => Ok(Expression::Or(parse_operand_list(operand, key, 2)?)),
        "$match" => Ok(Expression::Match(parse_operand_list(operand, key, 2)?)),
        "$not" => Ok(Expression::Not(Box::new(parse_expression(operand)?))),
        _ => {
            let op = compare_op(key).expect("key drawn from COMPARATORS");
            let (left, right) = parse_pair(operand, key)?;
            Ok(Expression::Compare(
                op,
                parse_value(left)?,
                parse_value(right)?,
            ))
        }
    }
}

fn parse_operand_list(
    value: &Json,
    op: &str,
    min_len: usize,
) -> Result<Vec<Expression>, DslError> {
    let items = value
        .as_array()
        .ok_or_else(|| DslError::NotAnArray {
            op: op.to_string(),
            value: value.to_string(),
        })?;
    if items.len() < min_len {
        return Err(DslError::WrongArity {
            op: op.to_string(),
            expected: min_len,
            found: items.len(),
        });
    }
    items.iter().map(parse_expression).collect()
}

fn parse_pair<'a>(value: &'a Json, op: &str) -> Result<(&'a Json, &'a Json), DslError> {
    let items = value
        .as_array()
        .ok_or_else(|| DslError::NotAnArray {
            op: op.to_string(),
            value: value.to_string(),
        })?;
    match items.as_slice() {
        [a, b] => Ok((a, b)),
        other => Err(DslError::WrongArity {
            op: op.to_string(),
            expected: 2,
            found: other.len(),
        }),
    }
}

fn compare_op(key: &str) -> Option<CompareOp> {
    Some(match key {
        "$eq" => CompareOp::Eq,
        "$ne" => CompareOp::Ne,
        "$gt" => CompareOp::Gt,
        "$ge" => CompareOp::Ge,
        "$lt" => CompareOp::Lt,
        "$le" => CompareOp::Le,
        "$contains" => CompareOp::Contains,
        "$starts-with" => CompareOp::StartsWith,
        "$ends-with" => CompareOp::EndsWith,
        "$regex" => CompareOp::Regex,
        _ => return None,
    })
}

fn parse_value(value: &Json) -> Result<crate::ast::Value, DslError> {
    use crate::ast::{Cast, Value};

    let obj = value
        .as_object()
        .ok_or_else(|| DslError::NotAnObject(value.to_string()))?;
    let (key, operand) = recognized_key(obj, VALUE_KEYS, "value")?;

    Ok(match key {
        "$field" => Value::Field(expect_str(operand, key)?),
        "$strVal" => Value::Str(expect_str(operand, key)?),
        "$numVal" => Value::Num(expect_num(operand, key)?),
        "$boolean" => Value::Bool(expect_bool(operand, key)?),
        "$strCast" => Value::Cast(Cast::Str, Box::new(parse_value(operand)?)),
        "$numCast" => Value::Cast(Cast::Num, Box::new(parse_value(operand)?)),
        "$hexCast" => Value::Cast(Cast::Hex, Box::new(parse_value(operand)?)),
        "$boolCast" => Value::Cast(Cast::Bool, Box::new(parse_value(operand)?)),
        "$dateTimeCast" => Value::Cast(Cast::DateTime, Box::new(parse_value(operand)?)),
        "$timeCast" => Value::Cast(Cast::Time, Box::new(parse_value(operand)?)),
        _ => unreachable!("key drawn from VALUE_KEYS"),
    })
}

fn expect_str(value: &Json, key: &str) -> Result<String, DslError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| DslError::NotAString {
            key: key.to_string(),
            value: value.to_string(),
        })
}

fn expect_num(value: &Json, key: &str) -> Result<f64, DslError> {
    value.as_f64().ok_or_else(|| DslError::NotANumber {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn expect_bool(value: &Json, key: &str) -> Result<bool, DslError> {
    value.as_bool().ok_or_else(|| DslError::NotABool {
        key: key.to_string(),
        value: value.to_string(),
    })
}
