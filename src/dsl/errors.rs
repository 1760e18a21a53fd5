//! Errors produced while parsing the JSON query DSL into an [`crate::ast`].

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DslError {
    #[error("expected a JSON object, got {0}")]
    NotAnObject(String),

    #[error("query is missing the top-level \"$condition\" key: {0}")]
    MissingCondition(String),

    #[error("expected exactly one of {expected}, found {found} recognized keys in {value}")]
    WrongKeyCount {
        expected: &'static str,
        found: usize,
        value: String,
    },

    #[error("unrecognized {context} key {key:?}")]
    UnknownOperator { context: &'static str, key: String },

    #[error("operator {op:?} expects {expected} operand(s), found {found}")]
    WrongArity {
        op: String,
        expected: usize,
        found: usize,
    },

    #[error("expected a JSON array for operator {op:?}, got {value}")]
    NotAnArray { op: String, value: String },

    #[error("expected a JSON string for {key:?}, got {value}")]
    NotAString { key: String, value: String },

    #[error("expected a JSON number for {key:?}, got {value}")]
    NotANumber { key: String, value: String },

    #[error("expected a JSON boolean for {key:?}, got {value}")]
    NotABool { key: String, value: String },
}
