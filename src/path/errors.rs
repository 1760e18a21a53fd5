//! Errors produced while decomposing a field-path string.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("field path {0:?} is missing the '#' separating root from attribute path")]
    MissingSeparator(String),

    #[error("field path {0:?} has more than one '#'")]
    MultipleSeparators(String),

    #[error("field path {0:?} has an unrecognized root (expected $aas, $sm, $cd, or $sme)")]
    UnknownRoot(String),

    #[error("field path {0:?} references unknown attribute {1:?}")]
    UnknownAttribute(String, String),

    #[error("field path {0:?} has a malformed list index {1:?}")]
    MalformedIndex(String, String),

    #[error("field path {0:?} could not be fully parsed, trailing input {1:?}")]
    TrailingInput(String, String),
}
