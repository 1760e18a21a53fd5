//! Configuration for the emitted graph-query style.
//!
//! The compiler itself is a pure function, but *how* it renders a query
//! (quote character, MATCH fragment separator, whether array-indexed
//! `value` edges carry a `list_index` property, and the target dialect's
//! cast function names) is a configuration value, not a hardcoded
//! constant — the same shape as this codebase's `ServerConfig`, with the
//! same three construction paths (environment, CLI, YAML file) plus a
//! `Default`.

use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;
use validator::Validate;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Parse error for {field}: {value} - {source}")]
    Parse {
        field: String,
        value: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Target-dialect conversion function names backing `$strCast`/`$numCast`/
/// `$boolCast`/`$dateTimeCast`. `$hexCast`/`$timeCast` have no entry here —
/// they are rejected at lowering time regardless of configuration.
#[derive(Clone, Debug, Validate, Serialize, Deserialize)]
pub struct CastFunctionNames {
    #[validate(length(min = 1, message = "str_fn cannot be empty"))]
    pub str_fn: String,
    #[validate(length(min = 1, message = "num_fn cannot be empty"))]
    pub num_fn: String,
    #[validate(length(min = 1, message = "bool_fn cannot be empty"))]
    pub bool_fn: String,
    #[validate(length(min = 1, message = "date_time_fn cannot be empty"))]
    pub date_time_fn: String,
}

impl Default for CastFunctionNames {
    fn default() -> Self {
        Self {
            str_fn: "toString".to_string(),
            num_fn: "toFloat".to_string(),
            bool_fn: "toBoolean".to_string(),
            date_time_fn: "datetime".to_string(),
        }
    }
}

/// Emission style for the generated MATCH/WHERE/RETURN query.
#[derive(Clone, Debug, Validate, Serialize, Deserialize)]
pub struct EmitterConfig {
    /// Quote character wrapping string literals and quoted property values.
    pub quote: char,

    /// Separator joining `MATCH <fragment>` lines in the emitted query.
    #[validate(length(min = 1, message = "match_separator cannot be empty"))]
    pub match_separator: String,

    /// Whether an array-indexed `$sme` segment (`name[i]`) adds a
    /// `list_index` property to its traversal edge.
    pub list_index_on_value_edges: bool,

    #[validate(nested)]
    pub cast_functions: CastFunctionNames,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            quote: '\'',
            match_separator: "\n".to_string(),
            list_index_on_value_edges: true,
            cast_functions: CastFunctionNames::default(),
        }
    }
}

impl EmitterConfig {
    /// Builds configuration from `AASGRAPH_*` environment variables,
    /// falling back to [`EmitterConfig::default`] for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let config = Self {
            quote: parse_env_var("AASGRAPH_QUOTE", "'")?,
            match_separator: env::var("AASGRAPH_MATCH_SEPARATOR").unwrap_or_else(|_| "\n".to_string()),
            list_index_on_value_edges: parse_env_var("AASGRAPH_LIST_INDEX_ON_VALUE_EDGES", "true")?,
            cast_functions: CastFunctionNames {
                str_fn: env::var("AASGRAPH_CAST_STR_FN").unwrap_or_else(|_| "toString".to_string()),
                num_fn: env::var("AASGRAPH_CAST_NUM_FN").unwrap_or_else(|_| "toFloat".to_string()),
                bool_fn: env::var("AASGRAPH_CAST_BOOL_FN").unwrap_or_else(|_| "toBoolean".to_string()),
                date_time_fn: env::var("AASGRAPH_CAST_DATETIME_FN")
                    .unwrap_or_else(|_| "datetime".to_string()),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Builds configuration from CLI arguments. No CLI binary lives in
    /// this crate (entry points are out of core scope), but the
    /// constructor is provided as a pure function for an external
    /// front-end to call, mirroring `ServerConfig::from_cli`.
    pub fn from_cli(cli: CliEmitterConfig) -> Result<Self, ConfigError> {
        let config = Self {
            quote: cli.quote,
            match_separator: cli.match_separator,
            list_index_on_value_edges: cli.list_index_on_value_edges,
            cast_functions: cli.cast_functions,
        };

        config.validate()?;
        Ok(config)
    }

    /// Builds configuration from a YAML file.
    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
            field: "yaml_file".to_string(),
            value: "file read failed".to_string(),
            source: Box::new(e),
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            field: "yaml_content".to_string(),
            value: content,
            source: Box::new(e),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Merges with another configuration (`other` overrides `self`).
    pub fn merge(&mut self, other: Self) {
        self.quote = other.quote;
        self.match_separator = other.match_separator;
        self.list_index_on_value_edges = other.list_index_on_value_edges;
        self.cast_functions = other.cast_functions;
    }
}

/// CLI configuration (parsed from command-line arguments by an external
/// front-end; this crate has no CLI entry point of its own).
#[derive(Clone, Debug)]
pub struct CliEmitterConfig {
    pub quote: char,
    pub match_separator: String,
    pub list_index_on_value_edges: bool,
    pub cast_functions: CastFunctionNames,
}

/// Parses an environment variable with a default value.
fn parse_env_var<T: std::str::FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|e| ConfigError::Parse {
        field: key.to_string(),
        value,
        source: Box::new(e),
    })
}
