use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use densemat::{FormatConfig, Matrix, MatrixError, Operand, RoundingMode};

use crate::eval::Operation;

/// How results are written to the output sink.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}. Expected text or json", s)),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EvalConfig {
    pub version: String,
    pub format: FormatConfig,
    pub output: OutputFormat,
    pub rounding: RoundingMode,
    pub round_digits: Option<i32>,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            version: clap::crate_version!().to_string(),
            format: FormatConfig::default(),
            output: OutputFormat::Text,
            rounding: RoundingMode::HalfEven,
            round_digits: None,
        }
    }
}

impl EvalConfig {
    /// Load a JSON config, falling back to the default for every field that
    /// is missing or invalid.
    pub fn from_file(config_path: &Path) -> Result<Self> {
        let config_json = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let partial: Value = serde_json::from_str(&config_json)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;
        let mut config = EvalConfig::default();

        macro_rules! load_or_default {
            ($field:ident) => {
                if let Some(val) = partial.get(stringify!($field)) {
                    if let Ok(parsed) = serde_json::from_value(val.clone()) {
                        config.$field = parsed;
                    } else {
                        log::warn!(
                            "Config Invalid value for '{}', using default: {:?}",
                            stringify!($field), config.$field
                        );
                    }
                } else {
                    log::debug!(
                        "Config Missing field '{}', using default: {:?}",
                        stringify!($field), config.$field
                    );
                }
            };
        }

        load_or_default!(format);
        load_or_default!(output);
        load_or_default!(rounding);
        load_or_default!(round_digits);

        Ok(config)
    }

    /// Config file (if any) with command-line overrides applied on top.
    pub fn from_arguments(config_path: Option<&PathBuf>, matches: &ArgMatches) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => EvalConfig::from_file(path)?,
            None => EvalConfig::default(),
        };

        if let Some(output) = matches.get_one::<String>("format") {
            config.output = OutputFormat::from_str(output).map_err(anyhow::Error::msg)?;
        }
        if let Some(digits) = matches.get_one::<i32>("round") {
            config.round_digits = Some(*digits);
        }
        if let Some(mode) = matches.get_one::<String>("rounding") {
            config.rounding = RoundingMode::from_str(mode).map_err(anyhow::Error::msg)?;
        }
        if let Some(precision) = matches.get_one::<usize>("precision") {
            config.format.precision = Some(*precision);
        }

        Ok(config)
    }
}

/// One operation with its operands, as read from an input file.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EvalRequest {
    pub op: Operation,
    pub lhs: Value,
    #[serde(default)]
    pub rhs: Option<Value>,
}

pub fn load_request<P: AsRef<Path>>(path: P) -> Result<EvalRequest> {
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read input: {}", path.as_ref().display()))?;
    let request: EvalRequest = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse input: {}", path.as_ref().display()))?;
    Ok(request)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn json_number(value: &Value) -> Result<f64, MatrixError> {
    value.as_f64().ok_or_else(|| {
        MatrixError::TypeMismatch(format!(
            "matrix elements must be numbers, got {}",
            json_kind(value)
        ))
    })
}

/// Convert a JSON value into an operand.
///
/// Accepted forms are a number (scalar), an array of numbers (a single row),
/// an array of equally long numeric arrays (rows), or an object with `rows`,
/// `cols` and `elements`. Anything else is a type mismatch.
pub fn operand_from_json(value: &Value) -> Result<Operand<f64>, MatrixError> {
    match value {
        Value::Number(_) => Ok(Operand::Scalar(json_number(value)?)),
        Value::Array(items) if items.iter().all(Value::is_array) && !items.is_empty() => {
            let rows = items
                .iter()
                .map(|row| {
                    row.as_array()
                        .into_iter()
                        .flatten()
                        .map(json_number)
                        .collect::<Result<Vec<f64>, MatrixError>>()
                })
                .collect::<Result<Vec<Vec<f64>>, MatrixError>>()?;
            Ok(Operand::Matrix(Matrix::from_rows(rows)?))
        }
        Value::Array(items) => {
            let row = items
                .iter()
                .map(json_number)
                .collect::<Result<Vec<f64>, MatrixError>>()?;
            Ok(Operand::Matrix(Matrix::from_rows(vec![row])?))
        }
        Value::Object(_) => serde_json::from_value::<Matrix<f64>>(value.clone())
            .map(Operand::Matrix)
            .map_err(|e| MatrixError::TypeMismatch(format!("invalid matrix object: {}", e))),
        other => Err(MatrixError::TypeMismatch(format!(
            "operand must be a number or a matrix, got {}",
            json_kind(other)
        ))),
    }
}
