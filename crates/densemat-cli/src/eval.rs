//! Evaluation of a single matrix operation and writing of its result.
use std::io::Write;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use densemat::{Axis, Matrix, MatrixError, Operand};

use crate::input::{operand_from_json, EvalConfig, EvalRequest, OutputFormat};

/// Operations understood by `densemat eval`.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    ReverseDivide,
    Power,
    Negate,
    Determinant,
    Minors,
    Cofactors,
    Adjugate,
    Inverse,
    Transpose,
    FlipRow,
    FlipCol,
    Round,
}

impl Operation {
    pub const ALL: [&'static str; 16] = [
        "add",
        "subtract",
        "multiply",
        "divide",
        "reverse_divide",
        "power",
        "negate",
        "determinant",
        "minors",
        "cofactors",
        "adjugate",
        "inverse",
        "transpose",
        "flip_row",
        "flip_col",
        "round",
    ];

    /// Whether the operation reads a right-hand operand.
    pub fn is_binary(&self) -> bool {
        matches!(
            self,
            Operation::Add
                | Operation::Subtract
                | Operation::Multiply
                | Operation::Divide
                | Operation::ReverseDivide
                | Operation::Power
                | Operation::Round
        )
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.to_lowercase()))
            .map_err(|_| format!("Unknown operation: {}. Expected one of: {}", s, Operation::ALL.join(", ")))
    }
}

/// Result of an evaluation: determinants are scalars, everything else is a
/// matrix.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluated {
    Scalar(f64),
    Matrix(Matrix<f64>),
}

fn expect_matrix(operand: Operand<f64>, op: Operation, side: &str) -> Result<Matrix<f64>, MatrixError> {
    match operand {
        Operand::Matrix(m) => Ok(m),
        Operand::Scalar(_) => Err(MatrixError::TypeMismatch(format!(
            "{:?} requires a matrix as its {} operand, got a scalar",
            op, side
        ))),
    }
}

/// Evaluate `op` on already converted operands.
pub fn evaluate(
    op: Operation,
    lhs: Operand<f64>,
    rhs: Option<Operand<f64>>,
    config: &EvalConfig,
) -> Result<Evaluated, MatrixError> {
    let rhs = match (op.is_binary(), rhs) {
        (true, Some(rhs)) => Some(rhs),
        (true, None) => {
            return Err(MatrixError::InvalidArgument(format!(
                "{:?} requires a right-hand operand",
                op
            )))
        }
        (false, Some(_)) => {
            log::warn!("{:?} takes a single operand; ignoring rhs", op);
            None
        }
        (false, None) => None,
    };

    let result = match (op, lhs, rhs) {
        (Operation::Add, lhs, Some(rhs)) => {
            let (a, b) = (expect_matrix(lhs, op, "left")?, expect_matrix(rhs, op, "right")?);
            Evaluated::Matrix(a.checked_add(&b)?)
        }
        (Operation::Subtract, lhs, Some(rhs)) => {
            let (a, b) = (expect_matrix(lhs, op, "left")?, expect_matrix(rhs, op, "right")?);
            Evaluated::Matrix(a.checked_sub(&b)?)
        }
        // scalar * matrix commutes
        (Operation::Multiply, Operand::Scalar(k), Some(Operand::Matrix(m))) => {
            Evaluated::Matrix(m.scale(k))
        }
        (Operation::Multiply, lhs, Some(rhs)) => {
            Evaluated::Matrix(expect_matrix(lhs, op, "left")?.multiply(&rhs)?)
        }
        // k / M == M^-1 * k
        (Operation::Divide, Operand::Scalar(k), Some(Operand::Matrix(m))) => {
            Evaluated::Matrix(m.reverse_divide(&Operand::Scalar(k))?)
        }
        (Operation::Divide, lhs, Some(rhs)) => {
            Evaluated::Matrix(expect_matrix(lhs, op, "left")?.divide(&rhs)?)
        }
        (Operation::ReverseDivide, lhs, Some(rhs)) => {
            Evaluated::Matrix(expect_matrix(lhs, op, "left")?.reverse_divide(&rhs)?)
        }
        (Operation::Power, lhs, Some(rhs)) => {
            Evaluated::Matrix(expect_matrix(lhs, op, "left")?.power(&rhs)?)
        }
        (Operation::Round, lhs, Some(rhs)) => {
            let digits = match rhs {
                Operand::Scalar(d) if d.fract() == 0.0 => d as i32,
                other => {
                    return Err(MatrixError::TypeMismatch(format!(
                        "round takes an integer number of digits, got a {}",
                        other.kind()
                    )))
                }
            };
            Evaluated::Matrix(expect_matrix(lhs, op, "left")?.round_with(digits, config.rounding))
        }
        (op, lhs, _) => {
            let m = expect_matrix(lhs, op, "left")?;
            match op {
                Operation::Negate => Evaluated::Matrix(m.negate()),
                Operation::Determinant => Evaluated::Scalar(m.determinant()?),
                Operation::Minors => Evaluated::Matrix(m.minors()?),
                Operation::Cofactors => Evaluated::Matrix(m.cofactors()?),
                Operation::Adjugate => Evaluated::Matrix(m.adjugate()?),
                Operation::Inverse => Evaluated::Matrix(m.inverse()?),
                Operation::Transpose => Evaluated::Matrix(m.transposed()),
                Operation::FlipRow => Evaluated::Matrix(m.flipped(Axis::Row)),
                Operation::FlipCol => Evaluated::Matrix(m.flipped(Axis::Col)),
                binary => {
                    return Err(MatrixError::InvalidArgument(format!(
                        "{:?} requires a right-hand operand",
                        binary
                    )))
                }
            }
        }
    };

    Ok(match (config.round_digits, result) {
        (Some(digits), Evaluated::Matrix(m)) => {
            Evaluated::Matrix(m.round_with(digits, config.rounding))
        }
        (Some(digits), Evaluated::Scalar(v)) => {
            let single = Matrix::from_shape_vec((1, 1), vec![v])?;
            Evaluated::Scalar(single.round_with(digits, config.rounding).to_vec()[0])
        }
        (None, result) => result,
    })
}

/// Convert the operands of `request` and evaluate it.
pub fn run_request(request: &EvalRequest, config: &EvalConfig) -> Result<Evaluated> {
    let lhs = operand_from_json(&request.lhs).context("Invalid left-hand operand")?;
    let rhs = request
        .rhs
        .as_ref()
        .map(operand_from_json)
        .transpose()
        .context("Invalid right-hand operand")?;
    log::info!(
        "[densemat::eval] {:?} on {} operand(s)",
        request.op,
        if rhs.is_some() { 2 } else { 1 }
    );
    let result = evaluate(request.op, lhs, rhs, config)
        .with_context(|| format!("Failed to evaluate {:?}", request.op))?;
    Ok(result)
}

/// Write `result` to `sink` in the configured output format.
pub fn write_result<W: Write>(sink: &mut W, result: &Evaluated, config: &EvalConfig) -> Result<()> {
    match (config.output, result) {
        (OutputFormat::Text, Evaluated::Matrix(m)) => m.write_with(sink, &config.format)?,
        (OutputFormat::Text, Evaluated::Scalar(v)) => match config.format.precision {
            Some(p) => writeln!(sink, "{:.*}", p, v)?,
            None => writeln!(sink, "{}", v)?,
        },
        (OutputFormat::Json, Evaluated::Matrix(m)) => {
            serde_json::to_writer(&mut *sink, &m.to_nested())?;
            writeln!(sink)?;
        }
        (OutputFormat::Json, Evaluated::Scalar(v)) => {
            serde_json::to_writer(&mut *sink, v)?;
            writeln!(sink)?;
        }
    }
    Ok(())
}
