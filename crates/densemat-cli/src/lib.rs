//! Library half of the `densemat` command-line tool: config and input loading,
//! JSON operand conversion, and evaluation of a single operation.
pub mod eval;
pub mod input;
