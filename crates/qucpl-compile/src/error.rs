//! Error types for QuCPL compilation.

use qucpl_ir::QubitId;
use thiserror::Error;

/// Errors that can occur while compiling a program.
///
/// Every variant is raised before any instruction reaches the interpreter;
/// a program that compiles is well-formed by construction.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// Reference to a qubit or classical register that was never declared.
    #[error("Undefined symbol '{name}' in {context}")]
    UndefinedSymbol {
        /// The offending identifier.
        name: String,
        /// Where the reference occurred (gate name or statement kind).
        context: String,
    },

    /// Wrong number of operands for a gate or measurement.
    #[error("{context} expects {expected} operands, got {got}")]
    ArityMismatch {
        /// The gate or statement the operands belong to.
        context: String,
        /// Expected operand count.
        expected: usize,
        /// Actual operand count.
        got: usize,
    },

    /// Statement kind the compiler does not understand.
    #[error("Unsupported statement kind: {0}")]
    UnsupportedStatement(String),

    /// Unknown gate name.
    #[error("Unknown gate: {0}")]
    InvalidGate(String),

    /// The same qubit fills two distinct operand roles of one gate.
    #[error("Duplicate target {qubit} in gate '{gate}'")]
    DuplicateTarget {
        /// Name of the gate.
        gate: String,
        /// The repeated qubit.
        qubit: QubitId,
    },

    /// AST node is structurally malformed (missing or mistyped field).
    #[error("Malformed AST node: {0}")]
    MalformedAst(String),

    /// The AST document is not valid JSON at all.
    #[error("Invalid AST document: {0}")]
    Document(#[from] serde_json::Error),
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
