//! QuCPL Front-End
//!
//! This crate turns the AST an external parser produces into the executable
//! instruction-set representation of [`qucpl_ir`]. It owns the whole
//! compile-time surface: AST decoding, register allocation, lowering, and
//! every compile-time error kind.
//!
//! # Pipeline
//!
//! 1. [`ast::Program::from_json`] decodes the parser's JSON document.
//! 2. Register allocation assigns dense indices to qubit and classical
//!    register names in order of first appearance.
//! 3. [`lower`] flattens argument lists, resolves names to indices,
//!    validates gate arities and operand distinctness, and emits the
//!    instruction list (conditionals keep their nested blocks).
//!
//! A program that compiles is well-formed: the interpreter never re-checks
//! indices or arities.
//!
//! # Example
//!
//! ```rust
//! use qucpl_compile::compile_json;
//!
//! let source = r#"{
//!     "type": "Program",
//!     "body": [
//!         {"type": "QubitDecl", "qubits": ["q0", "q1"]},
//!         {"type": "QuantumOp", "gate": "h", "qubits": ["q0"]},
//!         {"type": "QuantumOp", "gate": "cx", "qubits": ["q0", "q1"]},
//!         {"type": "Measure", "qubits": ["q0", "q1"], "classical": ["c0", "c1"]}
//!     ]
//! }"#;
//!
//! let program = compile_json(source).unwrap();
//! assert_eq!(program.num_qubits, 2);
//! assert_eq!(program.instructions.len(), 3);
//! ```

mod allocator;
pub mod ast;
pub mod error;
mod lowering;

pub use error::{CompileError, CompileResult};
pub use lowering::lower;

/// Compile an AST document (JSON text) to an executable program.
pub fn compile_json(source: &str) -> CompileResult<qucpl_ir::Program> {
    let program = ast::Program::from_json(source)?;
    lower(&program)
}
