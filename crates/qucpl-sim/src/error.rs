//! Error types for the simulation crate.

use thiserror::Error;

/// Errors that can occur while executing a well-formed program.
///
/// Compile-time validation means the interpreter never sees bad indices or
/// arities; the only failure class left at runtime is a broken numerical
/// invariant, which is fatal.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// A numerical invariant of the simulation was violated.
    #[error("Simulation invariant violated: {0}")]
    InvariantViolation(String),
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
