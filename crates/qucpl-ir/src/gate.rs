//! The fixed quantum gate vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gates the QuCPL language can express.
///
/// The vocabulary is fixed: single-qubit Paulis and Hadamard, the
/// singly-controlled Paulis, Toffoli, and SWAP. There are no parameterized
/// rotations and no user-defined gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gate {
    /// Hadamard gate.
    H,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Y gate.
    CY,
    /// Controlled-Z gate.
    CZ,
    /// Toffoli (CCNOT) gate.
    CCX,
    /// SWAP gate.
    Swap,
}

impl Gate {
    /// Resolve a source-language gate name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "h" => Some(Gate::H),
            "x" => Some(Gate::X),
            "y" => Some(Gate::Y),
            "z" => Some(Gate::Z),
            "cx" => Some(Gate::CX),
            "cy" => Some(Gate::CY),
            "cz" => Some(Gate::CZ),
            "ccx" => Some(Gate::CCX),
            "swap" => Some(Gate::Swap),
            _ => None,
        }
    }

    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Gate::H => "h",
            Gate::X => "x",
            Gate::Y => "y",
            Gate::Z => "z",
            Gate::CX => "cx",
            Gate::CY => "cy",
            Gate::CZ => "cz",
            Gate::CCX => "ccx",
            Gate::Swap => "swap",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        match self {
            Gate::H | Gate::X | Gate::Y | Gate::Z => 1,
            Gate::CX | Gate::CY | Gate::CZ | Gate::Swap => 2,
            Gate::CCX => 3,
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
