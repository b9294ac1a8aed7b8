//! Program instructions combining operations with operands.

use serde::{Deserialize, Serialize};

use crate::gate::Gate;
use crate::register::{ClbitId, QubitId};

/// The kind of instruction in a lowered program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// A quantum gate operation.
    Gate(Gate),
    /// Measurement into classical registers.
    Measure,
    /// Barrier (scheduling/documentation marker, no numerical effect).
    Barrier,
    /// Report the current values of classical registers.
    Print,
    /// Standalone decimal→binary basis-state preparation demonstration.
    ///
    /// Only valid as the first instruction of a program; the interpreter
    /// bypasses everything else when it is present.
    Convert {
        /// The decimal value to encode as a basis state.
        value: u64,
    },
    /// Classically-conditioned branch.
    Conditional {
        /// The classical register the equality test reads.
        clbit: ClbitId,
        /// The literal the register is compared against.
        value: i64,
        /// Instructions executed when the test holds.
        then_block: Vec<Instruction>,
        /// Instructions executed otherwise. Absent means skip.
        else_block: Option<Vec<Instruction>>,
    },
}

/// A complete instruction with operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Qubits this instruction operates on.
    pub qubits: Vec<QubitId>,
    /// Classical registers this instruction reads or writes.
    pub clbits: Vec<ClbitId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(gate: Gate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate),
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Create a measurement instruction.
    ///
    /// Qubits and classical registers pair positionally; the lists must have
    /// equal length, which lowering guarantees.
    pub fn measure(
        qubits: impl IntoIterator<Item = QubitId>,
        clbits: impl IntoIterator<Item = ClbitId>,
    ) -> Self {
        Self {
            kind: InstructionKind::Measure,
            qubits: qubits.into_iter().collect(),
            clbits: clbits.into_iter().collect(),
        }
    }

    /// Create a barrier instruction.
    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Barrier,
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Create a print instruction.
    pub fn print(clbits: impl IntoIterator<Item = ClbitId>) -> Self {
        Self {
            kind: InstructionKind::Print,
            qubits: vec![],
            clbits: clbits.into_iter().collect(),
        }
    }

    /// Create a convert instruction.
    pub fn convert(value: u64) -> Self {
        Self {
            kind: InstructionKind::Convert { value },
            qubits: vec![],
            clbits: vec![],
        }
    }

    /// Create a conditional instruction.
    pub fn conditional(
        clbit: ClbitId,
        value: i64,
        then_block: Vec<Instruction>,
        else_block: Option<Vec<Instruction>>,
    ) -> Self {
        Self {
            kind: InstructionKind::Conditional {
                clbit,
                value,
                then_block,
                else_block,
            },
            qubits: vec![],
            clbits: vec![clbit],
        }
    }

    /// Check if this is a gate instruction.
    pub fn is_gate(&self) -> bool {
        matches!(self.kind, InstructionKind::Gate(_))
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self.kind, InstructionKind::Measure)
    }

    /// Check if this is a barrier.
    pub fn is_barrier(&self) -> bool {
        matches!(self.kind, InstructionKind::Barrier)
    }

    /// Check if this is a conditional.
    pub fn is_conditional(&self) -> bool {
        matches!(self.kind, InstructionKind::Conditional { .. })
    }

    /// Get the gate if this is a gate instruction.
    pub fn as_gate(&self) -> Option<Gate> {
        match self.kind {
            InstructionKind::Gate(g) => Some(g),
            _ => None,
        }
    }

    /// Get the name of the instruction.
    pub fn name(&self) -> &str {
        match &self.kind {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Measure => "measure",
            InstructionKind::Barrier => "barrier",
            InstructionKind::Print => "print",
            InstructionKind::Convert { .. } => "convert",
            InstructionKind::Conditional { .. } => "if",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_instruction() {
        let inst = Instruction::gate(Gate::H, [QubitId(0)]);
        assert!(inst.is_gate());
        assert_eq!(inst.qubits.len(), 1);
        assert_eq!(inst.name(), "h");
    }

    #[test]
    fn test_measure_instruction() {
        let inst = Instruction::measure([QubitId(0), QubitId(1)], [ClbitId(0), ClbitId(1)]);
        assert!(inst.is_measure());
        assert_eq!(inst.qubits.len(), 2);
        assert_eq!(inst.clbits.len(), 2);
    }

    #[test]
    fn test_conditional_instruction() {
        let then_block = vec![Instruction::gate(Gate::X, [QubitId(2)])];
        let inst = Instruction::conditional(ClbitId(0), 1, then_block, None);
        assert!(inst.is_conditional());
        assert_eq!(inst.clbits, vec![ClbitId(0)]);
        assert_eq!(inst.name(), "if");
        match &inst.kind {
            InstructionKind::Conditional {
                value, else_block, ..
            } => {
                assert_eq!(*value, 1);
                assert!(else_block.is_none());
            }
            _ => panic!("Expected Conditional"),
        }
    }

    #[test]
    fn test_serde_roundtrip() {
        let inst = Instruction::conditional(
            ClbitId(1),
            0,
            vec![Instruction::gate(Gate::Z, [QubitId(0)])],
            Some(vec![Instruction::barrier([QubitId(0), QubitId(1)])]),
        );
        let json = serde_json::to_string(&inst).unwrap();
        let back: Instruction = serde_json::from_str(&json).unwrap();
        assert_eq!(inst, back);
    }
}
