//! IR program interpreter.
//!
//! A recursive block executor over the lowered instruction list, threading
//! one amplitude vector and one classical-register array through sequential
//! and conditional execution. Classical registers are shared mutable state
//! across the whole run: a conditional reads them as they stand at
//! evaluation time, including writes from measurements earlier in the same
//! block.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

use qucpl_ir::{Instruction, InstructionKind, Program};

use crate::error::{SimError, SimResult};
use crate::statevector::Statevector;

/// The observable result of one program execution.
#[derive(Debug, Clone)]
pub struct Execution {
    /// Final classical-register values, index order.
    pub registers: Vec<i64>,
    /// The final amplitude vector.
    pub state: Statevector,
    /// Register values captured by each print instruction, in program order.
    pub prints: Vec<Vec<i64>>,
    /// Present when the program was a convert demonstration.
    pub convert: Option<ConvertReport>,
}

/// Report for a decimal→binary conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertReport {
    /// The decimal input.
    pub value: u64,
    /// Its binary expansion, as prepared on the qubits.
    pub binary: String,
}

/// Executes lowered programs against a statevector.
///
/// One interpreter drives one run to completion, single-threaded and in
/// strict program order. The interpreter assumes a well-formed program:
/// the compiler has already validated every index and arity.
pub struct Interpreter<R: Rng> {
    rng: R,
}

impl Interpreter<StdRng> {
    /// Create an interpreter seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an interpreter with a fixed seed, for replayable runs.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for Interpreter<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Interpreter<R> {
    /// Create an interpreter over a caller-supplied random source.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Execute a program to completion.
    #[instrument(skip(self, program))]
    pub fn run(&mut self, program: &Program) -> SimResult<Execution> {
        // A convert at the head bypasses every other instruction.
        if let Some(first) = program.instructions.first() {
            if let InstructionKind::Convert { value } = first.kind {
                debug!(value, "convert program, preparing basis state");
                return Ok(convert_execution(value));
            }
        }

        let mut execution = Execution {
            registers: vec![0; program.num_clbits],
            state: Statevector::new(program.num_qubits),
            prints: vec![],
            convert: None,
        };
        self.run_block(&program.instructions, &mut execution)?;
        debug!(registers = ?execution.registers, "program complete");
        Ok(execution)
    }

    fn run_block(&mut self, block: &[Instruction], execution: &mut Execution) -> SimResult<()> {
        for inst in block {
            match &inst.kind {
                InstructionKind::Gate(gate) => {
                    let qubits: Vec<usize> = inst.qubits.iter().map(|q| q.index()).collect();
                    execution.state.apply_gate(*gate, &qubits);
                    debug!(gate = gate.name(), ?qubits, "applied gate");
                }

                InstructionKind::Measure => {
                    let qubits: Vec<usize> = inst.qubits.iter().map(|q| q.index()).collect();
                    let outcome = execution.state.measure_collapse(&qubits, &mut self.rng)?;
                    for (clbit, &bit) in inst.clbits.iter().zip(&outcome) {
                        execution.registers[clbit.index()] = i64::from(bit);
                    }
                    debug!(?qubits, ?outcome, "measured and collapsed");
                }

                // No numerical effect; unitary composition is already
                // sequential in a statevector simulation.
                InstructionKind::Barrier => {
                    debug!(qubits = ?inst.qubits, "barrier");
                }

                InstructionKind::Print => {
                    let values: Vec<i64> = inst
                        .clbits
                        .iter()
                        .map(|c| execution.registers[c.index()])
                        .collect();
                    execution.prints.push(values);
                }

                InstructionKind::Convert { .. } => {
                    // Lowering only emits convert at the program head, which
                    // run() consumed before entering any block.
                    return Err(SimError::InvariantViolation(
                        "convert instruction inside an instruction block".into(),
                    ));
                }

                InstructionKind::Conditional {
                    clbit,
                    value,
                    then_block,
                    else_block,
                } => {
                    let taken = execution.registers[clbit.index()] == *value;
                    debug!(clbit = %clbit, expected = *value, taken, "conditional");
                    if taken {
                        self.run_block(then_block, execution)?;
                    } else if let Some(else_block) = else_block {
                        self.run_block(else_block, execution)?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Prepare the basis state encoding `value` in binary.
fn convert_execution(value: u64) -> Execution {
    let width = (64 - value.leading_zeros()).max(1) as usize;
    Execution {
        registers: vec![],
        state: Statevector::basis(width, value as usize),
        prints: vec![],
        convert: Some(ConvertReport {
            value,
            binary: format!("{value:b}"),
        }),
    }
}
