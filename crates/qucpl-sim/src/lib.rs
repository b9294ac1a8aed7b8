//! QuCPL Statevector Simulator
//!
//! This crate executes lowered QuCPL programs directly through linear
//! algebra on a dense amplitude vector — no external quantum SDK is
//! involved in gate application, measurement, or control flow.
//!
//! # Components
//!
//! - [`Statevector`]: the 2^n-dimensional amplitude vector with gate,
//!   measurement-collapse, and probability primitives over plain indices
//! - [`Interpreter`]: walks a lowered [`qucpl_ir::Program`], threading the
//!   amplitude vector and the classical-register array through sequential
//!   and conditional execution, including mid-circuit collapse
//! - [`sample_histogram`]: non-destructive Born-rule sampling for final
//!   reporting, with outcome counts in [`Counts`]
//!
//! Mid-circuit measurement ([`Statevector::measure_collapse`]) and
//! histogram sampling are distinct, deliberately separate operations:
//! collapse always mutates the state and feeds classical registers;
//! sampling never alters anything.
//!
//! # Memory
//!
//! The amplitude vector has 2^n entries of 16 bytes:
//!
//! | Qubits | Memory | Simulation speed |
//! |--------|--------|------------------|
//! | 10 | ~16 KB | Instant |
//! | 15 | ~512 KB | Fast |
//! | 20 | ~16 MB | Moderate |
//! | 25 | ~512 MB | Slow |
//!
//! # Example
//!
//! ```rust
//! use qucpl_ir::{ClbitId, Gate, Instruction, Program, QubitId};
//! use qucpl_sim::Interpreter;
//!
//! // Bell pair: h q0; cx q0 q1; measure.
//! let mut program = Program::new(2, 2);
//! program.instructions = vec![
//!     Instruction::gate(Gate::H, [QubitId(0)]),
//!     Instruction::gate(Gate::CX, [QubitId(0), QubitId(1)]),
//!     Instruction::measure([QubitId(0), QubitId(1)], [ClbitId(0), ClbitId(1)]),
//! ];
//!
//! let mut interpreter = Interpreter::from_seed(7);
//! let execution = interpreter.run(&program).unwrap();
//!
//! // Perfect correlation, whatever the draw.
//! assert_eq!(execution.registers[0], execution.registers[1]);
//! ```

pub mod error;
pub mod interpreter;
pub mod sampler;
pub mod statevector;

pub use error::{SimError, SimResult};
pub use interpreter::{ConvertReport, Execution, Interpreter};
pub use sampler::{Counts, sample_histogram};
pub use statevector::{REPORT_TOLERANCE, Statevector};
