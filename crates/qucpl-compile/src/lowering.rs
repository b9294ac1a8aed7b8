//! AST-to-IR lowering for QuCPL.

use qucpl_ir::{ClbitId, Gate, Instruction, QubitId};

use crate::allocator::{self, Registers};
use crate::ast::{Arg, Program, Statement, flatten};
use crate::error::{CompileError, CompileResult};

/// Lower an AST program to an executable IR program.
///
/// Lowering is a pure function of the AST and the symbol tables: it performs
/// no numerical work and never touches simulation state. Every register
/// reference is resolved and validated here, so the interpreter can assume a
/// well-formed program.
pub fn lower(program: &Program) -> CompileResult<qucpl_ir::Program> {
    let lowerer = Lowerer {
        registers: allocator::allocate(program),
    };
    lowerer.lower(program)
}

/// Lowers AST statements to instructions.
struct Lowerer {
    registers: Registers,
}

impl Lowerer {
    fn lower(&self, program: &Program) -> CompileResult<qucpl_ir::Program> {
        let mut out =
            qucpl_ir::Program::new(self.registers.qubits.len(), self.registers.clbits.len());
        for (position, stmt) in program.body.iter().enumerate() {
            out.instructions
                .extend(self.lower_statement(stmt, position == 0)?);
        }
        Ok(out)
    }

    fn lower_statement(&self, stmt: &Statement, at_head: bool) -> CompileResult<Vec<Instruction>> {
        match stmt {
            // Declarations only populate the symbol tables.
            Statement::QubitDecl { .. } => Ok(vec![]),

            Statement::QuantumOp { gate, qubits } => self.lower_gate(gate, qubits),

            Statement::Measure { qubits, classical } => {
                let qubit_ids = self.resolve_qubits(&flatten(qubits), "measurement")?;
                let clbit_ids = self.resolve_clbits(&flatten(classical), "measurement")?;
                if qubit_ids.len() != clbit_ids.len() {
                    return Err(CompileError::ArityMismatch {
                        context: "measurement".into(),
                        expected: qubit_ids.len(),
                        got: clbit_ids.len(),
                    });
                }
                Ok(vec![Instruction::measure(qubit_ids, clbit_ids)])
            }

            Statement::Barrier { qubits } => {
                let names = flatten(qubits);
                let qubit_ids = if names.is_empty() {
                    // Empty target list means all declared qubits, ascending.
                    (0..self.registers.qubits.len() as u32)
                        .map(QubitId)
                        .collect()
                } else {
                    self.resolve_qubits(&names, "barrier")?
                };
                Ok(vec![Instruction::barrier(qubit_ids)])
            }

            Statement::Print { args } => {
                let clbit_ids = self.resolve_clbits(&flatten(args), "print")?;
                Ok(vec![Instruction::print(clbit_ids)])
            }

            Statement::Convert { value } => {
                if at_head {
                    Ok(vec![Instruction::convert(*value)])
                } else {
                    // Convert bypasses normal execution; it cannot be mixed
                    // into an instruction stream.
                    Err(CompileError::UnsupportedStatement(
                        "Convert (only valid as the first statement)".into(),
                    ))
                }
            }

            Statement::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let clbit = self.resolve_clbit(&condition.var, "if condition")?;
                let then_block = self.lower_block(then_branch)?;
                let else_block = else_branch
                    .as_ref()
                    .map(|block| self.lower_block(block))
                    .transpose()?;
                Ok(vec![Instruction::conditional(
                    clbit,
                    condition.value,
                    then_block,
                    else_block,
                )])
            }
        }
    }

    fn lower_block(&self, block: &[Statement]) -> CompileResult<Vec<Instruction>> {
        let mut out = Vec::new();
        for stmt in block {
            out.extend(self.lower_statement(stmt, false)?);
        }
        Ok(out)
    }

    fn lower_gate(&self, name: &str, args: &[Arg]) -> CompileResult<Vec<Instruction>> {
        let gate =
            Gate::from_name(name).ok_or_else(|| CompileError::InvalidGate(name.to_owned()))?;
        let context = format!("gate '{name}'");
        let qubit_ids = self.resolve_qubits(&flatten(args), &context)?;

        if qubit_ids.len() != gate.num_qubits() {
            return Err(CompileError::ArityMismatch {
                context,
                expected: gate.num_qubits(),
                got: qubit_ids.len(),
            });
        }

        // Control, target, and swap roles must all name distinct qubits.
        for (i, qubit) in qubit_ids.iter().enumerate() {
            if qubit_ids[..i].contains(qubit) {
                return Err(CompileError::DuplicateTarget {
                    gate: name.to_owned(),
                    qubit: *qubit,
                });
            }
        }

        Ok(vec![Instruction::gate(gate, qubit_ids)])
    }

    fn resolve_qubits(&self, names: &[&str], context: &str) -> CompileResult<Vec<QubitId>> {
        names
            .iter()
            .map(|name| {
                self.registers
                    .qubits
                    .get(name)
                    .map(QubitId)
                    .ok_or_else(|| CompileError::UndefinedSymbol {
                        name: (*name).to_owned(),
                        context: context.to_owned(),
                    })
            })
            .collect()
    }

    fn resolve_clbits(&self, names: &[&str], context: &str) -> CompileResult<Vec<ClbitId>> {
        names
            .iter()
            .map(|name| self.resolve_clbit(name, context))
            .collect()
    }

    fn resolve_clbit(&self, name: &str, context: &str) -> CompileResult<ClbitId> {
        self.registers
            .clbits
            .get(name)
            .map(ClbitId)
            .ok_or_else(|| CompileError::UndefinedSymbol {
                name: name.to_owned(),
                context: context.to_owned(),
            })
    }
}
