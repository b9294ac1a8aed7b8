//! Run command implementation.

use anyhow::{Context, Result};
use console::style;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs;
use std::path::Path;

use qucpl_compile::{ast, lower};
use qucpl_ir::Program;
use qucpl_sim::{Execution, Interpreter, sample_histogram};

/// Execute the run command.
pub fn execute(input: &str, shots: u32, seed: Option<u64>) -> Result<()> {
    println!(
        "{} Running {}",
        style("→").cyan().bold(),
        style(input).green()
    );

    let program = load_program(input)?;
    println!(
        "  Loaded: {} qubits, {} classical registers, {} instructions",
        program.num_qubits,
        program.num_clbits,
        program.instructions.len()
    );

    let mut interpreter = match seed {
        Some(seed) => Interpreter::from_seed(seed),
        None => Interpreter::new(),
    };
    let execution = interpreter.run(&program)?;

    if let Some(report) = &execution.convert {
        println!(
            "{} Convert: decimal {} → binary {}",
            style("✓").green().bold(),
            report.value,
            style(&report.binary).yellow()
        );
        print_state(&execution);
        return Ok(());
    }

    for values in &execution.prints {
        println!("  print → {values:?}");
    }

    println!("{} Execution complete", style("✓").green().bold());
    println!("  Classical registers:");
    for (i, value) in execution.registers.iter().enumerate() {
        println!("    c{i} = {value}");
    }

    print_state(&execution);

    // Histogram over the measured qubits; a program that never measures is
    // sampled over all of its qubits.
    let mut measured: Vec<usize> = program
        .measured_qubits()
        .iter()
        .map(|q| q.index())
        .collect();
    if measured.is_empty() {
        measured = (0..program.num_qubits).collect();
    }
    if !measured.is_empty() {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let counts = sample_histogram(&execution.state, &measured, shots, &mut rng);
        println!("  Histogram ({shots} shots):");
        for (label, count) in counts.sorted() {
            println!("    {label}: {count}");
        }
    }

    Ok(())
}

fn print_state(execution: &Execution) {
    println!("  Non-zero amplitudes:");
    for (label, amp) in execution.state.nonzero_amplitudes() {
        let sign = if amp.im < 0.0 { '-' } else { '+' };
        println!("    |{label}⟩: {:.4} {sign} {:.4}i", amp.re, amp.im.abs());
    }
}

/// Load a program from an AST or IR JSON document.
fn load_program(path: &str) -> Result<Program> {
    let path_obj = Path::new(path);
    if !path_obj.exists() {
        anyhow::bail!("File not found: {path}");
    }

    let source =
        fs::read_to_string(path_obj).with_context(|| format!("Failed to read file: {path}"))?;
    let value: serde_json::Value =
        serde_json::from_str(&source).with_context(|| format!("Invalid JSON in {path}"))?;

    // AST documents carry "type" tags; IR documents are plain serde output.
    if value.get("type").is_some() {
        let tree = ast::Program::from_value(&value)?;
        Ok(lower(&tree)?)
    } else {
        serde_json::from_value(value).with_context(|| format!("Invalid IR document in {path}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const BELL_AST: &str = r#"{
        "type": "Program",
        "body": [
            {"type": "QubitDecl", "qubits": ["q0", "q1"]},
            {"type": "QuantumOp", "gate": "h", "qubits": ["q0"]},
            {"type": "QuantumOp", "gate": "cx", "qubits": ["q0", "q1"]},
            {"type": "Measure", "qubits": ["q0", "q1"], "classical": ["c0", "c1"]}
        ]
    }"#;

    #[test]
    fn test_load_ast_document() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(BELL_AST.as_bytes()).unwrap();

        let program = load_program(file.path().to_str().unwrap()).unwrap();
        assert_eq!(program.num_qubits, 2);
        assert_eq!(program.instructions.len(), 3);
    }

    #[test]
    fn test_load_ir_document() {
        let program = qucpl_compile::compile_json(BELL_AST).unwrap();
        let document = serde_json::to_string_pretty(&program).unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(document.as_bytes()).unwrap();

        let reloaded = load_program(file.path().to_str().unwrap()).unwrap();
        assert_eq!(reloaded, program);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_program("no/such/file.json").is_err());
    }
}
