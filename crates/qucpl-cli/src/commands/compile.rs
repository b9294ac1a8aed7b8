//! Compile command implementation.

use anyhow::{Context, Result};
use console::style;
use std::fs;
use std::path::Path;

use qucpl_compile::compile_json;

/// Execute the compile command.
pub fn execute(input: &str, output: Option<&str>) -> Result<()> {
    println!(
        "{} Compiling {}",
        style("→").cyan().bold(),
        style(input).green()
    );

    let path = Path::new(input);
    if !path.exists() {
        anyhow::bail!("File not found: {input}");
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {input}"))?;
    let program = compile_json(&source)?;

    println!("{} Compilation complete", style("✓").green().bold());
    println!(
        "  Result: {} qubits, {} classical registers, {} instructions",
        program.num_qubits,
        program.num_clbits,
        program.instructions.len()
    );

    let output_path = match output {
        Some(path) => path.to_owned(),
        None => {
            // Default: replace the extension with .ir.json
            let stem = path.file_stem().unwrap_or_default().to_string_lossy();
            format!("{stem}.ir.json")
        }
    };

    let document = serde_json::to_string_pretty(&program)?;
    fs::write(&output_path, document)
        .with_context(|| format!("Failed to write file: {output_path}"))?;
    println!("  Output: {}", style(output_path.as_str()).green());

    Ok(())
}
