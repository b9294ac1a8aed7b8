//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - quantum circuit language compiler and simulator",
        style("QuCPL").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qucpl-ir       Instruction-set representation");
    println!("  qucpl-compile  Register allocation and IR lowering");
    println!("  qucpl-sim      Statevector engine and interpreter");
    println!("  qucpl-cli      Command-line interface");
    println!();
    println!(
        "Repository: {}",
        style("https://github.com/qucpl/qucpl").underlined()
    );
    println!("License:    {}", style("Apache-2.0").dim());
}
