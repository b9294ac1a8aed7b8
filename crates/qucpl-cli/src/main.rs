//! QuCPL Command-Line Interface
//!
//! The main entry point for the `qucpl` tool: compile a program's AST
//! document to IR, or execute it on the statevector simulator.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{compile, run, version};

/// QuCPL - quantum circuit language compiler and statevector simulator
#[derive(Parser)]
#[command(name = "qucpl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a program's AST document to IR
    Compile {
        /// Input file (AST JSON)
        #[arg(short, long)]
        input: String,

        /// Output file (defaults to <input stem>.ir.json)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Execute a program and report its results
    Run {
        /// Input file (AST or IR JSON)
        #[arg(short, long)]
        input: String,

        /// Number of shots for the outcome histogram
        #[arg(short, long, default_value = "1024")]
        shots: u32,

        /// Seed for reproducible measurement outcomes
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Compile { input, output } => compile::execute(&input, output.as_deref()),

        Commands::Run { input, shots, seed } => run::execute(&input, shots, seed),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
