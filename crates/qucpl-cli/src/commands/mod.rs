//! CLI subcommand implementations.

pub mod compile;
pub mod run;
pub mod version;
