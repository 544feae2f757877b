//! Command-line surface.

use clap::{Parser, Subcommand};
use medquad_common::OutputFormat;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "medquad", version, about = "DF-QuAD strength evaluation for biomedical claim graphs")]
pub struct Cli {
    /// Configuration file (TOML, YAML or JSON); defaults to $MEDQUAD_CONFIG or ./medquad.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Report format, overrides [output] format
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// Overrides [evaluation] max_iterations
    #[arg(long, global = true)]
    pub max_iterations: Option<usize>,

    /// Overrides [evaluation] epsilon
    #[arg(long, global = true)]
    pub epsilon: Option<f64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate relation payloads produced by the reasoning service
    Relations {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Evaluate argument graphs given as YAML or JSON lists of arguments
    Graph {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Validate inputs without evaluating them
    Check {
        /// Treat the files as argument graphs instead of relation payloads
        #[arg(long)]
        graph: bool,

        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}
