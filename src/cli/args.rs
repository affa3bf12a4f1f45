//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Generate PlantUML class diagrams from codebases
#[derive(Parser, Debug)]
#[command(name = "classmap")]
#[command(about = "Generate PlantUML class diagrams from codebases")]
#[command(version)]
pub struct Args {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Write logs to a file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan a source directory and emit a class diagram
    Scan {
        /// Directory to scan
        path: PathBuf,

        /// Output file path
        #[arg(short, long, default_value = "/tmp/class_diagram.puml")]
        output: PathBuf,

        /// Glob patterns to exclude (can be repeated)
        #[arg(long)]
        exclude: Vec<String>,

        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format (puml, json)
        #[arg(long, default_value = "puml")]
        format: String,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Walk a module descriptor table and emit a class diagram
    Map {
        /// Descriptor table (JSON)
        descriptor: PathBuf,

        /// Output file path
        #[arg(short, long, default_value = "/tmp/class_diagram.puml")]
        output: PathBuf,

        /// Access level: 0 = public, 1 = +protected, 2 = +private
        #[arg(short, long, default_value = "0")]
        access_level: u8,

        /// Include dependency edges in the diagram
        #[arg(long)]
        dependencies: bool,

        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format (puml, json)
        #[arg(long, default_value = "puml")]
        format: String,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show version information
    Version,
}
