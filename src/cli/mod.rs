//! CLI module for classmap

mod args;

pub use args::{Args, Command};

use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::model::Node;
use crate::output::PlantUmlWriter;
use crate::scan::Scanner;
use crate::walk::{ModuleDesc, Walker};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Run the CLI application
pub fn run() -> ExitCode {
    let args = Args::parse_args();
    init_logging(args.log_level.as_deref(), args.log_file.as_deref());

    match execute(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Install the tracing subscriber, optionally writing to a log file
fn init_logging(level: Option<&str>, file: Option<&Path>) {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn")),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match file.and_then(|path| std::fs::File::create(path).ok()) {
        Some(file) => {
            let _ = builder.with_writer(Arc::new(file)).with_ansi(false).try_init();
        }
        None => {
            let _ = builder.with_writer(std::io::stderr).try_init();
        }
    }
}

fn execute(args: Args) -> Result<()> {
    match args.command {
        Command::Scan {
            path,
            output,
            exclude,
            config,
            format,
            verbose,
        } => {
            let mut cfg = load_config(config.as_deref());
            cfg.merge_cli(Some(output), exclude, Some(format), None, false);
            cfg.validate()?;

            if verbose {
                println!("Scanning: {}", path.display());
                println!("Output: {}", cfg.output.path.display());
                println!("Format: {:?}", cfg.output.format);
                println!("Exclude: {:?}", cfg.scan.exclude);
            }

            if !path.exists() {
                return Err(crate::error::Error::PathNotFound(path));
            }

            let scanner = Scanner::new(&cfg)?;

            let counts = scanner.file_counts(&path)?;
            println!(
                "Found {} source files ({} other entries)",
                counts.source, counts.misc
            );

            let package = scanner.scan(&path)?;
            let root = Node::Package(package);

            write_output(&cfg, &root, &[])?;
            Ok(())
        }

        Command::Map {
            descriptor,
            output,
            access_level,
            dependencies,
            config,
            format,
            verbose,
        } => {
            let mut cfg = load_config(config.as_deref());
            cfg.merge_cli(
                Some(output),
                Vec::new(),
                Some(format),
                Some(access_level),
                dependencies,
            );
            cfg.validate()?;

            if verbose {
                println!("Descriptor: {}", descriptor.display());
                println!("Output: {}", cfg.output.path.display());
                println!("Access level: {}", cfg.map.access_level);
                println!("Dependencies: {}", cfg.map.dependencies);
            }

            if !descriptor.exists() {
                return Err(crate::error::Error::PathNotFound(descriptor));
            }

            let table = ModuleDesc::from_json_file(&descriptor)?;
            let result = Walker::new()
                .with_access_level(cfg.map.access_level)
                .walk(&table);

            if !result.dependencies.is_empty() {
                println!("Recorded {} dependency pairs", result.dependencies.len());
            }

            write_output(&cfg, &result.root, &result.dependencies)?;
            Ok(())
        }

        Command::Version => {
            println!("classmap {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Config {
    match path {
        Some(path) => Config::load_or_default(path),
        None => Config::load_or_default(Path::new("classmap.toml")),
    }
}

/// Write the tree in the configured format
fn write_output(cfg: &Config, root: &Node, dependencies: &[(String, String)]) -> Result<()> {
    match cfg.output.format {
        OutputFormat::Puml => {
            let writer = PlantUmlWriter::new().with_dependencies(cfg.map.dependencies);
            writer.write_file(root, dependencies, &cfg.output.path)?;
            println!("Diagram written to: {}", cfg.output.path.display());
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(root)?;
            create_parent_dir(&cfg.output.path)?;
            std::fs::write(&cfg.output.path, json)?;
            println!("JSON written to: {}", cfg.output.path.display());
        }
    }
    Ok(())
}

fn create_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
