//! Command line argument parsing and validation.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Multi-platform release packaging pipeline
#[derive(Parser, Debug)]
#[command(
    name = "distforge",
    version,
    about = "Multi-platform release packaging pipeline",
    long_about = "Builds one source target for a matrix of OS/architecture pairs via an \
external toolchain, stages shared documentation and example assets, and packs one \
compressed archive per platform.

Usage:
  distforge dist --name app --entry ./cmd/app --toolchain go
  distforge build --config release.toml
  distforge package --name app --dist-dir dist --package-dir packages

Exit code 0 = every target built and every platform packaged; 1 = a target or
platform failed (remaining work still ran); 2 = configuration or setup error."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to a TOML configuration file (default: ./distforge.toml when present)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Product base name; the leading token of every artifact filename
    #[arg(short, long, global = true, value_name = "NAME")]
    pub name: Option<String>,

    /// Source entry point handed to the toolchain
    #[arg(short, long, global = true, value_name = "PATH")]
    pub entry: Option<PathBuf>,

    /// Toolchain program invoked once per target
    #[arg(short, long, global = true, value_name = "PROGRAM")]
    pub toolchain: Option<String>,

    /// Distribution root directory
    #[arg(long, global = true, value_name = "DIR")]
    pub dist_dir: Option<PathBuf>,

    /// Package directory receiving the archives
    #[arg(long, global = true, value_name = "DIR")]
    pub package_dir: Option<PathBuf>,

    /// Per-target build timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub build_timeout: Option<u64>,

    /// Write the pipeline report as JSON to this path
    #[arg(long, global = true, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Print per-step detail
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Pipeline phases runnable from the command line
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Build the platform matrix and stage common assets and run scripts
    Build,
    /// Group staged artifacts by platform and create the archives
    Package,
    /// Build, then package the fresh outcomes in one run
    Dist,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name {
            if name.is_empty() {
                return Err("--name cannot be empty".to_string());
            }
            if name.contains('_') || name.contains('/') {
                return Err(format!(
                    "--name `{name}` may not contain `_` or `/`: the underscore \
                     delimits platform tokens in artifact filenames"
                ));
            }
        }
        if self.build_timeout == Some(0) {
            return Err("--build-timeout must be at least 1 second".to_string());
        }
        Ok(())
    }
}
