//! distforge - multi-platform release packaging pipeline.
//!
//! This binary drives an external toolchain across a fixed OS/arch matrix,
//! stages the resulting binaries with shared documentation and example
//! assets, and emits one compressed archive per platform.

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match distforge::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            2
        }
    };

    process::exit(exit_code);
}
