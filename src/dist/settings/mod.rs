//! Configuration structures for pipeline operations.
//!
//! This module provides the settings types threaded through every phase of
//! the pipeline: the target matrix, the external toolchain description, and
//! the directory/asset layout, plus a builder for constructing them.

mod builder;
mod core;
mod target;
mod toolchain;

// Re-export all public types
pub use builder::SettingsBuilder;
pub use core::Settings;
pub use target::{Arch, Target, TargetOs};
pub use toolchain::{ToolchainSettings, DEFAULT_ARCH_VAR, DEFAULT_OS_VAR};
