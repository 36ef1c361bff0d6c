//! Release packaging pipeline.
//!
//! The pipeline runs in two phases over a fixed target matrix:
//!
//! 1. **Build** - [`builder`] invokes the external toolchain once per
//!    target with an isolated environment overlay, [`assets`] stages the
//!    documentation and example files shared by every platform, and
//!    [`scripts`] emits the per-OS run wrappers.
//! 2. **Package** - [`group`] buckets the produced binaries under a
//!    normalized platform key and [`archive`] writes one compressed
//!    archive per platform containing its binaries plus the common assets.
//!
//! Each phase returns a typed report ([`report`]) so callers can assert on
//! per-target and per-platform outcomes instead of scraping console output.

pub mod archive;
pub mod assets;
pub mod builder;
pub mod error;
pub mod group;
pub mod report;
pub mod scripts;
pub mod settings;

// Re-export the types that make up the pipeline's surface
pub use assets::CommonAsset;
pub use error::{Error, Result};
pub use group::PlatformKey;
pub use report::{
    ArchiveOutcome, AssetReport, BuildOutcome, BuildReport, PackageReport, PipelineReport,
};
pub use settings::{Arch, Settings, SettingsBuilder, Target, TargetOs, ToolchainSettings};
