//! Core Settings struct and implementations.

use super::{Target, ToolchainSettings};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main settings for pipeline operations.
///
/// Central configuration threaded through every phase, constructed via
/// [`SettingsBuilder`](super::SettingsBuilder). All directory paths are
/// explicit values so the pipeline can run against temporary directories.
///
/// # Examples
///
/// ```no_run
/// use distforge::dist::{SettingsBuilder, ToolchainSettings};
///
/// # fn example() -> distforge::dist::Result<()> {
/// let settings = SettingsBuilder::new()
///     .base_name("app")
///     .entry_point("./cmd/app")
///     .toolchain(ToolchainSettings::new("go")
///         .with_args(vec!["build".into(), "-o".into()])
///         .with_selectors("GOOS", "GOARCH"))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Product base name; the leading token of every artifact filename.
    base_name: String,

    /// Source entry point handed to the toolchain. Only the build phase
    /// needs one.
    entry_point: Option<PathBuf>,

    /// Distribution root receiving binaries, docs, examples, and scripts.
    dist_dir: PathBuf,

    /// Directory receiving the per-platform archives.
    package_dir: PathBuf,

    /// Fixed documentation files bundled into every archive.
    doc_files: Vec<PathBuf>,

    /// Glob pattern selecting example files, if any.
    examples_glob: Option<String>,

    /// External toolchain. Only the build phase needs one.
    toolchain: Option<ToolchainSettings>,

    /// Targets to build, in order.
    targets: Vec<Target>,

    /// Optional per-target build timeout.
    build_timeout: Option<Duration>,
}

impl Settings {
    /// Returns the product base name.
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Returns the source entry point, when configured.
    pub fn entry_point(&self) -> Option<&Path> {
        self.entry_point.as_deref()
    }

    /// Returns the distribution root directory.
    pub fn dist_dir(&self) -> &Path {
        &self.dist_dir
    }

    /// Returns the package directory.
    pub fn package_dir(&self) -> &Path {
        &self.package_dir
    }

    /// Returns the fixed documentation files.
    pub fn doc_files(&self) -> &[PathBuf] {
        &self.doc_files
    }

    /// Returns the example glob pattern, when configured.
    pub fn examples_glob(&self) -> Option<&str> {
        self.examples_glob.as_deref()
    }

    /// Returns the toolchain settings, when configured.
    pub fn toolchain(&self) -> Option<&ToolchainSettings> {
        self.toolchain.as_ref()
    }

    /// Returns the targets to build.
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Returns the per-target build timeout, when configured.
    pub fn build_timeout(&self) -> Option<Duration> {
        self.build_timeout
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        base_name: String,
        entry_point: Option<PathBuf>,
        dist_dir: PathBuf,
        package_dir: PathBuf,
        doc_files: Vec<PathBuf>,
        examples_glob: Option<String>,
        toolchain: Option<ToolchainSettings>,
        targets: Vec<Target>,
        build_timeout: Option<Duration>,
    ) -> Self {
        Self {
            base_name,
            entry_point,
            dist_dir,
            package_dir,
            doc_files,
            examples_glob,
            toolchain,
            targets,
            build_timeout,
        }
    }
}
