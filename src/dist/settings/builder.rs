//! Builder for constructing Settings.

use super::{Settings, Target, ToolchainSettings};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default distribution root directory.
pub(super) const DEFAULT_DIST_DIR: &str = "dist";

/// Default package directory.
pub(super) const DEFAULT_PACKAGE_DIR: &str = "packages";

/// Builder for constructing [`Settings`].
///
/// Provides a fluent API for building pipeline settings with validation.
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
///     .dist_dir("dist")
///     .package_dir("packages")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    base_name: Option<String>,
    entry_point: Option<PathBuf>,
    dist_dir: Option<PathBuf>,
    package_dir: Option<PathBuf>,
    doc_files: Option<Vec<PathBuf>>,
    examples_glob: Option<String>,
    toolchain: Option<ToolchainSettings>,
    targets: Option<Vec<Target>>,
    build_timeout: Option<Duration>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the product base name.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn base_name<S: Into<String>>(mut self, name: S) -> Self {
        self.base_name = Some(name.into());
        self
    }

    /// Sets the source entry point handed to the toolchain.
    ///
    /// Required by the build phase; the package phase runs without one.
    pub fn entry_point<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.entry_point = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the distribution root directory.
    ///
    /// Default: `dist`
    pub fn dist_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.dist_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the package directory.
    ///
    /// Default: `packages`
    pub fn package_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.package_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the fixed documentation files bundled into every archive.
    ///
    /// Default: `README.md`, `LICENSE`
    pub fn doc_files(mut self, files: Vec<PathBuf>) -> Self {
        self.doc_files = Some(files);
        self
    }

    /// Sets the glob pattern selecting example files.
    ///
    /// Default: None (no examples collected)
    pub fn examples_glob<S: Into<String>>(mut self, pattern: S) -> Self {
        self.examples_glob = Some(pattern.into());
        self
    }

    /// Sets the external toolchain.
    ///
    /// Required by the build phase; the package phase runs without one.
    pub fn toolchain(mut self, toolchain: ToolchainSettings) -> Self {
        self.toolchain = Some(toolchain);
        self
    }

    /// Sets the targets to build.
    ///
    /// Default: the full fixed matrix ([`Target::matrix`])
    pub fn targets(mut self, targets: Vec<Target>) -> Self {
        self.targets = Some(targets);
        self
    }

    /// Sets a per-target build timeout.
    ///
    /// Default: None (builds run to completion)
    pub fn build_timeout(mut self, timeout: Duration) -> Self {
        self.build_timeout = Some(timeout);
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_name` is missing or empty, or if the
    /// target list contains a duplicate `(os, arch)` pair.
    pub fn build(self) -> crate::dist::Result<Settings> {
        use crate::dist::error::Context;

        let base_name = self.base_name.context("base_name is required")?;
        if base_name.is_empty() {
            return Err(crate::dist::Error::GenericError(
                "base_name must not be empty".to_string(),
            ));
        }

        let targets = self
            .targets
            .unwrap_or_else(|| Target::matrix().to_vec());
        let mut seen = HashSet::new();
        for target in &targets {
            if !seen.insert((target.os, target.arch)) {
                return Err(crate::dist::Error::GenericError(format!(
                    "duplicate target {} in matrix",
                    target
                )));
            }
        }

        Ok(Settings::new(
            base_name,
            self.entry_point,
            self.dist_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DIST_DIR)),
            self.package_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PACKAGE_DIR)),
            self.doc_files
                .unwrap_or_else(|| vec![PathBuf::from("README.md"), PathBuf::from("LICENSE")]),
            self.examples_glob,
            self.toolchain,
            targets,
            self.build_timeout,
        ))
    }
}
