//! Typed outcome reports for every pipeline phase.
//!
//! Per-target and per-platform failures never abort a phase, so each phase
//! returns a report accumulating successes and failures together. Callers
//! decide how overall exit status reflects partial failure. All reports
//! serialize to JSON for persistence.

use crate::dist::assets::CommonAsset;
use crate::dist::group::PlatformKey;
use crate::dist::settings::Target;
use std::path::PathBuf;

/// Result of building one target.
///
/// Created once by the matrix builder and never mutated afterwards. The
/// originating [`Target`] is carried alongside the output path so grouping
/// does not have to re-derive platform identity from the filename.
#[derive(Debug, Clone, serde::Serialize)]
pub struct BuildOutcome {
    /// The target this outcome belongs to
    pub target: Target,
    /// Where the binary was (or would have been) written
    pub output_path: PathBuf,
    /// Whether the toolchain produced the binary
    pub succeeded: bool,
    /// Failure detail, captured from the toolchain where available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BuildOutcome {
    /// Records a successful build.
    pub fn success(target: Target, output_path: PathBuf) -> Self {
        Self {
            target,
            output_path,
            succeeded: true,
            error: None,
        }
    }

    /// Records a failed build with its diagnostic detail.
    pub fn failure(target: Target, output_path: PathBuf, detail: String) -> Self {
        Self {
            target,
            output_path,
            succeeded: false,
            error: Some(detail),
        }
    }
}

/// Outcomes of one matrix build pass, in target order.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct BuildReport {
    /// One outcome per target, success and failure together
    pub outcomes: Vec<BuildOutcome>,
}

impl BuildReport {
    /// True when every target built.
    pub fn succeeded(&self) -> bool {
        self.outcomes.iter().all(|o| o.succeeded)
    }

    /// Iterates over the failed outcomes.
    pub fn failures(&self) -> impl Iterator<Item = &BuildOutcome> {
        self.outcomes.iter().filter(|o| !o.succeeded)
    }
}

/// Assets staged for bundling, plus the files that could not be.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct AssetReport {
    /// Assets available to every platform archive
    pub assets: Vec<CommonAsset>,
    /// Configured files that were missing or unreadable
    pub missing: Vec<String>,
}

/// Result of packaging one platform.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ArchiveOutcome {
    /// Platform the archive serves
    pub key: PlatformKey,
    /// Where the archive was written
    pub archive_path: PathBuf,
    /// Entry names added, in archive order
    pub entries: Vec<String>,
    /// Whether the archive was fully written
    pub succeeded: bool,
    /// Failure detail; a partially written archive is reported here
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcomes of one packaging pass, in key order.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct PackageReport {
    /// One outcome per platform archive
    pub archives: Vec<ArchiveOutcome>,
}

impl PackageReport {
    /// True when every platform packaged.
    pub fn succeeded(&self) -> bool {
        self.archives.iter().all(|a| a.succeeded)
    }

    /// Iterates over the failed archives.
    pub fn failures(&self) -> impl Iterator<Item = &ArchiveOutcome> {
        self.archives.iter().filter(|a| !a.succeeded)
    }
}

/// Aggregate report for one pipeline invocation.
///
/// Phases that did not run are absent. Missing assets are diagnostics, not
/// failures: only build and package outcomes drive the exit code.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct PipelineReport {
    /// Matrix build outcomes, when the build phase ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<BuildReport>,
    /// Asset staging results, when assets were collected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets: Option<AssetReport>,
    /// Packaging outcomes, when the package phase ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<PackageReport>,
}

impl PipelineReport {
    /// True when no target and no platform failed.
    pub fn succeeded(&self) -> bool {
        self.build.as_ref().is_none_or(|b| b.succeeded())
            && self.package.as_ref().is_none_or(|p| p.succeeded())
    }

    /// Process exit code reflecting partial failure.
    pub fn exit_code(&self) -> i32 {
        if self.succeeded() { 0 } else { 1 }
    }
}
