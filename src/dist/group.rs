//! Platform grouping of build artifacts.
//!
//! Binaries are bucketed under an extension-independent platform key before
//! packaging. Two paths produce the same grouping: [`group_outcomes`] keys
//! on the structured [`Target`] carried by each build outcome, while
//! [`scan_artifact_dir`] reconstructs keys from the filename convention for
//! artifact directories whose provenance is unknown (pre-built artifacts
//! dropped in by other tooling).

use crate::dist::error::{ErrorExt, Result};
use crate::dist::report::BuildOutcome;
use crate::dist::settings::{Arch, Target, TargetOs};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Normalized identifier for an OS/architecture pair.
///
/// Always extension-independent: a Windows `.exe` and a bare Unix binary
/// for the same pair share one key. The key's string form names the
/// platform archive, so it is part of the naming contract.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct PlatformKey(String);

impl PlatformKey {
    /// Key for a known OS/architecture pair.
    pub fn of(os: TargetOs, arch: Arch) -> Self {
        Self(format!("{}_{}", os.as_str(), arch.as_str()))
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlatformKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Groups successful build outcomes by their structured platform key.
///
/// Binaries accumulate per key in discovery order; failed outcomes are
/// ignored. The map's ordering keeps packaging deterministic.
pub fn group_outcomes(outcomes: &[BuildOutcome]) -> BTreeMap<PlatformKey, Vec<PathBuf>> {
    let mut groups: BTreeMap<PlatformKey, Vec<PathBuf>> = BTreeMap::new();
    for outcome in outcomes.iter().filter(|o| o.succeeded) {
        groups
            .entry(outcome.target.platform_key())
            .or_default()
            .push(outcome.output_path.clone());
    }
    groups
}

/// Groups artifacts in a distribution directory by filename convention.
///
/// Only regular files whose name starts with `{base_name}_` participate;
/// everything else (the `examples` subdirectory, documentation, run
/// scripts) is ignored. Names that do not carry both an OS and an
/// architecture token are skipped with a diagnostic.
///
/// # Errors
///
/// Returns an error when the directory itself cannot be read; individual
/// malformed names are never fatal.
pub fn scan_artifact_dir(
    dir: &Path,
    base_name: &str,
) -> Result<BTreeMap<PlatformKey, Vec<PathBuf>>> {
    let prefix = format!("{base_name}_");
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir).fs_context("reading distribution directory", dir)? {
        let entry = entry.fs_context("reading directory entry", dir)?;
        let file_type = entry.file_type().fs_context("reading entry type", &entry.path())?;
        if !file_type.is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            log::warn!("skipping artifact with non-UTF-8 name in {}", dir.display());
            continue;
        };
        if name.starts_with(&prefix) {
            names.push(name.to_string());
        }
    }
    // Directory listing order varies by platform; sort for stable grouping.
    names.sort();

    let mut groups: BTreeMap<PlatformKey, Vec<PathBuf>> = BTreeMap::new();
    for name in names {
        match parse_platform_key(&name, &prefix) {
            Some(key) => groups.entry(key).or_default().push(dir.join(&name)),
            None => log::warn!("skipping artifact with unrecognized name: {name}"),
        }
    }
    Ok(groups)
}

/// Reconstructs a platform key from an artifact filename.
///
/// The name is tokenized on `_` past the base-name prefix; the first two
/// tokens are the OS and architecture. A key ending in a known binary
/// extension has that suffix stripped, so Windows and Unix artifacts for
/// the same pair normalize identically. Returns None for names with too
/// few tokens.
fn parse_platform_key(file_name: &str, prefix: &str) -> Option<PlatformKey> {
    let remainder = file_name.strip_prefix(prefix)?;
    let mut tokens = remainder.split('_');
    let os = tokens.next().filter(|t| !t.is_empty())?;
    let arch = tokens.next().filter(|t| !t.is_empty())?;

    let mut key = format!("{os}_{arch}");
    for ext in Target::known_extensions() {
        if key.ends_with(ext) {
            key.truncate(key.len() - ext.len());
            break;
        }
    }
    Some(PlatformKey(key))
}
