//! Collection of assets shared by every platform bundle.
//!
//! Fixed documentation files are staged at the distribution root and
//! example files under its `examples/` subdirectory. Each staged file is
//! registered as a [`CommonAsset`] whose archive-relative path is stable
//! across every platform archive. Missing files are diagnostics, never
//! fatal: the asset is simply absent from the bundles.

use crate::dist::error::{Error, ErrorExt, Result};
use crate::dist::report::AssetReport;
use crate::dist::settings::Settings;
use std::path::Path;

/// A file bundled identically into every platform's archive.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CommonAsset {
    /// Staged location on disk
    pub source: std::path::PathBuf,
    /// Entry path inside every archive, relative to the archive root
    pub archive_path: String,
}

/// Stages documentation and example files into the distribution root.
///
/// Fixed files keep their base filename; examples land under
/// `examples/{base}`. A missing fixed file or an example glob matching
/// nothing is recorded and skipped.
///
/// # Errors
///
/// Fatal only when the distribution or examples directory cannot be
/// created, or when the example pattern itself is invalid.
pub async fn collect_common_assets(settings: &Settings) -> Result<AssetReport> {
    let mut report = AssetReport::default();
    let dist_dir = settings.dist_dir();

    tokio::fs::create_dir_all(dist_dir)
        .await
        .fs_context("creating distribution directory", dist_dir)?;

    for doc in settings.doc_files() {
        let Some(file_name) = doc.file_name().and_then(|n| n.to_str()) else {
            log::warn!("skipping documentation file with unusable name: {}", doc.display());
            report.missing.push(doc.display().to_string());
            continue;
        };
        let staged = dist_dir.join(file_name);
        match copy_file(doc, &staged).await {
            Ok(()) => report.assets.push(CommonAsset {
                source: staged,
                archive_path: file_name.to_string(),
            }),
            Err(e) => {
                log::warn!("documentation file {} omitted: {}", doc.display(), e);
                report.missing.push(doc.display().to_string());
            }
        }
    }

    if let Some(pattern) = settings.examples_glob() {
        let examples_dir = dist_dir.join("examples");
        tokio::fs::create_dir_all(&examples_dir)
            .await
            .fs_context("creating examples directory", &examples_dir)?;

        let matches = glob::glob(pattern).map_err(|source| Error::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;
        for entry in matches {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    log::warn!("example file skipped: {e}");
                    report.missing.push(e.path().display().to_string());
                    continue;
                }
            };
            if !path.is_file() {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                log::warn!("skipping example with unusable name: {}", path.display());
                report.missing.push(path.display().to_string());
                continue;
            };
            let staged = examples_dir.join(file_name);
            match copy_file(&path, &staged).await {
                Ok(()) => report.assets.push(CommonAsset {
                    source: staged,
                    archive_path: format!("examples/{file_name}"),
                }),
                Err(e) => {
                    log::warn!("example file {} omitted: {}", path.display(), e);
                    report.missing.push(path.display().to_string());
                }
            }
        }
    }

    log::info!(
        "collected {} common asset(s), {} missing",
        report.assets.len(),
        report.missing.len()
    );
    Ok(report)
}

/// Registers assets already staged in the distribution root.
///
/// Used by the standalone package phase, which runs against a distribution
/// directory produced earlier: configured documentation files are looked up
/// by base filename, and everything under `examples/` is included.
pub async fn staged_assets(settings: &Settings) -> Result<AssetReport> {
    let mut report = AssetReport::default();
    let dist_dir = settings.dist_dir();

    for doc in settings.doc_files() {
        let Some(file_name) = doc.file_name().and_then(|n| n.to_str()) else {
            report.missing.push(doc.display().to_string());
            continue;
        };
        let staged = dist_dir.join(file_name);
        if staged.is_file() {
            report.assets.push(CommonAsset {
                source: staged,
                archive_path: file_name.to_string(),
            });
        } else {
            log::warn!("documentation file {} not staged; omitted from bundles", file_name);
            report.missing.push(file_name.to_string());
        }
    }

    let examples_dir = dist_dir.join("examples");
    if examples_dir.is_dir() {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&examples_dir)
            .fs_context("reading examples directory", &examples_dir)?
        {
            let entry = entry.fs_context("reading examples entry", &examples_dir)?;
            if entry.path().is_file() {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        for name in names {
            report.assets.push(CommonAsset {
                source: examples_dir.join(&name),
                archive_path: format!("examples/{name}"),
            });
        }
    }

    Ok(report)
}

/// Copies a regular file, creating the destination's parent as needed.
///
/// Fails if the source path is a directory or doesn't exist.
async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Err(Error::GenericError(format!("{from:?} does not exist")));
    }
    if !from.is_file() {
        return Err(Error::GenericError(format!("{from:?} is not a file")));
    }
    if let Some(dest_dir) = to.parent() {
        tokio::fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating staging directory", dest_dir)?;
    }
    tokio::fs::copy(from, to)
        .await
        .fs_context("copying asset", from)?;
    Ok(())
}
