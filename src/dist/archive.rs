//! Per-platform archive assembly.
//!
//! Each platform key gets one deflate-compressed zip archive under the
//! package directory, named `{base}_{key}.zip`. Entry paths are rewritten
//! so the archive is self-contained: binaries sit at the archive root
//! under their base filename, common assets at their archive-relative
//! path. Re-running packaging truncates and rewrites existing archives
//! rather than appending to them.

use crate::dist::assets::CommonAsset;
use crate::dist::error::{Error, ErrorExt, Result};
use crate::dist::group::PlatformKey;
use crate::dist::report::{ArchiveOutcome, PackageReport};
use crate::dist::settings::Settings;
use std::collections::BTreeMap;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Packages every platform group into its own archive.
///
/// One platform's failure - creating the archive or adding an entry - is
/// recorded in its [`ArchiveOutcome`] and never blocks the others. A
/// partially written archive stays on disk but is reported as failed.
///
/// # Errors
///
/// Fatal only when the package directory cannot be created.
pub async fn package_all(
    groups: &BTreeMap<PlatformKey, Vec<PathBuf>>,
    assets: &[CommonAsset],
    settings: &Settings,
) -> Result<PackageReport> {
    tokio::fs::create_dir_all(settings.package_dir())
        .await
        .fs_context("creating package directory", settings.package_dir())?;

    let mut archives = Vec::with_capacity(groups.len());
    for (key, binaries) in groups {
        let archive_name = format!("{}_{}.zip", settings.base_name(), key);
        let archive_path = settings.package_dir().join(archive_name);
        log::info!("packaging {} -> {}", key, archive_path.display());

        // Zip writing is blocking I/O; run it off the async executor.
        let outcome = {
            let task_key = key.clone();
            let task_path = archive_path.clone();
            let binaries = binaries.clone();
            let assets = assets.to_vec();
            tokio::task::spawn_blocking(move || {
                write_platform_archive(task_key, task_path, &binaries, &assets)
            })
            .await
            .unwrap_or_else(|join_err| ArchiveOutcome {
                key: key.clone(),
                archive_path: archive_path.clone(),
                entries: Vec::new(),
                succeeded: false,
                error: Some(format!("archive task panicked: {join_err}")),
            })
        };

        match &outcome.error {
            None => log::info!("packaged {}", outcome.archive_path.display()),
            Some(detail) => log::error!(
                "packaging failed for {}: {}",
                outcome.archive_path.display(),
                detail
            ),
        }
        archives.push(outcome);
    }

    Ok(PackageReport { archives })
}

/// Writes one platform's archive and reports what went into it.
///
/// Entry failures are collected rather than propagated so the remaining
/// entries still land; any entry failure marks the whole archive failed.
fn write_platform_archive(
    key: PlatformKey,
    archive_path: PathBuf,
    binaries: &[PathBuf],
    assets: &[CommonAsset],
) -> ArchiveOutcome {
    let mut entries = Vec::new();
    let mut entry_errors = Vec::new();

    // File::create truncates: a previous run's archive is overwritten,
    // never appended to.
    let file = match File::create(&archive_path) {
        Ok(file) => file,
        Err(e) => {
            return ArchiveOutcome {
                key,
                archive_path,
                entries,
                succeeded: false,
                error: Some(format!("creating archive: {e}")),
            };
        }
    };
    let mut writer = ZipWriter::new(file);

    for binary in binaries {
        let name = match binary.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => {
                entry_errors.push(format!("unusable binary name: {}", binary.display()));
                continue;
            }
        };
        if let Err(e) = add_entry(&mut writer, binary, &name) {
            entry_errors.push(format!("{name}: {e}"));
        } else {
            entries.push(name);
        }
    }

    for asset in assets {
        if entries.iter().any(|existing| existing == &asset.archive_path) {
            log::warn!(
                "duplicate archive entry {} skipped in {}",
                asset.archive_path,
                archive_path.display()
            );
            continue;
        }
        if let Err(e) = add_entry(&mut writer, &asset.source, &asset.archive_path) {
            entry_errors.push(format!("{}: {e}", asset.archive_path));
        } else {
            entries.push(asset.archive_path.clone());
        }
    }

    if let Err(e) = writer.finish() {
        entry_errors.push(format!("finalizing archive: {e}"));
    }

    let succeeded = entry_errors.is_empty();
    ArchiveOutcome {
        key,
        archive_path,
        entries,
        succeeded,
        error: if succeeded {
            None
        } else {
            Some(entry_errors.join("; "))
        },
    }
}

/// Adds one file to the archive under the given entry name.
///
/// Deflate compression; the entry's modification time is carried over from
/// the source file where the zip timestamp range can represent it.
fn add_entry(writer: &mut ZipWriter<File>, source: &Path, name: &str) -> Result<()> {
    let mut file = File::open(source).fs_context("opening archive entry", source)?;
    let metadata = file.metadata().fs_context("reading entry metadata", source)?;

    let mut options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    if let Ok(modified) = metadata.modified() {
        if let Ok(timestamp) = zip::DateTime::try_from(time::OffsetDateTime::from(modified)) {
            options = options.last_modified_time(timestamp);
        }
    }

    writer
        .start_file(name, options)
        .map_err(|source| Error::Archive {
            path: PathBuf::from(name),
            source,
        })?;
    io::copy(&mut file, writer).fs_context("writing archive entry", source)?;
    Ok(())
}
