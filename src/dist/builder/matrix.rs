//! Per-target toolchain invocation across the platform matrix.

use super::probe::probe_toolchain;
use crate::dist::error::{Context, ErrorExt, Result};
use crate::dist::report::{BuildOutcome, BuildReport};
use crate::dist::settings::{Settings, Target, ToolchainSettings};
use std::path::Path;

/// Builds every configured target, continuing past failures.
///
/// The toolchain runs as `{program} {args...} {output_path} {entry_point}`
/// with the OS and architecture selector variables layered over the
/// inherited environment. The ambient process environment is never
/// mutated; each invocation gets its own overlay.
///
/// # Errors
///
/// Only setup problems are fatal: a missing entry point or toolchain in
/// the settings, or failure to create the distribution directory. Build
/// failures are recorded per target in the returned report.
pub async fn build_all(settings: &Settings) -> Result<BuildReport> {
    let toolchain = settings
        .toolchain()
        .context("toolchain program is required for the build phase")?;
    let entry_point = settings
        .entry_point()
        .context("source entry point is required for the build phase")?;

    tokio::fs::create_dir_all(settings.dist_dir())
        .await
        .fs_context("creating distribution directory", settings.dist_dir())?;

    probe_toolchain(toolchain);

    let mut outcomes = Vec::with_capacity(settings.targets().len());
    for target in settings.targets() {
        let outcome = build_target(settings, toolchain, entry_point, *target).await;
        match &outcome.error {
            None => log::info!("built {}", outcome.output_path.display()),
            Some(detail) => log::error!("build failed for {}: {}", target, detail),
        }
        outcomes.push(outcome);
    }

    Ok(BuildReport { outcomes })
}

/// Builds one target, returning its outcome instead of propagating errors.
///
/// The toolchain writes to a `.partial` path that is renamed into place on
/// success, so a failed build never leaves a half-written binary at the
/// final path.
async fn build_target(
    settings: &Settings,
    toolchain: &ToolchainSettings,
    entry_point: &Path,
    target: Target,
) -> BuildOutcome {
    let output_name = target.output_name(settings.base_name());
    let output_path = settings.dist_dir().join(&output_name);
    let partial_path = settings.dist_dir().join(format!("{output_name}.partial"));

    log::info!("building for {}", target);

    let mut command = tokio::process::Command::new(toolchain.program());
    command
        .args(toolchain.args())
        .arg(&partial_path)
        .arg(entry_point)
        .env(toolchain.os_var(), target.os.as_str())
        .env(toolchain.arch_var(), target.arch.as_str())
        // A timed-out build must not leave the toolchain running.
        .kill_on_drop(true);

    let result = match settings.build_timeout() {
        Some(limit) => match tokio::time::timeout(limit, command.output()).await {
            Ok(result) => result,
            Err(_) => {
                remove_partial(&partial_path).await;
                return BuildOutcome::failure(
                    target,
                    output_path,
                    format!("toolchain timed out after {}s", limit.as_secs()),
                );
            }
        },
        None => command.output().await,
    };

    match result {
        Ok(output) if output.status.success() => {
            match promote_partial(&partial_path, &output_path).await {
                Ok(()) => BuildOutcome::success(target, output_path),
                Err(e) => BuildOutcome::failure(target, output_path, e.to_string()),
            }
        }
        Ok(output) => {
            remove_partial(&partial_path).await;
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = if stderr.trim().is_empty() {
                format!("toolchain exited with {}", output.status)
            } else {
                format!("toolchain exited with {}: {}", output.status, stderr.trim())
            };
            BuildOutcome::failure(target, output_path, detail)
        }
        Err(e) => BuildOutcome::failure(
            target,
            output_path,
            format!(
                "failed to invoke toolchain `{}`: {}",
                toolchain.program().display(),
                e
            ),
        ),
    }
}

/// Moves a finished partial binary to its final path, replacing any
/// artifact from a previous run.
async fn promote_partial(partial: &Path, target: &Path) -> Result<()> {
    match tokio::fs::remove_file(target).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e).fs_context("replacing previous binary", target),
    }
    tokio::fs::rename(partial, target)
        .await
        .fs_context("moving built binary into place", target)
}

/// Best-effort cleanup of a partial output after a failed build.
async fn remove_partial(partial: &Path) {
    match tokio::fs::remove_file(partial).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => log::debug!("could not remove {}: {}", partial.display(), e),
    }
}
