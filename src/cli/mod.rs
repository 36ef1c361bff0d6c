//! Command line interface for the packaging pipeline.
//!
//! Parses arguments, merges them with the optional configuration file,
//! dispatches the requested phases, and maps the aggregate report to the
//! process exit code.

mod args;
mod output;

pub use args::{Args, Command};
pub use output::OutputManager;

use crate::config::{self, ConfigFile};
use crate::dist::{self, PipelineReport, Settings, SettingsBuilder, ToolchainSettings};
use crate::error::{CliError, Result};
use std::time::Duration;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let output = OutputManager::new(args.verbose, false);
    let settings = build_settings(&args)?;

    let report = match args.command {
        Command::Build => run_build(&settings, &output).await?,
        Command::Package => run_package(&settings, &output).await?,
        Command::Dist => run_dist(&settings, &output).await?,
    };

    if let Some(path) = &args.report {
        let json = serde_json::to_string_pretty(&report)?;
        tokio::fs::write(path, json).await?;
        output.verbose(&format!("report written to {}", path.display()));
    }

    if report.succeeded() {
        output.success("all platforms complete");
    } else {
        output.error("one or more platforms failed; see diagnostics above");
    }
    Ok(report.exit_code())
}

/// Merges CLI flags over the configuration file into pipeline settings.
///
/// Flags win over the file; the file wins over built-in defaults. Only the
/// phases actually requested enforce the presence of entry point and
/// toolchain, so `package` runs without either.
fn build_settings(args: &Args) -> Result<Settings> {
    let config = match &args.config {
        Some(path) => Some(config::load(path)?),
        None => config::load_default()?,
    };
    let config = config.unwrap_or_default();

    let name = args
        .name
        .clone()
        .or_else(|| config.package.name.clone())
        .ok_or_else(|| CliError::MissingArgument {
            argument: "--name (or [package].name in the config file)".to_string(),
        })?;

    let needs_toolchain = matches!(args.command, Command::Build | Command::Dist);
    if needs_toolchain {
        if args.entry.is_none() && config.build.entry.is_none() {
            return Err(CliError::MissingArgument {
                argument: "--entry (or [build].entry in the config file)".to_string(),
            }
            .into());
        }
        if args.toolchain.is_none() && config.build.toolchain.is_none() {
            return Err(CliError::MissingArgument {
                argument: "--toolchain (or [build].toolchain in the config file)".to_string(),
            }
            .into());
        }
    }

    let mut builder = SettingsBuilder::new().base_name(name);

    if let Some(entry) = args.entry.clone().or_else(|| config.build.entry.clone()) {
        builder = builder.entry_point(entry);
    }
    if let Some(toolchain) = toolchain_settings(args, &config) {
        builder = builder.toolchain(toolchain);
    }
    if let Some(dist_dir) = args.dist_dir.clone().or_else(|| config.output.dist_dir.clone()) {
        builder = builder.dist_dir(dist_dir);
    }
    if let Some(package_dir) = args
        .package_dir
        .clone()
        .or_else(|| config.output.package_dir.clone())
    {
        builder = builder.package_dir(package_dir);
    }
    if let Some(docs) = config.assets.docs.clone() {
        builder = builder.doc_files(docs);
    }
    if let Some(examples) = config.assets.examples.clone() {
        builder = builder.examples_glob(examples);
    }
    if let Some(secs) = args.build_timeout.or(config.build.timeout_secs) {
        builder = builder.build_timeout(Duration::from_secs(secs));
    }

    Ok(builder.build()?)
}

/// Assembles toolchain settings from flags and config file.
fn toolchain_settings(args: &Args, config: &ConfigFile) -> Option<ToolchainSettings> {
    let program = args
        .toolchain
        .clone()
        .or_else(|| config.build.toolchain.clone())?;
    let mut toolchain = ToolchainSettings::new(program).with_args(config.build.args.clone());
    if config.build.os_var.is_some() || config.build.arch_var.is_some() {
        toolchain = toolchain.with_selectors(
            config
                .build
                .os_var
                .clone()
                .unwrap_or_else(|| dist::settings::DEFAULT_OS_VAR.to_string()),
            config
                .build
                .arch_var
                .clone()
                .unwrap_or_else(|| dist::settings::DEFAULT_ARCH_VAR.to_string()),
        );
    }
    Some(toolchain)
}

/// Build phase: matrix build, asset staging, run scripts.
async fn run_build(settings: &Settings, output: &OutputManager) -> Result<PipelineReport> {
    let (build, assets) = build_phase(settings, output).await?;
    Ok(PipelineReport {
        build: Some(build),
        assets: Some(assets),
        package: None,
    })
}

/// Standalone package phase over a previously built distribution root.
async fn run_package(settings: &Settings, output: &OutputManager) -> Result<PipelineReport> {
    output.section("Scanning distribution artifacts");
    let groups = dist::group::scan_artifact_dir(settings.dist_dir(), settings.base_name())?;
    if groups.is_empty() {
        output.warn(&format!(
            "no artifacts matching {}_* found in {}",
            settings.base_name(),
            settings.dist_dir().display()
        ));
    }
    for (key, binaries) in &groups {
        output.verbose(&format!("{key}: {} binary(ies)", binaries.len()));
    }

    let assets = dist::assets::staged_assets(settings).await?;
    for missing in &assets.missing {
        output.warn(&format!("asset missing from bundles: {missing}"));
    }

    output.section("Creating distribution packages");
    let package = dist::archive::package_all(&groups, &assets.assets, settings).await?;
    print_package_outcomes(&package, output);

    Ok(PipelineReport {
        build: None,
        assets: Some(assets),
        package: Some(package),
    })
}

/// Full pipeline: build, then package the fresh outcomes.
async fn run_dist(settings: &Settings, output: &OutputManager) -> Result<PipelineReport> {
    let (build, assets) = build_phase(settings, output).await?;

    output.section("Creating distribution packages");
    let groups = dist::group::group_outcomes(&build.outcomes);
    let package = dist::archive::package_all(&groups, &assets.assets, settings).await?;
    print_package_outcomes(&package, output);

    Ok(PipelineReport {
        build: Some(build),
        assets: Some(assets),
        package: Some(package),
    })
}

/// Shared build-phase body for `build` and `dist`.
async fn build_phase(
    settings: &Settings,
    output: &OutputManager,
) -> Result<(dist::BuildReport, dist::AssetReport)> {
    output.section(&format!(
        "Building {} for {} platform target(s)",
        settings.base_name(),
        settings.targets().len()
    ));
    let build = dist::builder::build_all(settings).await?;
    for outcome in &build.outcomes {
        if outcome.succeeded {
            output.success(&format!("built {}", outcome.output_path.display()));
        } else {
            output.error(&format!(
                "{} failed: {}",
                outcome.target,
                outcome.error.as_deref().unwrap_or("unknown error")
            ));
        }
    }

    output.section("Collecting documentation and examples");
    let assets = dist::assets::collect_common_assets(settings).await?;
    for missing in &assets.missing {
        output.warn(&format!("asset missing from bundles: {missing}"));
    }
    output.progress(&format!("{} common asset(s) staged", assets.assets.len()));

    let scripts = dist::scripts::write_run_scripts(settings).await?;
    for script in &scripts {
        output.verbose(&format!("run script {}", script.display()));
    }

    Ok((build, assets))
}

/// Prints per-archive results.
fn print_package_outcomes(package: &dist::PackageReport, output: &OutputManager) {
    for archive in &package.archives {
        if archive.succeeded {
            output.success(&format!(
                "packaged {} ({} entries)",
                archive.archive_path.display(),
                archive.entries.len()
            ));
        } else {
            output.error(&format!(
                "packaging {} failed: {}",
                archive.archive_path.display(),
                archive.error.as_deref().unwrap_or("unknown error")
            ));
        }
    }
}
