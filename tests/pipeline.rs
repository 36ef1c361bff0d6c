//! End-to-end pipeline tests against a fake toolchain.
//!
//! The fake toolchain is a small shell script invoked exactly like the real
//! thing: `{program} {output_path} {entry_point}` with the selector
//! variables in its environment. It writes a recognizable binary to the
//! output path, or fails for a hardcoded target to exercise partial
//! failure.

#![cfg(unix)]

use distforge::dist::{
    self, Arch, SettingsBuilder, Settings, Target, TargetOs, ToolchainSettings,
};
use std::collections::BTreeSet;
use std::fs::File;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tempfile::TempDir;

/// Writes an executable fake toolchain script into `dir`.
///
/// The script body receives `$1` = output path, `$2` = entry point, plus
/// `TARGET_OS`/`TARGET_ARCH` in its environment.
fn fake_toolchain(dir: &Path, body: &str) -> std::path::PathBuf {
    let path = dir.join("fake-toolchain.sh");
    let script = format!("#!/bin/sh\n{body}\n");
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// A toolchain that copies the entry point to the output path.
fn copying_toolchain(dir: &Path) -> std::path::PathBuf {
    fake_toolchain(
        dir,
        r#"printf 'binary %s/%s\n' "$TARGET_OS" "$TARGET_ARCH" > "$1"
cat "$2" >> "$1""#,
    )
}

/// A toolchain that fails for windows/386 and succeeds elsewhere.
fn flaky_toolchain(dir: &Path) -> std::path::PathBuf {
    fake_toolchain(
        dir,
        r#"if [ "$TARGET_OS" = "windows" ] && [ "$TARGET_ARCH" = "386" ]; then
    echo "unsupported target" >&2
    exit 1
fi
printf 'binary %s/%s\n' "$TARGET_OS" "$TARGET_ARCH" > "$1""#,
    )
}

fn base_settings(root: &Path, toolchain: &Path) -> SettingsBuilder {
    SettingsBuilder::new()
        .base_name("app")
        .entry_point(root.join("main.src"))
        .toolchain(ToolchainSettings::new(toolchain))
        .dist_dir(root.join("dist"))
        .package_dir(root.join("packages"))
}

fn write_entry(root: &Path) {
    std::fs::write(root.join("main.src"), "print \"hello\"\n").unwrap();
}

fn archive_entries(path: &Path) -> BTreeSet<String> {
    let archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    archive.file_names().map(String::from).collect()
}

#[tokio::test]
async fn every_target_yields_one_named_binary() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_entry(root);
    let toolchain = copying_toolchain(root);
    let settings = base_settings(root, &toolchain).build().unwrap();

    let report = dist::builder::build_all(&settings).await.unwrap();
    assert!(report.succeeded());
    assert_eq!(report.outcomes.len(), Target::matrix().len());

    for target in Target::matrix() {
        let expected = root.join("dist").join(target.output_name("app"));
        assert!(expected.is_file(), "missing {}", expected.display());
    }
    // No partial outputs left behind.
    for entry in std::fs::read_dir(root.join("dist")).unwrap() {
        let name = entry.unwrap().file_name();
        assert!(
            !name.to_string_lossy().ends_with(".partial"),
            "stray partial output {name:?}"
        );
    }
}

#[tokio::test]
async fn ambient_environment_is_not_mutated() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_entry(root);
    let toolchain = copying_toolchain(root);
    let settings = base_settings(root, &toolchain)
        .targets(vec![Target::new(TargetOs::Linux, Arch::Amd64)])
        .build()
        .unwrap();

    dist::builder::build_all(&settings).await.unwrap();
    assert!(std::env::var_os("TARGET_OS").is_none());
    assert!(std::env::var_os("TARGET_ARCH").is_none());
}

#[tokio::test]
async fn two_target_scenario_produces_expected_packages() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_entry(root);
    std::fs::write(root.join("README.md"), "# app\n").unwrap();
    let toolchain = copying_toolchain(root);
    let settings = base_settings(root, &toolchain)
        .doc_files(vec![root.join("README.md")])
        .targets(vec![
            Target::new(TargetOs::Linux, Arch::Amd64),
            Target::new(TargetOs::Windows, Arch::Amd64),
        ])
        .build()
        .unwrap();

    let report = run_full_pipeline(&settings).await;
    assert!(report.build.as_ref().unwrap().succeeded());
    assert!(report.package.as_ref().unwrap().succeeded());

    let linux = root.join("packages").join("app_linux_amd64.zip");
    let windows = root.join("packages").join("app_windows_amd64.zip");
    assert_eq!(
        archive_entries(&linux),
        BTreeSet::from(["app_linux_amd64".to_string(), "README.md".to_string()])
    );
    assert_eq!(
        archive_entries(&windows),
        BTreeSet::from(["app_windows_amd64.exe".to_string(), "README.md".to_string()])
    );
}

#[tokio::test]
async fn archives_bundle_examples_under_stable_paths() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_entry(root);
    std::fs::write(root.join("README.md"), "# app\n").unwrap();
    let samples = root.join("samples");
    std::fs::create_dir(&samples).unwrap();
    std::fs::write(samples.join("hello.bas"), "PRINT 1\n").unwrap();
    std::fs::write(samples.join("loop.bas"), "PRINT 2\n").unwrap();
    std::fs::write(samples.join("notes.txt"), "not an example\n").unwrap();

    let toolchain = copying_toolchain(root);
    let settings = base_settings(root, &toolchain)
        .doc_files(vec![root.join("README.md")])
        .examples_glob(samples.join("*.bas").to_string_lossy().into_owned())
        .targets(vec![Target::new(TargetOs::Linux, Arch::Amd64)])
        .build()
        .unwrap();

    let report = run_full_pipeline(&settings).await;
    assert!(report.succeeded());

    let entries = archive_entries(&root.join("packages").join("app_linux_amd64.zip"));
    assert_eq!(
        entries,
        BTreeSet::from([
            "app_linux_amd64".to_string(),
            "README.md".to_string(),
            "examples/hello.bas".to_string(),
            "examples/loop.bas".to_string(),
        ])
    );
}

#[tokio::test]
async fn repackaging_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_entry(root);
    std::fs::write(root.join("README.md"), "# app\n").unwrap();
    let toolchain = copying_toolchain(root);
    let settings = base_settings(root, &toolchain)
        .doc_files(vec![root.join("README.md")])
        .targets(vec![
            Target::new(TargetOs::Linux, Arch::Amd64),
            Target::new(TargetOs::Windows, Arch::Amd64),
        ])
        .build()
        .unwrap();

    let first = run_full_pipeline(&settings).await;
    assert!(first.succeeded());
    let linux = root.join("packages").join("app_linux_amd64.zip");
    let first_entries = archive_entries(&linux);

    let second = run_full_pipeline(&settings).await;
    assert!(second.succeeded());
    assert_eq!(archive_entries(&linux), first_entries);
}

#[tokio::test]
async fn failing_target_never_blocks_the_rest() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_entry(root);
    std::fs::write(root.join("README.md"), "# app\n").unwrap();
    let toolchain = flaky_toolchain(root);
    let settings = base_settings(root, &toolchain)
        .doc_files(vec![root.join("README.md")])
        .build()
        .unwrap();

    let report = run_full_pipeline(&settings).await;
    assert!(!report.succeeded());
    assert_eq!(report.exit_code(), 1);

    let build = report.build.as_ref().unwrap();
    let failures: Vec<_> = build.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].target.os, TargetOs::Windows);
    assert_eq!(failures[0].target.arch, Arch::X86);
    assert!(failures[0]
        .error
        .as_deref()
        .unwrap()
        .contains("unsupported target"));

    // Every other platform still built and packaged.
    let package = report.package.as_ref().unwrap();
    assert!(package.succeeded());
    let keys: BTreeSet<_> = package
        .archives
        .iter()
        .map(|a| a.key.as_str().to_string())
        .collect();
    assert_eq!(
        keys,
        BTreeSet::from([
            "windows_amd64".to_string(),
            "linux_amd64".to_string(),
            "linux_386".to_string(),
            "darwin_amd64".to_string(),
            "darwin_arm64".to_string(),
        ])
    );
    assert!(!root
        .join("packages")
        .join("app_windows_386.zip")
        .exists());
}

#[tokio::test]
async fn missing_doc_is_reported_but_not_fatal() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_entry(root);
    std::fs::write(root.join("README.md"), "# app\n").unwrap();
    let toolchain = copying_toolchain(root);
    let settings = base_settings(root, &toolchain)
        .doc_files(vec![root.join("README.md"), root.join("LICENSE")])
        .targets(vec![Target::new(TargetOs::Linux, Arch::Amd64)])
        .build()
        .unwrap();

    let report = run_full_pipeline(&settings).await;
    assert!(report.succeeded(), "missing docs must not fail the pipeline");

    let assets = report.assets.as_ref().unwrap();
    assert_eq!(assets.missing.len(), 1);
    assert!(assets.missing[0].contains("LICENSE"));

    let entries = archive_entries(&root.join("packages").join("app_linux_amd64.zip"));
    assert_eq!(
        entries,
        BTreeSet::from(["app_linux_amd64".to_string(), "README.md".to_string()])
    );
}

#[tokio::test]
async fn artifact_dir_scan_matches_structured_grouping() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_entry(root);
    std::fs::write(root.join("README.md"), "# app\n").unwrap();
    let toolchain = copying_toolchain(root);
    let settings = base_settings(root, &toolchain)
        .doc_files(vec![root.join("README.md")])
        .build()
        .unwrap();

    let build = dist::builder::build_all(&settings).await.unwrap();
    dist::assets::collect_common_assets(&settings).await.unwrap();
    dist::scripts::write_run_scripts(&settings).await.unwrap();

    let structured = dist::group::group_outcomes(&build.outcomes);
    let scanned =
        dist::group::scan_artifact_dir(settings.dist_dir(), settings.base_name()).unwrap();

    let structured_keys: BTreeSet<_> =
        structured.keys().map(|k| k.as_str().to_string()).collect();
    let scanned_keys: BTreeSet<_> = scanned.keys().map(|k| k.as_str().to_string()).collect();
    assert_eq!(structured_keys, scanned_keys);
    for (key, binaries) in &scanned {
        assert_eq!(binaries.len(), structured[key].len());
    }
}

#[tokio::test]
async fn hung_toolchain_is_a_per_target_failure() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_entry(root);
    let toolchain = fake_toolchain(root, r#"sleep 30"#);
    let settings = base_settings(root, &toolchain)
        .targets(vec![Target::new(TargetOs::Linux, Arch::Amd64)])
        .build_timeout(std::time::Duration::from_secs(1))
        .build()
        .unwrap();

    let report = dist::builder::build_all(&settings).await.unwrap();
    assert!(!report.succeeded());
    let failure = report.failures().next().unwrap();
    assert!(failure.error.as_deref().unwrap().contains("timed out"));
}

/// Runs build, asset collection, scripts, grouping, and packaging the way
/// the `dist` command does.
async fn run_full_pipeline(settings: &Settings) -> dist::PipelineReport {
    let build = dist::builder::build_all(settings).await.unwrap();
    let assets = dist::assets::collect_common_assets(settings).await.unwrap();
    dist::scripts::write_run_scripts(settings).await.unwrap();
    let groups = dist::group::group_outcomes(&build.outcomes);
    let package = dist::archive::package_all(&groups, &assets.assets, settings)
        .await
        .unwrap();
    dist::PipelineReport {
        build: Some(build),
        assets: Some(assets),
        package: Some(package),
    }
}
