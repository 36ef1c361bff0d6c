//! Run-script wrappers for the distribution root.
//!
//! One wrapper per OS family present in the target matrix: a batch script
//! for the Windows family, a shell script for everything else. Both demand
//! at least one argument, forward all arguments to the binary, and exit
//! nonzero when invoked with none. The templates are static; the only
//! branch is the OS-family check.

use crate::dist::error::Result;
use crate::dist::settings::Settings;
use std::path::PathBuf;

/// Writes the run-script wrapper(s) into the distribution root.
///
/// A wrapper that cannot be written is logged and skipped; the returned
/// list holds the scripts that were written.
pub async fn write_run_scripts(settings: &Settings) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    let targets = settings.targets();

    if targets.iter().any(|t| t.os.is_windows_family()) {
        let path = settings
            .dist_dir()
            .join(format!("{}.bat", settings.base_name()));
        match tokio::fs::write(&path, batch_script(settings.base_name())).await {
            Ok(()) => written.push(path),
            Err(e) => log::warn!("could not write run script {}: {}", path.display(), e),
        }
    }

    if targets.iter().any(|t| !t.os.is_windows_family()) {
        let path = settings
            .dist_dir()
            .join(format!("{}.sh", settings.base_name()));
        match tokio::fs::write(&path, shell_script(settings.base_name())).await {
            Ok(()) => {
                mark_executable(&path).await;
                written.push(path);
            }
            Err(e) => log::warn!("could not write run script {}: {}", path.display(), e),
        }
    }

    Ok(written)
}

fn batch_script(base_name: &str) -> String {
    format!(
        r#"@echo off
if "%1"=="" (
    echo Usage: {base_name} file [args...]
    exit /b 1
)
{base_name}.exe %*
"#
    )
}

fn shell_script(base_name: &str) -> String {
    format!(
        r#"#!/bin/sh
if [ -z "$1" ]; then
    echo "Usage: {base_name} file [args...]"
    exit 1
fi
./{base_name} "$@"
"#
    )
}

#[cfg(unix)]
async fn mark_executable(path: &std::path::Path) {
    use std::os::unix::fs::PermissionsExt;
    if let Err(e) =
        tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).await
    {
        log::warn!("could not mark {} executable: {}", path.display(), e);
    }
}

#[cfg(not(unix))]
async fn mark_executable(_path: &std::path::Path) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_script_enforces_argument_contract() {
        let script = batch_script("app");
        assert!(script.starts_with("@echo off"));
        assert!(script.contains("if \"%1\"==\"\""));
        assert!(script.contains("exit /b 1"));
        assert!(script.contains("app.exe %*"));
    }

    #[test]
    fn shell_script_enforces_argument_contract() {
        let script = shell_script("app");
        assert!(script.starts_with("#!/bin/sh"));
        assert!(script.contains("if [ -z \"$1\" ]"));
        assert!(script.contains("exit 1"));
        assert!(script.contains("./app \"$@\""));
    }
}
