//! Toolchain availability probing.

use crate::dist::settings::ToolchainSettings;

/// Resolve the toolchain program before the matrix runs.
///
/// A missing program is not fatal here - every target would record the same
/// spawn failure anyway - but one upfront diagnostic beats six identical
/// ones.
pub(super) fn probe_toolchain(toolchain: &ToolchainSettings) {
    match which::which(toolchain.program()) {
        Ok(path) => log::debug!("toolchain resolved: {}", path.display()),
        Err(e) => log::warn!(
            "toolchain `{}` not found ({}); every target build will fail",
            toolchain.program().display(),
            e
        ),
    }
}
