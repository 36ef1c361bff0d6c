//! Configuration file loading.
//!
//! Pipeline settings can come from an optional TOML file so invocations
//! stay short; command-line flags override anything set here. The file is
//! looked up at `distforge.toml` in the working directory unless a path is
//! given explicitly.
//!
//! ```toml
//! [package]
//! name = "app"
//!
//! [build]
//! entry = "./cmd/app"
//! toolchain = "go"
//! args = ["build", "-o"]
//! os-var = "GOOS"
//! arch-var = "GOARCH"
//!
//! [assets]
//! docs = ["README.md", "LICENSE"]
//! examples = "examples/*.bas"
//!
//! [output]
//! dist-dir = "dist"
//! package-dir = "packages"
//! ```

use crate::error::{CliError, Result};
use std::path::{Path, PathBuf};

/// Default configuration file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "distforge.toml";

/// Root of the configuration file.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigFile {
    /// `[package]` section
    #[serde(default)]
    pub package: PackageSection,

    /// `[build]` section
    #[serde(default)]
    pub build: BuildSection,

    /// `[assets]` section
    #[serde(default)]
    pub assets: AssetsSection,

    /// `[output]` section
    #[serde(default)]
    pub output: OutputSection,
}

/// Product identity.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PackageSection {
    /// Product base name; the leading token of every artifact filename
    pub name: Option<String>,
}

/// Toolchain and build configuration.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildSection {
    /// Source entry point handed to the toolchain
    pub entry: Option<PathBuf>,

    /// Toolchain program
    pub toolchain: Option<String>,

    /// Argument template inserted before the output path
    #[serde(default)]
    pub args: Vec<String>,

    /// Environment variable selecting the target OS
    pub os_var: Option<String>,

    /// Environment variable selecting the target architecture
    pub arch_var: Option<String>,

    /// Per-target build timeout in seconds
    pub timeout_secs: Option<u64>,
}

/// Common asset configuration.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AssetsSection {
    /// Fixed documentation files bundled into every archive
    pub docs: Option<Vec<PathBuf>>,

    /// Glob pattern selecting example files
    pub examples: Option<String>,
}

/// Directory layout configuration.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputSection {
    /// Distribution root directory
    pub dist_dir: Option<PathBuf>,

    /// Package directory
    pub package_dir: Option<PathBuf>,
}

/// Loads a configuration file from an explicit path.
pub fn load(path: &Path) -> Result<ConfigFile> {
    let raw = std::fs::read_to_string(path).map_err(|e| CliError::InvalidArguments {
        reason: format!("cannot read config file {}: {}", path.display(), e),
    })?;
    Ok(toml::from_str(&raw)?)
}

/// Loads `distforge.toml` from the working directory when present.
pub fn load_default() -> Result<Option<ConfigFile>> {
    let path = Path::new(DEFAULT_CONFIG_FILE);
    if path.is_file() {
        load(path).map(Some)
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_config_round_trips() {
        let config: ConfigFile = toml::from_str(
            r#"
            [package]
            name = "app"

            [build]
            entry = "./cmd/app"
            toolchain = "go"
            args = ["build", "-o"]
            os-var = "GOOS"
            arch-var = "GOARCH"
            timeout-secs = 300

            [assets]
            docs = ["README.md", "LICENSE"]
            examples = "examples/*.bas"

            [output]
            dist-dir = "out/dist"
            package-dir = "out/packages"
            "#,
        )
        .unwrap();

        assert_eq!(config.package.name.as_deref(), Some("app"));
        assert_eq!(config.build.toolchain.as_deref(), Some("go"));
        assert_eq!(config.build.args, vec!["build", "-o"]);
        assert_eq!(config.build.os_var.as_deref(), Some("GOOS"));
        assert_eq!(config.build.timeout_secs, Some(300));
        assert_eq!(config.assets.examples.as_deref(), Some("examples/*.bas"));
        assert_eq!(
            config.output.dist_dir.as_deref(),
            Some(Path::new("out/dist"))
        );
    }

    #[test]
    fn empty_config_is_valid() {
        let config: ConfigFile = toml::from_str("").unwrap();
        assert!(config.package.name.is_none());
        assert!(config.build.args.is_empty());
    }
}
