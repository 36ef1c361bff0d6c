//! Build target types and the fixed platform matrix.

use crate::dist::group::PlatformKey;
use std::fmt;

/// Operating system family for target binaries.
///
/// The string form of each variant is the token embedded in output
/// filenames, so it is part of the naming contract consumed by downstream
/// tooling.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetOs {
    /// Windows - binaries carry an `.exe` extension
    Windows,
    /// Linux
    Linux,
    /// macOS
    Darwin,
}

impl TargetOs {
    /// Returns the filename token for this OS.
    pub const fn as_str(self) -> &'static str {
        match self {
            TargetOs::Windows => "windows",
            TargetOs::Linux => "linux",
            TargetOs::Darwin => "darwin",
        }
    }

    /// Returns the binary extension this OS family requires.
    ///
    /// Empty for every family except Windows.
    pub const fn binary_ext(self) -> &'static str {
        match self {
            TargetOs::Windows => ".exe",
            TargetOs::Linux | TargetOs::Darwin => "",
        }
    }

    /// True for OS families that use batch-style run scripts.
    pub const fn is_windows_family(self) -> bool {
        matches!(self, TargetOs::Windows)
    }
}

impl fmt::Display for TargetOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CPU architecture for target binaries.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize)]
pub enum Arch {
    /// x86_64 / AMD64 (64-bit)
    #[serde(rename = "amd64")]
    Amd64,
    /// x86 / i686 (32-bit)
    #[serde(rename = "386")]
    X86,
    /// AArch64 / ARM64 (64-bit)
    #[serde(rename = "arm64")]
    Arm64,
}

impl Arch {
    /// Returns the filename token for this architecture.
    pub const fn as_str(self) -> &'static str {
        match self {
            Arch::Amd64 => "amd64",
            Arch::X86 => "386",
            Arch::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One (OS, architecture, binary extension) triple to build for.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize)]
pub struct Target {
    /// Operating system family
    pub os: TargetOs,
    /// CPU architecture
    pub arch: Arch,
    /// Binary extension, non-empty only where the OS requires one
    pub binary_ext: &'static str,
}

/// The fixed release matrix, in build order.
const MATRIX: [Target; 6] = [
    Target::new(TargetOs::Windows, Arch::Amd64),
    Target::new(TargetOs::Windows, Arch::X86),
    Target::new(TargetOs::Linux, Arch::Amd64),
    Target::new(TargetOs::Linux, Arch::X86),
    Target::new(TargetOs::Darwin, Arch::Amd64),
    Target::new(TargetOs::Darwin, Arch::Arm64),
];

impl Target {
    /// Creates a target; the binary extension follows from the OS family.
    pub const fn new(os: TargetOs, arch: Arch) -> Self {
        Self {
            os,
            arch,
            binary_ext: os.binary_ext(),
        }
    }

    /// Returns the fixed, ordered target matrix.
    ///
    /// The same set is returned on every call; `(os, arch)` pairs are
    /// unique within it.
    pub fn matrix() -> &'static [Target] {
        &MATRIX
    }

    /// Derives the canonical output filename for this target.
    ///
    /// The `{base}_{os}_{arch}{ext}` form is a contract: downstream tooling
    /// parses these names, so it must be preserved bit-exact.
    pub fn output_name(&self, base_name: &str) -> String {
        format!(
            "{}_{}_{}{}",
            base_name,
            self.os.as_str(),
            self.arch.as_str(),
            self.binary_ext
        )
    }

    /// Derives the extension-independent platform key for this target.
    pub fn platform_key(&self) -> PlatformKey {
        PlatformKey::of(self.os, self.arch)
    }

    /// Binary extensions that can appear on artifacts of any known target.
    ///
    /// Used when reconstructing platform keys from filenames, so stripping
    /// never guesses at suffix lengths.
    pub fn known_extensions() -> impl Iterator<Item = &'static str> {
        MATRIX
            .iter()
            .map(|t| t.binary_ext)
            .filter(|ext| !ext.is_empty())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_is_stable_and_unique() {
        let first = Target::matrix();
        let second = Target::matrix();
        assert_eq!(first, second);

        let mut pairs: Vec<_> = first.iter().map(|t| (t.os, t.arch)).collect();
        pairs.sort_by_key(|(os, arch)| (os.as_str(), arch.as_str()));
        pairs.dedup();
        assert_eq!(pairs.len(), first.len(), "duplicate (os, arch) pair in matrix");
    }

    #[test]
    fn output_names_follow_the_contract() {
        let windows = Target::new(TargetOs::Windows, Arch::X86);
        assert_eq!(windows.output_name("app"), "app_windows_386.exe");

        let darwin = Target::new(TargetOs::Darwin, Arch::Arm64);
        assert_eq!(darwin.output_name("app"), "app_darwin_arm64");
    }

    #[test]
    fn platform_keys_are_extension_independent() {
        let windows = Target::new(TargetOs::Windows, Arch::Amd64);
        let linux = Target::new(TargetOs::Linux, Arch::Amd64);
        assert_eq!(windows.platform_key().as_str(), "windows_amd64");
        assert_eq!(linux.platform_key().as_str(), "linux_amd64");
    }

    #[test]
    fn only_windows_requires_an_extension() {
        for target in Target::matrix() {
            if target.os.is_windows_family() {
                assert_eq!(target.binary_ext, ".exe");
            } else {
                assert_eq!(target.binary_ext, "");
            }
        }
    }
}
