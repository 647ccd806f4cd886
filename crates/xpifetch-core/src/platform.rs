//! Host operating-system detection and catalog platform tokens.
//!
//! The catalog labels each install with an `os` attribute (`ALL`, `Linux`,
//! `WINNT`, `Darwin`). The host is mapped onto the same vocabulary so that
//! eligibility is a plain equality check.

use std::fmt;

/// Operating system as understood by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatingSystem {
    Linux,
    WindowsNt,
    Darwin,
}

impl OperatingSystem {
    /// Detects the operating system this binary runs on.
    pub fn detect() -> Self {
        Self::from_platform_id(std::env::consts::OS)
    }

    /// Maps a runtime platform identifier to a catalog operating system.
    ///
    /// Accepts Rust's `std::env::consts::OS` values as well as the common
    /// `win32` / `darwin` spellings. Every unrecognized platform is treated as
    /// Linux.
    pub fn from_platform_id(platform: &str) -> Self {
        match platform {
            "windows" | "win32" => OperatingSystem::WindowsNt,
            "macos" | "darwin" => OperatingSystem::Darwin,
            _ => OperatingSystem::Linux,
        }
    }

    /// Token used for this OS in the catalog's `os` attribute.
    pub fn catalog_token(self) -> &'static str {
        match self {
            OperatingSystem::Linux => "Linux",
            OperatingSystem::WindowsNt => "WINNT",
            OperatingSystem::Darwin => "Darwin",
        }
    }
}

impl fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.catalog_token())
    }
}

/// Platform an install entry targets, parsed from its `os` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogPlatform {
    /// Installable on every platform.
    All,
    Os(OperatingSystem),
    /// Token outside the known set (or a missing attribute). Never eligible.
    Unrecognized(String),
}

impl CatalogPlatform {
    /// Parses an `os` attribute value. Matching is case-sensitive.
    pub fn from_token(token: &str) -> Self {
        match token {
            "ALL" => CatalogPlatform::All,
            "Linux" => CatalogPlatform::Os(OperatingSystem::Linux),
            "WINNT" => CatalogPlatform::Os(OperatingSystem::WindowsNt),
            "Darwin" => CatalogPlatform::Os(OperatingSystem::Darwin),
            other => CatalogPlatform::Unrecognized(other.to_string()),
        }
    }

    /// True if an install for this platform may be used on `host`.
    pub fn is_eligible_for(&self, host: OperatingSystem) -> bool {
        match self {
            CatalogPlatform::All => true,
            CatalogPlatform::Os(os) => *os == host,
            CatalogPlatform::Unrecognized(_) => false,
        }
    }
}

impl fmt::Display for CatalogPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogPlatform::All => f.write_str("ALL"),
            CatalogPlatform::Os(os) => write!(f, "{}", os),
            CatalogPlatform::Unrecognized(token) => write!(f, "{:?}", token),
        }
    }
}
