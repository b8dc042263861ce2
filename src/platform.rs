//! Host platform detection.
//!
//! Two questions get answered here:
//! - **Which CPU family is this?** Casks that ship separate Apple Silicon and
//!   Intel artifacts declare `sha256 arm: "...", intel: "..."`, and the host
//!   decides which one applies.
//! - **Which macOS release is this?** Homebrew names bottles and cached
//!   downloads after the release codename (`big_sur`, `arm64_sonoma`, ...).
//!
//! # Examples
//!
//! ```no_run
//! use vtsum::platform;
//!
//! fn main() -> anyhow::Result<()> {
//!     println!("arch tag: {}", platform::host_arch_tag());
//!     // Output: "arm" on Apple Silicon, "intel" on x86_64
//!
//!     let codename = platform::macos_codename()?;
//!     println!("codename: {}", codename);
//!     // Output: "arm64_sequoia" on an M3 Mac with macOS 15
//!
//!     Ok(())
//! }
//! ```

use crate::error::{Error, Result};
use std::process::Command;

const SW_VERS: &str = "sw_vers -productVersion";

/// CPU families Homebrew casks distinguish between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostArchitecture {
    Arm,
    Intel,
}

impl HostArchitecture {
    /// Map an architecture tag to a known family.
    ///
    /// Accepts the cask keys (`arm`, `intel`) as well as the Rust / uname
    /// spellings of the same CPUs.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "arm" | "arm64" | "aarch64" => Some(HostArchitecture::Arm),
            "intel" | "x86_64" => Some(HostArchitecture::Intel),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            HostArchitecture::Arm => "arm",
            HostArchitecture::Intel => "intel",
        }
    }

    /// Architecture of the running host, if it is one casks know about
    pub fn current() -> Option<Self> {
        Self::from_tag(std::env::consts::ARCH)
    }
}

/// Architecture tag of the running host.
///
/// Returns `"arm"` or `"intel"` on supported hosts and the raw Rust
/// architecture name (e.g. `"riscv64"`) everywhere else, so a per-architecture
/// checksum lookup can report what the host actually is.
pub fn host_arch_tag() -> String {
    match HostArchitecture::current() {
        Some(arch) => arch.tag().to_string(),
        None => std::env::consts::ARCH.to_string(),
    }
}

/// Homebrew's codename for the running macOS release.
///
/// Prefixed with `arm64_` on anything but x86_64, matching Homebrew's bottle
/// tags (`arm64_sonoma`, `big_sur`).
///
/// # Errors
///
/// Returns an error if `sw_vers` is unavailable (including on non-macOS hosts)
/// or reports a release this table does not know.
pub fn macos_codename() -> Result<String> {
    let version = macos_version()?;
    codename_for(&version, std::env::consts::ARCH).ok_or_else(|| {
        Error::ExternalCommandFailure {
            command: SW_VERS.to_string(),
            reason: format!("Unrecognized macOS version: {version}"),
        }
    })
}

fn macos_version() -> Result<String> {
    let command = SW_VERS;
    let output = Command::new("sw_vers")
        .arg("-productVersion")
        .output()
        .map_err(|e| Error::ExternalCommandFailure {
            command: command.to_string(),
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(Error::ExternalCommandFailure {
            command: command.to_string(),
            reason: format!("exited with {}", output.status),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Codename for a macOS product version on the given architecture.
///
/// `None` for releases this table does not know.
pub fn codename_for(version: &str, arch: &str) -> Option<String> {
    let name = release_name(version)?;

    if arch == "x86_64" {
        Some(name.to_string())
    } else {
        Some(format!("arm64_{name}"))
    }
}

fn release_name(version: &str) -> Option<&'static str> {
    let mut parts = version.split('.');
    let major: u32 = parts.next()?.parse().ok()?;

    if major == 10 {
        // 10.16 is what Big Sur reports to software built against older SDKs
        let minor: u32 = parts.next()?.parse().ok()?;
        return match minor {
            14 => Some("mojave"),
            15 => Some("catalina"),
            16 => Some("big_sur"),
            _ => None,
        };
    }

    match major {
        26 | 16 => Some("tahoe"),
        15 => Some("sequoia"),
        14 => Some("sonoma"),
        13 => Some("ventura"),
        12 => Some("monterey"),
        11 => Some("big_sur"),
        _ => None,
    }
}
