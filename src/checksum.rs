//! SHA-256 extraction from formula and cask descriptors.
//!
//! Homebrew has declared checksums in several shapes over time. The rules
//! below are tried in order and the first hit wins:
//!
//! 1. Multi-language casks (firefox and friends) declare one checksum per
//!    `language` block; the block marked `default: true` is authoritative.
//! 2. A plain `sha256 "<hex>"` line. In formulae this is the source tarball
//!    checksum. Bottle checksums live in `sha256 cellar: ..., arm64_sonoma:
//!    "..."` lines, which this rule never matches.
//! 3. Casks shipping separate Apple Silicon and Intel artifacts:
//!
//! ```text
//!   sha256 arm:   "<hex>",
//!          intel: "<hex>"
//! ```
//!
//! Order matters: rule 2 would also hit the checksum inside a language block,
//! but that may not be the default language.

use crate::descriptor::{self, DescriptorKind};
use crate::error::{Error, Result};
use crate::platform::HostArchitecture;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use tracing::trace;

static DEFAULT_LANGUAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)default: true do\n(?:  )+sha256 "([a-f0-9]{64})"$"#)
        .expect("valid default language pattern")
});

static SINGLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^(?:  )+sha256 "([a-f0-9]{64})"$"#).expect("valid sha256 pattern")
});

static ARCH_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?m)^ *sha256 arm: +"(?P<arm>[a-f0-9]{64})",[ \t]*\n?[ \t]*intel: +"(?P<intel>[a-f0-9]{64})"$"#,
    )
    .expect("valid arm/intel pattern")
});

/// A checksum as declared by a descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Checksum {
    Single(String),
    PerArchitecture { arm: String, intel: String },
}

impl Checksum {
    /// Pick the checksum that applies on a host with architecture tag `arch`.
    ///
    /// `arch` is a raw tag (`"arm"`, `"intel"`, or whatever the host reports);
    /// a per-architecture checksum fails for anything but the two known tags.
    pub fn for_arch(&self, arch: &str) -> Result<&str> {
        match self {
            Checksum::Single(sha256) => Ok(sha256.as_str()),
            Checksum::PerArchitecture { arm, intel } => match HostArchitecture::from_tag(arch) {
                Some(HostArchitecture::Arm) => Ok(arm.as_str()),
                Some(HostArchitecture::Intel) => Ok(intel.as_str()),
                None => Err(Error::AmbiguousArchitectureResult {
                    arch: arch.to_string(),
                }),
            },
        }
    }
}

/// Extract the checksum declared in a formula or cask.
///
/// Fails with [`Error::UnrecognizedDescriptor`] before any checksum rule runs
/// if `content` is neither a formula nor a cask.
pub fn extract_checksum(content: &str) -> Result<Checksum> {
    let kind = descriptor::classify(content).ok_or(Error::UnrecognizedDescriptor)?;
    extract_classified(content, kind)
}

fn extract_classified(content: &str, kind: DescriptorKind) -> Result<Checksum> {
    if let Some(caps) = DEFAULT_LANGUAGE.captures(content) {
        trace!("{} checksum taken from default language block", kind);
        return Ok(Checksum::Single(caps[1].to_string()));
    }

    if let Some(caps) = SINGLE.captures(content) {
        trace!("{} checksum taken from sha256 line", kind);
        return Ok(Checksum::Single(caps[1].to_string()));
    }

    if let Some(caps) = ARCH_PAIR.captures(content) {
        trace!("{} checksum taken from arm/intel pair", kind);
        return Ok(Checksum::PerArchitecture {
            arm: caps["arm"].to_string(),
            intel: caps["intel"].to_string(),
        });
    }

    Err(Error::ChecksumNotFound)
}

/// Whether `value` looks like a SHA-256 hex digest as Homebrew writes them
#[cfg(test)]
pub(crate) fn is_sha256_hex(value: &str) -> bool {
    value.len() == 64 && value.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
