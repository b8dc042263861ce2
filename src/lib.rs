//! Library interface for vtsum
//!
//! Finds the formula or cask descriptor for a Homebrew package in the local
//! taps, pulls the SHA-256 it declares, and asks `brew` where the downloaded
//! artifact lives, so either can be checked against VirusTotal.

pub mod brew;
pub mod browser;
pub mod checksum;
pub mod descriptor;
pub mod downloads;
pub mod error;
pub mod hashing;
pub mod locator;
pub mod package_ref;
pub mod platform;
pub mod report;
pub mod resolver;

// Re-export commonly used types
pub use brew::{Brew, SystemBrew};
pub use checksum::{Checksum, extract_checksum};
pub use descriptor::{DescriptorKind, DescriptorMatch, classify};
pub use error::{Error, ErrorKind, Result};
pub use package_ref::PackageRef;
pub use platform::HostArchitecture;
pub use report::Report;
pub use resolver::{Classification, DescriptorChecksum, Resolver};
