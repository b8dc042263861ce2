//! Resolving a package name to its descriptor, declared checksum, or cached
//! download.
//!
//! Every call re-reads the tap tree and re-runs `brew`: taps change under our
//! feet whenever the user runs `brew update`, and a stale checksum is worse
//! than a slow one.
//!
//! # Formula / cask precedence
//!
//! A name can exist as both a formula and a cask (`docker` is the CLI formula
//! and the Docker Desktop cask). Unless the cask is explicitly asked for, the
//! formula wins.
//!
//! # Examples
//!
//! ```no_run
//! use vtsum::Resolver;
//!
//! fn main() -> vtsum::Result<()> {
//!     let resolver = Resolver::new();
//!
//!     let path = resolver.resolve_descriptor_path("docker", false)?;
//!     println!("formula: {}", path.display());
//!
//!     let sha256 = resolver.resolve_checksum("docker", true)?;
//!     println!("cask checksum: {}", sha256);
//!
//!     Ok(())
//! }
//! ```

use crate::brew::{self, Brew, SystemBrew};
use crate::checksum::{self, Checksum};
use crate::descriptor::{self, DescriptorKind, DescriptorMatch};
use crate::error::{Error, Result};
use crate::locator;
use crate::package_ref::PackageRef;
use crate::platform;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Descriptors found for one package name, split by kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Formula files in traversal order
    pub formulae: Vec<PathBuf>,
    /// Cask files in traversal order
    pub casks: Vec<PathBuf>,
}

impl Classification {
    pub fn has_formula(&self) -> bool {
        !self.formulae.is_empty()
    }

    pub fn has_cask(&self) -> bool {
        !self.casks.is_empty()
    }

    /// Whether the name exists both as a formula and as a cask
    pub fn is_ambiguous(&self) -> bool {
        self.has_formula() && self.has_cask()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_formula() && !self.has_cask()
    }

    fn push(&mut self, found: DescriptorMatch) {
        match found.kind {
            DescriptorKind::Formula => self.formulae.push(found.path),
            DescriptorKind::Cask => self.casks.push(found.path),
        }
    }

    /// Pick the winning descriptor.
    ///
    /// With `prefer_cask` only a cask will do. Otherwise the first formula,
    /// then the first cask.
    pub fn select(&self, prefer_cask: bool) -> Option<DescriptorMatch> {
        if prefer_cask {
            return first_match(&self.casks, DescriptorKind::Cask);
        }

        first_match(&self.formulae, DescriptorKind::Formula)
            .or_else(|| first_match(&self.casks, DescriptorKind::Cask))
    }
}

fn first_match(paths: &[PathBuf], kind: DescriptorKind) -> Option<DescriptorMatch> {
    paths.first().map(|path| DescriptorMatch {
        path: path.clone(),
        kind,
    })
}

/// Checksum declared by a package's descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescriptorChecksum {
    pub path: PathBuf,
    pub kind: DescriptorKind,
    /// The checksum that applies on this host
    pub sha256: String,
    /// Everything the descriptor declared
    pub declared: Checksum,
}

/// Resolves package names against the local tap tree
#[derive(Debug, Clone)]
pub struct Resolver<B = SystemBrew> {
    brew: B,
    arch: String,
}

impl Resolver<SystemBrew> {
    /// Resolver for the running host, talking to the real `brew`
    pub fn new() -> Self {
        Self::with_brew(SystemBrew::new())
    }
}

impl Default for Resolver<SystemBrew> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Brew> Resolver<B> {
    pub fn with_brew(brew: B) -> Self {
        Self {
            brew,
            arch: platform::host_arch_tag(),
        }
    }

    /// Override the host architecture tag used for per-architecture checksums
    pub fn with_arch(mut self, arch: impl Into<String>) -> Self {
        self.arch = arch.into();
        self
    }

    pub fn brew(&self) -> &B {
        &self.brew
    }

    pub fn arch(&self) -> &str {
        &self.arch
    }

    /// Descriptor candidates for `package`, unclassified
    pub fn locate(&self, package: &PackageRef) -> Result<Vec<PathBuf>> {
        let taps = brew::taps_dir(&self.brew)?;
        let root = package.search_root(&taps);
        debug!("Searching {} for {}", root.display(), package.file_name());
        locator::locate(&root, &package.file_name())
    }

    /// Locate and classify every candidate, dropping files that are not descriptors
    pub fn classify_package(&self, package: &PackageRef) -> Result<Classification> {
        let mut classification = Classification::default();

        for path in self.locate(package)? {
            let content = read_descriptor(&path)?;
            match descriptor::classify(&content) {
                Some(kind) => {
                    debug!("{} is a {}", path.display(), kind);
                    classification.push(DescriptorMatch { path, kind });
                }
                None => debug!("{} is not a formula or cask, skipping", path.display()),
            }
        }

        Ok(classification)
    }

    /// The descriptor that `name` resolves to
    pub fn resolve_descriptor(&self, name: &str, prefer_cask: bool) -> Result<DescriptorMatch> {
        let package = PackageRef::parse(name)?;
        let classification = self.classify_package(&package)?;

        classification
            .select(prefer_cask)
            .ok_or_else(|| Error::NotFound {
                name: package.to_string(),
                kind: prefer_cask.then_some(DescriptorKind::Cask),
            })
    }

    /// Path of the descriptor that `name` resolves to
    pub fn resolve_descriptor_path(&self, name: &str, prefer_cask: bool) -> Result<PathBuf> {
        self.resolve_descriptor(name, prefer_cask).map(|found| found.path)
    }

    /// Resolve `name` and extract its checksum, keeping the descriptor details
    pub fn resolve_descriptor_checksum(
        &self,
        name: &str,
        prefer_cask: bool,
    ) -> Result<DescriptorChecksum> {
        let found = self.resolve_descriptor(name, prefer_cask)?;
        let content = read_descriptor(&found.path)?;
        let declared = checksum::extract_checksum(&content)?;
        let sha256 = declared.for_arch(&self.arch)?.to_string();

        Ok(DescriptorChecksum {
            path: found.path,
            kind: found.kind,
            sha256,
            declared,
        })
    }

    /// SHA-256 declared for `name`, for this host's architecture
    pub fn resolve_checksum(&self, name: &str, prefer_cask: bool) -> Result<String> {
        self.resolve_descriptor_checksum(name, prefer_cask)
            .map(|resolved| resolved.sha256)
    }

    /// Where `brew` keeps the downloaded artifact for `name`.
    ///
    /// When the name is both a formula and a cask, `--formula` is passed so
    /// the answer agrees with [`Resolver::resolve_descriptor_path`].
    pub fn resolve_cache_path(&self, name: &str, prefer_cask: bool) -> Result<PathBuf> {
        let package = PackageRef::parse(name)?;

        let flag = if prefer_cask {
            Some(DescriptorKind::Cask)
        } else if self.classify_package(&package)?.is_ambiguous() {
            Some(DescriptorKind::Formula)
        } else {
            None
        };

        let target = package.to_string();
        let output = self.brew.cache_path(flag, &target)?;
        let cache_path = output.trim();
        if cache_path.is_empty() {
            let command = match flag {
                Some(kind) => format!("brew --cache {} {}", kind.brew_flag(), target),
                None => format!("brew --cache {}", target),
            };
            return Err(Error::ExternalCommandFailure {
                command,
                reason: format!("no cache path reported for {}", target),
            });
        }

        Ok(PathBuf::from(cache_path))
    }
}

fn read_descriptor(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| Error::ReadDescriptor {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
