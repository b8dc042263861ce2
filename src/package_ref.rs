//! Formula / cask name parsing.
//!
//! A package is named either by its bare name (`wget`, `python@3.12`) or fully
//! qualified by the tap it lives in (`user/repo/name`). Qualification only
//! narrows the directory that gets searched; the file looked for is always
//! `<name>.rb`.

use crate::error::{Error, Result};
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;

/// Character class shared by tap owners, tap repositories, formula and cask names.
pub(crate) const NAME_CLASS: &str = "[A-Za-z0-9@._-]+";

static BARE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{NAME_CLASS}$")).expect("valid name pattern"));

static QUALIFIED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^({NAME_CLASS})/({NAME_CLASS})/({NAME_CLASS})$"))
        .expect("valid qualified name pattern")
});

/// The tap part of a qualified package name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tap {
    pub owner: String,
    /// Repository name without the `homebrew-` prefix
    pub repo: String,
}

impl Tap {
    /// Directory of this tap below the Taps directory: `<owner>/homebrew-<repo>`
    pub fn directory(&self, taps_dir: &Path) -> PathBuf {
        taps_dir
            .join(&self.owner)
            .join(format!("homebrew-{}", self.repo))
    }
}

/// A validated formula or cask name, optionally tap-qualified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRef {
    name: String,
    tap: Option<Tap>,
}

impl PackageRef {
    /// Validate and split a user-supplied name.
    ///
    /// Never touches the filesystem, so a bad name is rejected before any tap
    /// lookup happens.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || Error::InvalidPackageReference(input.to_string());

        if let Some(caps) = QUALIFIED_NAME.captures(input) {
            let owner = &caps[1];
            let repo = &caps[2];
            let name = &caps[3];
            // "." and ".." fit the character class but would walk out of the Taps directory
            if [owner, repo, name].iter().any(|s| is_dot_segment(s)) {
                return Err(invalid());
            }
            return Ok(Self {
                name: name.to_string(),
                tap: Some(Tap {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                }),
            });
        }

        if BARE_NAME.is_match(input) && !is_dot_segment(input) {
            return Ok(Self {
                name: input.to_string(),
                tap: None,
            });
        }

        Err(invalid())
    }

    /// Formula / cask token without any tap qualification
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tap(&self) -> Option<&Tap> {
        self.tap.as_ref()
    }

    /// Descriptor file name looked for during the tap search
    pub fn file_name(&self) -> String {
        format!("{}.rb", self.name)
    }

    /// Directory to search: the tap's own directory when qualified, otherwise every tap
    pub fn search_root(&self, taps_dir: &Path) -> PathBuf {
        match &self.tap {
            Some(tap) => tap.directory(taps_dir),
            None => taps_dir.to_path_buf(),
        }
    }
}

fn is_dot_segment(segment: &str) -> bool {
    segment == "." || segment == ".."
}

impl FromStr for PackageRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PackageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tap {
            Some(tap) => write!(f, "{}/{}/{}", tap.owner, tap.repo, self.name),
            None => f.write_str(&self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_bare_name() {
        let pkg = PackageRef::parse("python@3.9").unwrap();
        assert_eq!(pkg.name(), "python@3.9");
        assert!(pkg.tap().is_none());
        assert_eq!(pkg.file_name(), "python@3.9.rb");
    }

    #[test]
    fn test_parse_qualified_name() {
        let pkg = PackageRef::parse("clintmod/formulas/macprefs").unwrap();
        assert_eq!(pkg.name(), "macprefs");
        let tap = pkg.tap().unwrap();
        assert_eq!(tap.owner, "clintmod");
        assert_eq!(tap.repo, "formulas");
        assert_eq!(pkg.to_string(), "clintmod/formulas/macprefs");
    }

    #[test]
    fn test_search_root() {
        let taps = Path::new("/opt/homebrew/Library/Taps");

        let bare = PackageRef::parse("docker").unwrap();
        assert_eq!(bare.search_root(taps), taps);

        let qualified = PackageRef::parse("tddschn/tddschn/aliwangwang").unwrap();
        assert_eq!(
            qualified.search_root(taps),
            taps.join("tddschn/homebrew-tddschn")
        );
    }

    #[test]
    fn test_parse_invalid() {
        for input in [
            "",
            "user/docker",
            "a/b/c/d",
            "docker/",
            "/docker",
            "has space",
            "semi;colon",
            "star*",
            "..",
            "../../etc",
            "owner/../name",
        ] {
            let err = PackageRef::parse(input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidPackageReference, "{input:?}");
        }
    }

    #[test]
    fn test_file_name_is_case_sensitive() {
        let pkg: PackageRef = "Docker".parse().unwrap();
        assert_eq!(pkg.file_name(), "Docker.rb");
    }
}
