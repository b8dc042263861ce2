//! Formula and cask descriptor classification.
//!
//! Homebrew descriptors are Ruby files. A formula opens with
//! `class Name < Formula`, a cask with `cask "token" do`. Anything else found
//! under a tap with the right file name (helper scripts, commands, cmd
//! extensions) is not a descriptor and gets skipped.

use crate::package_ref::NAME_CLASS;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::sync::LazyLock;

static FORMULA_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\Aclass [a-zA-Z0-9]+ < Formula\n").expect("valid formula header pattern")
});

static CASK_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r#"\Acask "{NAME_CLASS}" do\n"#)).expect("valid cask header pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptorKind {
    Formula,
    Cask,
}

impl DescriptorKind {
    pub fn noun(&self) -> &'static str {
        match self {
            DescriptorKind::Formula => "formula",
            DescriptorKind::Cask => "cask",
        }
    }

    /// `brew` flag restricting a command to this kind
    pub fn brew_flag(&self) -> &'static str {
        match self {
            DescriptorKind::Formula => "--formula",
            DescriptorKind::Cask => "--cask",
        }
    }
}

impl fmt::Display for DescriptorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// A descriptor file found in a tap along with its kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorMatch {
    pub path: PathBuf,
    pub kind: DescriptorKind,
}

/// Decide whether `content` is a formula, a cask, or neither.
///
/// Only the very start of the file is inspected.
pub fn classify(content: &str) -> Option<DescriptorKind> {
    if FORMULA_HEADER.is_match(content) {
        Some(DescriptorKind::Formula)
    } else if CASK_HEADER.is_match(content) {
        Some(DescriptorKind::Cask)
    } else {
        None
    }
}
