//! The record printed for every lookup: where the checksum came from, the
//! checksum itself, and where to look it up on VirusTotal.

use crate::descriptor::DescriptorKind;
use serde::Serialize;
use std::path::PathBuf;

pub const VIRUSTOTAL_SEARCH_URL: &str = "https://www.virustotal.com/gui/search/";

/// VirusTotal search page for a hash
pub fn virustotal_url(hash: &str) -> String {
    format!("{}{}", VIRUSTOTAL_SEARCH_URL, hash)
}

/// Outcome of one lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// File that was hashed, or the descriptor the checksum was read from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,
    /// Set when the checksum came from a formula or cask
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<DescriptorKind>,
    pub sha256: String,
    pub virustotal_url: String,
}

impl Report {
    pub fn new(file_path: Option<PathBuf>, sha256: impl Into<String>) -> Self {
        let sha256 = sha256.into();
        Self {
            file_path,
            kind: None,
            virustotal_url: virustotal_url(&sha256),
            sha256,
        }
    }

    pub fn with_kind(mut self, kind: DescriptorKind) -> Self {
        self.kind = Some(kind);
        self
    }
}
