//! Finding descriptor files in tap checkouts.
//!
//! Taps lay descriptors out in different ways: `Formula/foo.rb`,
//! `Formula/f/foo.rb`, `Casks/f/foo.rb`, or straight at the repository root.
//! Rather than encode every layout, the whole tree below the search root is
//! walked for a file with the exact name.

use crate::error::Result;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{trace, warn};
use walkdir::{DirEntry, WalkDir};

/// Every file called `file_name` below `root`, in traversal order.
///
/// Siblings are visited in file-name order so the result is stable across
/// runs. A missing root (e.g. an untapped tap) yields no matches.
pub fn locate(root: &Path, file_name: &str) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        trace!("Search root {} does not exist", root.display());
        return Ok(vec![]);
    }

    let wanted = OsStr::new(file_name);
    let mut matches = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .max_open(64)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_git_dir(entry));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() > 0 => {
                warn!("Skipping unreadable tap entry: {}", err);
                continue;
            }
            Err(err) => return Err(err.into()),
        };

        if entry.file_name() == wanted && is_file(&entry) {
            trace!("Candidate descriptor: {}", entry.path().display());
            matches.push(entry.into_path());
        }
    }

    Ok(matches)
}

fn is_git_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_type().is_dir() && entry.file_name() == ".git"
}

fn is_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
}
