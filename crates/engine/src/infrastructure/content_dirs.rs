//! Discovery of installed mods and adventures.
//!
//! Each immediate subdirectory of `<data>/mods` or `<data>/adventures` is one
//! package; its name is the directory name.

use std::path::{Path, PathBuf};
use tracing::warn;

/// One installed mod or adventure directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPackage {
    pub name: String,
    pub dir: PathBuf,
}

/// List package directories under `root`, sorted by name.
///
/// A missing root yields nothing. Hidden directories and plain files are
/// ignored.
pub fn discover_packages(root: &Path) -> Vec<ContentPackage> {
    let entries = match std::fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            warn!(path = %root.display(), error = %e, "Failed to list content directory");
            return Vec::new();
        }
    };

    let mut packages: Vec<ContentPackage> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_dir()))
        .filter_map(|entry| {
            let name = entry.file_name().to_str()?.to_string();
            (!name.starts_with('.')).then(|| ContentPackage {
                name,
                dir: entry.path(),
            })
        })
        .collect();
    packages.sort_by(|a, b| a.name.cmp(&b.name));
    packages
}
