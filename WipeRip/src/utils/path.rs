//! Path utilities

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Find `name` inside `dir`, ignoring case.
///
/// Game discs use upper-case names but extracted copies are often lowered.
/// An exact match wins over a case-insensitive one.
pub fn find_file<P: AsRef<Path>>(dir: P, name: &str) -> Option<PathBuf> {
    let dir = dir.as_ref();
    let exact = dir.join(name);
    if exact.is_file() {
        return Some(exact);
    }
    std::fs::read_dir(dir)
        .ok()?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .find(|path| {
            path.is_file()
                && path
                    .file_name()
                    .is_some_and(|n| n.to_string_lossy().eq_ignore_ascii_case(name))
        })
}

/// Like [`find_file`], but a missing file is an [`Error::MissingInput`].
pub fn require_file<P: AsRef<Path>>(dir: P, name: &str) -> Result<PathBuf> {
    let dir = dir.as_ref();
    find_file(dir, name).ok_or_else(|| Error::MissingInput {
        path: dir.join(name),
    })
}

/// Whether `path` has extension `ext`, ignoring case.
pub fn has_extension<P: AsRef<Path>>(path: P, ext: &str) -> bool {
    path.as_ref()
        .extension()
        .is_some_and(|e| e.to_string_lossy().eq_ignore_ascii_case(ext))
}

/// Upper-cased file stem, used to pair `NAME.CMP` with `NAME.PRM`.
pub fn asset_stem<P: AsRef<Path>>(path: P) -> Option<String> {
    path.as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().to_uppercase())
}
