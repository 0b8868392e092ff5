//! Directory walk and asset selection.

use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::content_type::content_type_for;

/// A file selected for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRecord {
    pub path: PathBuf,
    /// Path relative to the walk root, `/`-separated
    pub key: String,
    pub content_type: &'static str,
}

/// Object key for `path`: its path under `root` with `/` separators.
///
/// Returns `None` when `path` is not inside `root`, is the root itself, or
/// has a component that is not valid UTF-8.
pub fn relative_key(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;

    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(segment) => segments.push(segment.to_str()?.to_string()),
            Component::CurDir => {}
            _ => return None,
        }
    }

    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}

/// Lazy depth-first walk yielding files whose name ends with `extension`.
///
/// Non-matching files are counted as skipped. Unreadable entries and files
/// whose path cannot form a key are logged and counted as errors. Neither
/// stops the walk.
pub struct AssetWalk {
    root: PathBuf,
    extension: String,
    entries: walkdir::IntoIter,
    skipped: usize,
    errors: usize,
}

impl AssetWalk {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        let root = root.into();
        let entries = WalkDir::new(&root).sort_by_file_name().into_iter();
        Self {
            root,
            extension: extension.into(),
            entries,
            skipped: 0,
            errors: 0,
        }
    }

    /// Files seen so far that did not match the extension.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Entries that could not be read or mapped to a key.
    pub fn errors(&self) -> usize {
        self.errors
    }
}

impl Iterator for AssetWalk {
    type Item = AssetRecord;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable directory entry");
                    self.errors += 1;
                    continue;
                }
            };

            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());
            if !is_file {
                continue;
            }

            let path = entry.into_path();
            let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
                tracing::warn!(path = %path.display(), "Skipping file with non-UTF-8 name");
                self.errors += 1;
                continue;
            };
            if !name.ends_with(&self.extension) {
                tracing::debug!(path = %path.display(), "Skipping non-matching file");
                self.skipped += 1;
                continue;
            }

            let Some(key) = relative_key(&self.root, &path) else {
                tracing::warn!(path = %path.display(), "Skipping file with no valid object key");
                self.errors += 1;
                continue;
            };

            return Some(AssetRecord {
                content_type: content_type_for(&path),
                key,
                path,
            });
        }
    }
}
