//! Building the ordered list of files a query is checked against.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

/// Ordered set of files to search.
///
/// Explicit files come first in the order they were added, followed by the contents
/// of every directory (the default data directory first, then added directories in
/// order). Directories are walked recursively and sorted by file name, so the order
/// is stable between runs.
#[derive(Debug, Default)]
pub struct CandidateFiles {
    files: Vec<PathBuf>,
    dirs: Vec<PathBuf>,
}

impl CandidateFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a default data directory, searched before any directory argument.
    ///
    /// Missing directories are ignored without a warning.
    pub fn with_default_dir(mut self, dir: Option<PathBuf>) -> Self {
        match dir {
            Some(dir) if dir.is_dir() => self.dirs.insert(0, dir),
            Some(dir) => debug!(dir = %dir.display(), "default data directory not present"),
            None => {}
        }
        self
    }

    /// Adds a command line argument, which may name a file or a directory.
    ///
    /// Anything else is skipped with a warning.
    pub fn add(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if path.is_file() {
            self.files.push(path);
        } else if path.is_dir() {
            self.dirs.push(path);
        } else {
            warn!(path = %path.display(), "not a file or directory, skipping");
        }
    }

    /// Resolves the final list of files.
    pub fn collect(self) -> Vec<PathBuf> {
        let mut out = self.files;
        for dir in &self.dirs {
            walk(dir, &mut out);
        }
        out
    }
}

impl<P: Into<PathBuf>> Extend<P> for CandidateFiles {
    fn extend<I: IntoIterator<Item = P>>(&mut self, iter: I) {
        for path in iter {
            self.add(path);
        }
    }
}

fn walk(dir: &Path, out: &mut Vec<PathBuf>) {
    let walker = WalkDir::new(dir).follow_links(true).sort_by_file_name();
    for entry in walker {
        match entry {
            Ok(entry) if entry.file_type().is_file() => out.push(entry.into_path()),
            Ok(_) => {}
            Err(e) => warn!(dir = %dir.display(), error = %e, "skipping unreadable entry"),
        }
    }
}
