// Directory scanning front end
//
// Recursively maps a source tree into package/module nodes using the
// regex-based Python scanner. Subdirectories become subpackages, source
// files become modules, and anything else is recorded as an opaque misc
// entry by name.

pub mod python;

pub use python::PythonScanner;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::Package;
use glob::Pattern;
use std::path::Path;
use tracing::warn;
use walkdir::WalkDir;

/// Counts of discovered files, for CLI reporting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileCounts {
    /// Files with the configured source extension
    pub source: usize,
    /// Everything else
    pub misc: usize,
}

impl FileCounts {
    pub fn total(&self) -> usize {
        self.source + self.misc
    }
}

/// Scans a directory tree into a package node
pub struct Scanner {
    python: PythonScanner,
    extension: String,
    exclude: Vec<Pattern>,
}

impl Scanner {
    /// Create a scanner from configuration
    pub fn new(config: &Config) -> Result<Self> {
        let exclude = config
            .scan
            .exclude
            .iter()
            .map(|p| Pattern::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            python: PythonScanner::new()?,
            extension: config.scan.extension.clone(),
            exclude,
        })
    }

    /// Scan a directory tree rooted at `root` into a package node.
    ///
    /// The root package is named after the directory; nested names are
    /// dotted (`root.sub.leaf`).
    pub fn scan(&self, root: &Path) -> Result<Package> {
        if !root.is_dir() {
            return Err(Error::PathNotFound(root.to_path_buf()));
        }

        let base_name = root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "root".to_string());

        self.scan_dir(root, &base_name, root)
    }

    fn scan_dir(&self, dir: &Path, base_name: &str, root: &Path) -> Result<Package> {
        let mut package = Package::new(base_name);

        let mut entries: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .collect();
        entries.sort();

        for path in entries {
            if self.should_exclude(&path, root) {
                continue;
            }

            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();

            if path.is_dir() {
                let child_name = format!("{}.{}", base_name, file_name);
                package
                    .subpackages
                    .push(self.scan_dir(&path, &child_name, root)?);
            } else if path.extension().map_or(false, |e| e == self.extension.as_str()) {
                match self.python.scan_file(&path, Some(base_name)) {
                    Ok(module) => package.modules.push(module),
                    Err(e) => {
                        // A single unreadable file degrades the tree, it
                        // does not abort the run.
                        warn!(path = %path.display(), error = %e, "skipping unscannable file");
                    }
                }
            } else {
                package.misc.push(file_name);
            }
        }

        Ok(package)
    }

    /// Count source and misc files under `root`, honoring excludes
    pub fn file_counts(&self, root: &Path) -> Result<FileCounts> {
        let mut counts = FileCounts::default();

        for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if path.is_dir() || self.should_exclude(path, root) {
                continue;
            }
            if path.extension().map_or(false, |e| e == self.extension.as_str()) {
                counts.source += 1;
            } else {
                counts.misc += 1;
            }
        }

        Ok(counts)
    }

    /// Check a path against the exclude globs
    fn should_exclude(&self, path: &Path, root: &Path) -> bool {
        let relative = path.strip_prefix(root).unwrap_or(path);
        self.exclude.iter().any(|p| p.matches_path(relative))
    }
}
