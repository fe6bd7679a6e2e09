//! Manifest loading: a plain-text list of diagram paths, one per line.
//!
//! Entries are not validated here. A blank line is kept as an empty entry so
//! that it resolves to the base directory and is reported as an invalid path
//! by [`super::input::validate_source`], exactly like any other bad entry.

use crate::error::BatchError;
use crate::pipeline::input::absolutize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The ordered entries of a manifest file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<String>,
}

impl Manifest {
    /// Read and parse the manifest at `path`.
    ///
    /// Any I/O failure, including invalid UTF-8, is fatal.
    pub fn read(path: &Path) -> Result<Self, BatchError> {
        let text = std::fs::read_to_string(path).map_err(|e| BatchError::ManifestUnreadable {
            path: path.to_path_buf(),
            source: e,
        })?;
        let manifest = Self::parse(&text);
        debug!(
            "Read {} manifest entries from {}",
            manifest.len(),
            path.display()
        );
        Ok(manifest)
    }

    /// Parse manifest text. Each line is stripped of surrounding whitespace.
    pub fn parse(text: &str) -> Self {
        Self {
            entries: text.lines().map(|l| l.trim().to_string()).collect(),
        }
    }

    /// Build a manifest from already-split entries.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|e| e.as_ref().trim().to_string())
                .collect(),
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve every entry against `base`, preserving manifest order.
    pub fn resolve(&self, base: &Path) -> Vec<PathBuf> {
        self.entries.iter().map(|e| absolutize(e, base)).collect()
    }
}
