//! Per-entry result types produced by the batch loop.

use crate::error::ItemError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What happened to a single manifest entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// The renderer exited with status 0.
    Rendered,
    /// The path was not an existing regular file; the renderer was not run.
    Skipped,
    /// The renderer ran and exited unsuccessfully.
    Failed,
}

/// Outcome of one manifest entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemResult {
    /// 1-based manifest line the entry came from.
    pub line: usize,
    /// Absolute, normalised path handed to (or withheld from) the renderer.
    pub path: PathBuf,
    pub status: ItemStatus,
    /// Set for `Skipped` and `Failed` entries.
    pub error: Option<ItemError>,
    /// Wall-clock time spent on the entry, including the renderer run.
    pub duration_ms: u64,
}

impl ItemResult {
    pub(crate) fn rendered(line: usize, path: PathBuf, duration_ms: u64) -> Self {
        Self {
            line,
            path,
            status: ItemStatus::Rendered,
            error: None,
            duration_ms,
        }
    }

    pub(crate) fn skipped(line: usize, error: ItemError) -> Self {
        Self {
            line,
            path: error.path().to_path_buf(),
            status: ItemStatus::Skipped,
            error: Some(error),
            duration_ms: 0,
        }
    }

    pub(crate) fn failed(line: usize, error: ItemError, duration_ms: u64) -> Self {
        Self {
            line,
            path: error.path().to_path_buf(),
            status: ItemStatus::Failed,
            error: Some(error),
            duration_ms,
        }
    }

    /// True when the renderer ran and succeeded.
    pub fn is_rendered(&self) -> bool {
        self.status == ItemStatus::Rendered
    }
}
