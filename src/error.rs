//! Error types for the puml2svg library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`BatchError`] — **Fatal**: the batch cannot proceed at all (manifest
//!   unreadable, output directory uncreatable, renderer program missing).
//!   Returned as `Err(BatchError)` from the top-level `run_*` functions and
//!   yielded once by [`crate::stream::RenderStream`] before it stops.
//!
//! * [`ItemError`] — **Non-fatal**: a single manifest entry was skipped or
//!   its renderer invocation failed. Stored inside
//!   [`crate::output::ItemResult`]; the batch always moves on to the next
//!   entry.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the puml2svg library.
///
/// Per-entry failures use [`ItemError`] and are stored in
/// [`crate::output::ItemResult`] rather than propagated here.
#[derive(Debug, Error)]
pub enum BatchError {
    // ── Manifest errors ───────────────────────────────────────────────────
    /// The manifest could not be read (missing, unreadable, not UTF-8).
    #[error("Failed to read manifest '{path}': {source}")]
    ManifestUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Filesystem errors ─────────────────────────────────────────────────
    /// The output directory (or one of its parents) could not be created.
    #[error("Failed to create output directory '{path}': {source}")]
    OutputDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Relative manifest entries need a base directory and none was available.
    #[error("Cannot determine the current working directory: {0}")]
    WorkingDirUnavailable(#[source] std::io::Error),

    // ── Renderer errors ───────────────────────────────────────────────────
    /// The renderer process could not be started at all.
    #[error(
        "Failed to launch renderer '{program}': {source}\n\
Check that the program exists and is executable (for .jar renderers, that `java` is on PATH)."
    )]
    RendererLaunchFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A non-fatal error for a single manifest entry.
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize, serde::Deserialize)]
pub enum ItemError {
    /// The resolved path does not name an existing regular file.
    #[error("{path:?} is not a valid file")]
    NotAFile { path: PathBuf },

    /// The renderer ran but exited unsuccessfully.
    #[error("renderer failed on {path:?} ({}): {detail}", describe_exit(.exit_code))]
    RendererFailed {
        path: PathBuf,
        /// `None` when the process was terminated by a signal.
        exit_code: Option<i32>,
        detail: String,
    },
}

impl ItemError {
    /// The manifest path this error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            ItemError::NotAFile { path } | ItemError::RendererFailed { path, .. } => path,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match *code {
        Some(c) => format!("exit status {c}"),
        None => "terminated by signal".to_string(),
    }
}
