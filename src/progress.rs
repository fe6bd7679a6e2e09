//! Progress-callback trait for per-item batch events.
//!
//! Inject an [`Arc<dyn BatchProgressCallback>`] via
//! [`crate::config::BatchConfigBuilder::progress_callback`] to receive events
//! as the batch walks the manifest. Events are fired from
//! [`crate::stream::RenderStream`], so the eager and lazy entry points report
//! identically.
//!
//! # Example
//!
//! ```rust
//! use puml2svg::{BatchConfig, BatchProgressCallback};
//! use std::path::Path;
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     rendered: AtomicUsize,
//! }
//!
//! impl BatchProgressCallback for CountingCallback {
//!     fn on_item_complete(&self, line: usize, total: usize, path: &Path) {
//!         self.rendered.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("{}/{} rendered {}", line, total, path.display());
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback { rendered: AtomicUsize::new(0) });
//!
//! let config = BatchConfig::builder()
//!     .progress_callback(counter as Arc<dyn BatchProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use crate::error::ItemError;
use std::path::Path;
use std::sync::Arc;

/// Called by the batch loop as it processes each manifest entry.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. `line` is the 1-based manifest line and `total` the
/// number of entries in the manifest.
pub trait BatchProgressCallback: Send + Sync {
    /// Called once, after the output directory exists and before the first entry.
    fn on_batch_start(&self, total: usize) {
        let _ = total;
    }

    /// Called just before the renderer is launched for an entry.
    fn on_item_start(&self, line: usize, total: usize, path: &Path) {
        let _ = (line, total, path);
    }

    /// Called when the renderer exits successfully.
    fn on_item_complete(&self, line: usize, total: usize, path: &Path) {
        let _ = (line, total, path);
    }

    /// Called when an entry is not an existing regular file.
    fn on_item_skipped(&self, line: usize, total: usize, path: &Path) {
        let _ = (line, total, path);
    }

    /// Called when the renderer exits unsuccessfully.
    fn on_item_error(&self, line: usize, total: usize, error: &ItemError) {
        let _ = (line, total, error);
    }

    /// Called once after every entry has been visited.
    fn on_batch_complete(&self, total: usize) {
        let _ = total;
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl BatchProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::BatchConfig`].
pub type ProgressCallback = Arc<dyn BatchProgressCallback>;
