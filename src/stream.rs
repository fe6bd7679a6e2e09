//! Lazy batch API: render one manifest entry per `next()` call.
//!
//! Unlike the eager [`crate::batch::run_batch`] which returns only after
//! every entry has been visited, [`render_stream`] hands back an iterator so
//! callers can print results as they happen or stop early. All preparation
//! (manifest read, path resolution, output directory creation) happens
//! before the iterator is returned, so the output directory exists before the
//! first renderer invocation.
//!
//! Items are yielded in manifest order. A fatal error is yielded once as
//! `Err`, after which the iterator is exhausted.

use crate::config::BatchConfig;
use crate::error::{BatchError, ItemError};
use crate::output::ItemResult;
use crate::pipeline::input::{absolutize, resolve_base, validate_source};
use crate::pipeline::manifest::Manifest;
use crate::pipeline::render::{resolve_renderer, Renderer};
use crate::progress::ProgressCallback;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Iterator over the entries of a prepared batch.
pub struct RenderStream {
    paths: std::vec::IntoIter<PathBuf>,
    line: usize,
    total: usize,
    output_dir: PathBuf,
    renderer: Arc<dyn Renderer>,
    format_label: &'static str,
    progress: Option<ProgressCallback>,
    done: bool,
}

impl std::fmt::Debug for RenderStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderStream")
            .field("line", &self.line)
            .field("total", &self.total)
            .field("output_dir", &self.output_dir)
            .field("done", &self.done)
            .finish()
    }
}

/// Read the configured manifest and prepare a lazy batch over it.
///
/// # Errors
/// Returns `Err(BatchError)` if the manifest cannot be read, the working
/// directory is unavailable, or the output directory cannot be created.
pub fn render_stream(config: &BatchConfig) -> Result<RenderStream, BatchError> {
    let manifest = Manifest::read(&config.manifest_path)?;
    render_stream_from(&manifest, config)
}

/// Prepare a lazy batch over an in-memory manifest.
///
/// `config.manifest_path` is ignored.
pub fn render_stream_from(
    manifest: &Manifest,
    config: &BatchConfig,
) -> Result<RenderStream, BatchError> {
    let base =
        resolve_base(config.base_dir.as_deref()).map_err(BatchError::WorkingDirUnavailable)?;
    let paths = manifest.resolve(&base);

    let output_dir = absolutize(&config.output_dir, &base);
    ensure_output_dir(&output_dir)?;

    let total = paths.len();
    info!(
        "Rendering {} manifest entries into {}",
        total,
        output_dir.display()
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_start(total);
    }

    Ok(RenderStream {
        paths: paths.into_iter(),
        line: 0,
        total,
        output_dir,
        renderer: resolve_renderer(config),
        format_label: config.format.label(),
        progress: config.progress_callback.clone(),
        done: false,
    })
}

impl RenderStream {
    /// Number of manifest entries in this batch.
    pub fn total(&self) -> usize {
        self.total
    }

    /// The absolute output directory every invocation writes to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn process(&self, line: usize, path: PathBuf) -> Result<ItemResult, BatchError> {
        let total = self.total;

        if let Err(e) = validate_source(&path) {
            warn!("{} is not a valid file, skipping", path.display());
            if let Some(ref cb) = self.progress {
                cb.on_item_skipped(line, total, &path);
            }
            return Ok(ItemResult::skipped(line, e));
        }

        info!("Processing diagram: {}", path.display());
        if let Some(ref cb) = self.progress {
            cb.on_item_start(line, total, &path);
        }

        let start = Instant::now();
        let invocation = self.renderer.render(&path, &self.output_dir)?;
        let duration_ms = start.elapsed().as_millis() as u64;

        if invocation.success() {
            info!(
                "Successfully generated {} for {}",
                self.format_label,
                path.display()
            );
            if let Some(ref cb) = self.progress {
                cb.on_item_complete(line, total, &path);
            }
            Ok(ItemResult::rendered(line, path, duration_ms))
        } else {
            let err = ItemError::RendererFailed {
                path,
                exit_code: invocation.exit_code,
                detail: invocation.failure_detail(),
            };
            error!(
                "An error occurred while processing {}: {}",
                err.path().display(),
                err
            );
            if let Some(ref cb) = self.progress {
                cb.on_item_error(line, total, &err);
            }
            Ok(ItemResult::failed(line, err, duration_ms))
        }
    }
}

impl Iterator for RenderStream {
    type Item = Result<ItemResult, BatchError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let Some(path) = self.paths.next() else {
            self.done = true;
            debug!("Batch finished after {} entries", self.total);
            if let Some(ref cb) = self.progress {
                cb.on_batch_complete(self.total);
            }
            return None;
        };
        self.line += 1;

        let result = self.process(self.line, path);
        if result.is_err() {
            self.done = true;
        }
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            (0, Some(self.paths.len()))
        }
    }
}

fn ensure_output_dir(dir: &Path) -> Result<(), BatchError> {
    if !dir.is_dir() {
        debug!("Creating output directory {}", dir.display());
    }
    std::fs::create_dir_all(dir).map_err(|e| BatchError::OutputDirFailed {
        path: dir.to_path_buf(),
        source: e,
    })
}
