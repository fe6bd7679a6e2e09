//! Eager (whole-manifest) batch entry points.
//!
//! These walk the full manifest via [`crate::stream::RenderStream`] and
//! return every [`ItemResult`] in manifest order. Per-entry failures are
//! values inside the results; only fatal conditions surface as `Err`.

use crate::config::BatchConfig;
use crate::error::BatchError;
use crate::output::ItemResult;
use crate::pipeline::manifest::Manifest;
use crate::stream::{render_stream, render_stream_from};
use tracing::info;

/// Render every diagram listed in `config.manifest_path`.
///
/// # Returns
/// `Ok(results)` once every entry has been visited, even if some entries
/// were skipped or their renderer run failed (check each
/// [`ItemResult::status`]).
///
/// # Errors
/// Returns `Err(BatchError)` only for fatal errors:
/// - manifest missing, unreadable or not UTF-8
/// - output directory cannot be created
/// - renderer program cannot be launched
///
/// # Example
/// ```rust,no_run
/// use puml2svg::{run_batch, BatchConfig};
///
/// let results = run_batch(&BatchConfig::default())?;
/// for r in &results {
///     println!("{:>3} {:?} {}", r.line, r.status, r.path.display());
/// }
/// # Ok::<(), puml2svg::BatchError>(())
/// ```
pub fn run_batch(config: &BatchConfig) -> Result<Vec<ItemResult>, BatchError> {
    info!("Reading manifest {}", config.manifest_path.display());
    render_stream(config)?.collect()
}

/// Render every entry of an in-memory manifest.
///
/// Same semantics as [`run_batch`]; `config.manifest_path` is ignored.
pub fn run_manifest(
    manifest: &Manifest,
    config: &BatchConfig,
) -> Result<Vec<ItemResult>, BatchError> {
    render_stream_from(manifest, config)?.collect()
}
