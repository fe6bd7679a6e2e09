//! # puml2svg
//!
//! Batch-render diagram sources listed in a manifest file by invoking an
//! external renderer (PlantUML by default) once per entry.
//!
//! ## Pipeline Overview
//!
//! ```text
//! diagrams.txt
//!  │
//!  ├─ 1. Manifest  read lines, strip whitespace
//!  ├─ 2. Resolve   absolute, normalised paths (manifest order kept)
//!  ├─ 3. Prepare   create the shared output directory
//!  └─ 4. Per entry
//!        ├─ not a regular file  → warn, skip
//!        └─ java -jar plantuml.jar -v -tsvg -o <out> <entry>
//!              ├─ exit 0        → success
//!              └─ exit ≠ 0      → error logged, continue
//! ```
//!
//! Entries are processed one at a time on the calling thread. A renderer that
//! never exits blocks the batch; there is no timeout and no retry.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use puml2svg::{run_batch, BatchConfig, ItemStatus};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BatchConfig::builder()
//!         .renderer_path("tools/plantuml.jar")
//!         .manifest_path("docs/diagrams.txt")
//!         .output_dir("docs/svg")
//!         .build()?;
//!     for item in run_batch(&config)? {
//!         if item.status == ItemStatus::Failed {
//!             eprintln!("line {}: {}", item.line, item.path.display());
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `puml2svg` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod batch;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod stream;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use batch::{run_batch, run_manifest};
pub use config::{BatchConfig, BatchConfigBuilder, OutputFormat};
pub use error::{BatchError, ItemError};
pub use output::{ItemResult, ItemStatus};
pub use pipeline::manifest::Manifest;
pub use pipeline::render::{Invocation, ProcessRenderer, Renderer};
pub use progress::{BatchProgressCallback, NoopProgressCallback, ProgressCallback};
pub use stream::{render_stream, render_stream_from, RenderStream};
