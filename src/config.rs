//! Configuration types for a batch render.
//!
//! All batch behaviour is controlled through [`BatchConfig`], built via its
//! [`BatchConfigBuilder`]. The defaults reproduce the fixed deployment
//! convention: `plantuml.jar` next to a `diagrams.txt` manifest, rendering
//! into `svg-output/`.

use crate::error::BatchError;
use crate::progress::ProgressCallback;
use crate::pipeline::render::Renderer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Default renderer, resolved relative to the working directory.
pub const DEFAULT_RENDERER_PATH: &str = "plantuml.jar";
/// Default manifest listing one diagram path per line.
pub const DEFAULT_MANIFEST_PATH: &str = "diagrams.txt";
/// Default shared output directory.
pub const DEFAULT_OUTPUT_DIR: &str = "svg-output";
/// Default JVM launcher used for `.jar` renderers.
pub const DEFAULT_JAVA_BIN: &str = "java";

/// Configuration for one batch run.
///
/// Built via [`BatchConfig::builder()`] or using [`BatchConfig::default()`].
///
/// # Example
/// ```rust
/// use puml2svg::{BatchConfig, OutputFormat};
///
/// let config = BatchConfig::builder()
///     .manifest_path("docs/diagrams.txt")
///     .output_dir("docs/svg")
///     .format(OutputFormat::Svg)
///     .build()
///     .unwrap();
/// assert_eq!(config.renderer_path.to_str(), Some("plantuml.jar"));
/// ```
#[derive(Clone)]
pub struct BatchConfig {
    /// Renderer to invoke. Default: `plantuml.jar`.
    ///
    /// A path ending in `.jar` is launched through [`BatchConfig::java_bin`]
    /// as `java -jar <renderer_path>`; anything else is executed directly.
    pub renderer_path: PathBuf,

    /// Manifest file, one diagram path per line. Default: `diagrams.txt`.
    pub manifest_path: PathBuf,

    /// Shared output directory, created recursively if absent. Default: `svg-output`.
    pub output_dir: PathBuf,

    /// JVM launcher for `.jar` renderers. Default: `java`.
    pub java_bin: PathBuf,

    /// Output format flag passed to the renderer. Default: [`OutputFormat::Svg`].
    pub format: OutputFormat,

    /// Pass the renderer's verbose flag (`-v`). Default: true.
    pub verbose: bool,

    /// Directory that relative manifest entries (and a relative output
    /// directory) are resolved against. If None, uses the process working
    /// directory at the time the batch is prepared.
    pub base_dir: Option<PathBuf>,

    /// Pre-constructed renderer. Takes precedence over `renderer_path`.
    pub renderer: Option<Arc<dyn Renderer>>,

    /// Receives per-item events while the batch runs.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            renderer_path: PathBuf::from(DEFAULT_RENDERER_PATH),
            manifest_path: PathBuf::from(DEFAULT_MANIFEST_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            java_bin: PathBuf::from(DEFAULT_JAVA_BIN),
            format: OutputFormat::default(),
            verbose: true,
            base_dir: None,
            renderer: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for BatchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchConfig")
            .field("renderer_path", &self.renderer_path)
            .field("manifest_path", &self.manifest_path)
            .field("output_dir", &self.output_dir)
            .field("java_bin", &self.java_bin)
            .field("format", &self.format)
            .field("verbose", &self.verbose)
            .field("base_dir", &self.base_dir)
            .field("renderer", &self.renderer.as_ref().map(|_| "<dyn Renderer>"))
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn BatchProgressCallback>"),
            )
            .finish()
    }
}

impl BatchConfig {
    /// Create a new builder for `BatchConfig`.
    pub fn builder() -> BatchConfigBuilder {
        BatchConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`BatchConfig`].
#[derive(Debug)]
pub struct BatchConfigBuilder {
    config: BatchConfig,
}

impl BatchConfigBuilder {
    pub fn renderer_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.renderer_path = path.into();
        self
    }

    pub fn manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.manifest_path = path.into();
        self
    }

    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_dir = path.into();
        self
    }

    pub fn java_bin(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.java_bin = path.into();
        self
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.config.format = format;
        self
    }

    pub fn verbose(mut self, v: bool) -> Self {
        self.config.verbose = v;
        self
    }

    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.base_dir = Some(dir.into());
        self
    }

    pub fn renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.config.renderer = Some(renderer);
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<BatchConfig, BatchError> {
        let c = &self.config;
        if c.manifest_path.as_os_str().is_empty() {
            return Err(BatchError::InvalidConfig(
                "Manifest path must not be empty".into(),
            ));
        }
        if c.output_dir.as_os_str().is_empty() {
            return Err(BatchError::InvalidConfig(
                "Output directory must not be empty".into(),
            ));
        }
        if c.renderer.is_none() && c.renderer_path.as_os_str().is_empty() {
            return Err(BatchError::InvalidConfig(
                "Renderer path must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Output format requested from the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Scalable vector graphics (default).
    #[default]
    Svg,
    Png,
    Eps,
    Pdf,
    /// ASCII art.
    Txt,
}

impl OutputFormat {
    /// The renderer's format flag, e.g. `-tsvg`.
    pub fn flag(self) -> &'static str {
        match self {
            OutputFormat::Svg => "-tsvg",
            OutputFormat::Png => "-tpng",
            OutputFormat::Eps => "-teps",
            OutputFormat::Pdf => "-tpdf",
            OutputFormat::Txt => "-ttxt",
        }
    }

    /// Human-readable name used in log lines.
    pub fn label(self) -> &'static str {
        match self {
            OutputFormat::Svg => "SVG",
            OutputFormat::Png => "PNG",
            OutputFormat::Eps => "EPS",
            OutputFormat::Pdf => "PDF",
            OutputFormat::Txt => "TXT",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
