//! Renderer invocation: one blocking subprocess per diagram.
//!
//! The external tool is a black box driven through a fixed command line:
//!
//! ```text
//! [java -jar] <renderer> [-v] -t<format> -o <output dir> <source>
//! ```
//!
//! A `.jar` renderer is launched through the configured JVM; anything else
//! is executed directly. The output directory is always passed as an
//! absolute path. PlantUML treats a relative `-o` as relative to each
//! source file, which would scatter output across the source tree.
//!
//! ## Failure model
//!
//! * The process could not be spawned (program missing, not executable):
//!   fatal [`BatchError::RendererLaunchFailed`]. No later entry could
//!   succeed either.
//! * The process ran and exited non-zero or was killed: a normal
//!   [`Invocation`] whose [`Invocation::success`] is false. The batch loop
//!   turns it into a per-entry [`crate::error::ItemError`].

use crate::config::{BatchConfig, OutputFormat};
use crate::error::BatchError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Captured outcome of a renderer run that was successfully spawned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub duration_ms: u64,
}

impl Invocation {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// The most useful text to show for a failed run: stderr, else stdout,
    /// trimmed and capped at [`MAX_DETAIL_LINES`] trailing lines.
    pub fn failure_detail(&self) -> String {
        let source = if self.stderr.trim().is_empty() {
            &self.stdout
        } else {
            &self.stderr
        };
        let lines: Vec<&str> = source.trim().lines().collect();
        let start = lines.len().saturating_sub(MAX_DETAIL_LINES);
        lines[start..].join("\n")
    }
}

/// Trailing lines of captured output kept in a failure message.
pub const MAX_DETAIL_LINES: usize = 20;

/// Something that can turn one diagram source into output in `output_dir`.
///
/// Implementations must block until the work is done. The batch calls
/// `render` at most once per manifest entry, in manifest order.
pub trait Renderer: Send + Sync {
    fn render(&self, source: &Path, output_dir: &Path) -> Result<Invocation, BatchError>;
}

/// Runs the external renderer as a child process.
#[derive(Debug, Clone)]
pub struct ProcessRenderer {
    renderer_path: PathBuf,
    java_bin: PathBuf,
    format: OutputFormat,
    verbose: bool,
}

impl ProcessRenderer {
    pub fn new(renderer_path: impl Into<PathBuf>) -> Self {
        let defaults = BatchConfig::default();
        Self {
            renderer_path: renderer_path.into(),
            java_bin: defaults.java_bin,
            format: defaults.format,
            verbose: defaults.verbose,
        }
    }

    pub fn from_config(config: &BatchConfig) -> Self {
        Self {
            renderer_path: config.renderer_path.clone(),
            java_bin: config.java_bin.clone(),
            format: config.format,
            verbose: config.verbose,
        }
    }

    /// Whether the renderer is launched through the JVM.
    pub fn is_jar(&self) -> bool {
        is_jar(&self.renderer_path)
    }

    /// The full argv (program first) for one source path.
    pub fn command_line(&self, source: &Path, output_dir: &Path) -> Vec<OsString> {
        let mut argv: Vec<OsString> = Vec::with_capacity(8);
        if self.is_jar() {
            argv.push(self.java_bin.clone().into_os_string());
            argv.push("-jar".into());
        }
        argv.push(self.renderer_path.clone().into_os_string());
        if self.verbose {
            argv.push("-v".into());
        }
        argv.push(self.format.flag().into());
        argv.push("-o".into());
        argv.push(output_dir.as_os_str().to_os_string());
        argv.push(source.as_os_str().to_os_string());
        argv
    }
}

impl Renderer for ProcessRenderer {
    fn render(&self, source: &Path, output_dir: &Path) -> Result<Invocation, BatchError> {
        let argv = self.command_line(source, output_dir);
        debug!("Running command: {}", display_command(&argv));

        let program = &argv[0];
        let start = Instant::now();
        let output = Command::new(program)
            .args(&argv[1..])
            .stdin(Stdio::null())
            .output()
            .map_err(|e| BatchError::RendererLaunchFailed {
                program: program.to_string_lossy().into_owned(),
                source: e,
            })?;

        let invocation = Invocation {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            duration_ms: start.elapsed().as_millis() as u64,
        };

        for line in invocation.stderr.lines().filter(|l| !l.trim().is_empty()) {
            debug!(target: "puml2svg::renderer", "{}", line);
        }

        Ok(invocation)
    }
}

/// Pick the renderer for a batch: the injected one, else a [`ProcessRenderer`].
pub fn resolve_renderer(config: &BatchConfig) -> Arc<dyn Renderer> {
    match config.renderer {
        Some(ref r) => Arc::clone(r),
        None => Arc::new(ProcessRenderer::from_config(config)),
    }
}

fn is_jar(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("jar"))
        .unwrap_or(false)
}

/// Space-joined argv for log lines.
pub fn display_command(argv: &[OsString]) -> String {
    argv.iter()
        .map(|a| a.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}
