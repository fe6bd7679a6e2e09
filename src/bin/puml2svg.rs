//! CLI binary for puml2svg.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `BatchConfig` and reports per-diagram results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use puml2svg::{
    run_batch, BatchConfig, BatchProgressCallback, ItemError, ItemResult, OutputFormat,
    ProgressCallback,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one bar for the whole manifest plus a log
/// line per entry printed above it.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_batch_start
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_prefix("Preparing");
        bar.set_message("Reading manifest…");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl BatchProgressCallback for CliProgressCallback {
    fn on_batch_start(&self, total: usize) {
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} diagrams  ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");
        self.bar.set_length(total as u64);
        self.bar.set_style(style);
        self.bar.set_prefix("Rendering");
    }

    fn on_item_start(&self, _line: usize, _total: usize, path: &Path) {
        self.bar.set_message(display_name(path));
    }

    fn on_item_complete(&self, line: usize, total: usize, path: &Path) {
        self.bar.println(format!(
            "  {} {:>3}/{:<3}  {}",
            green("✓"),
            line,
            total,
            path.display()
        ));
        self.bar.inc(1);
    }

    fn on_item_skipped(&self, line: usize, total: usize, path: &Path) {
        self.bar.println(format!(
            "  {} {:>3}/{:<3}  {}  {}",
            yellow("–"),
            line,
            total,
            path.display(),
            dim("not a valid file")
        ));
        self.bar.inc(1);
    }

    fn on_item_error(&self, line: usize, total: usize, error: &ItemError) {
        let msg = error.to_string();
        // Keep the bar tidy; the full detail is in --json output.
        let first = msg.lines().next().unwrap_or_default();
        let first = if first.chars().count() > 100 {
            format!("{}…", first.chars().take(99).collect::<String>())
        } else {
            first.to_string()
        };
        self.bar.println(format!(
            "  {} {:>3}/{:<3}  {}",
            red("✗"),
            line,
            total,
            red(&first)
        ));
        self.bar.inc(1);
    }

    fn on_batch_complete(&self, _total: usize) {
        self.bar.finish_and_clear();
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Render every diagram listed in ./diagrams.txt with ./plantuml.jar into ./svg-output
  puml2svg

  # Explicit locations
  puml2svg --renderer tools/plantuml.jar --manifest docs/diagrams.txt --output-dir docs/svg

  # Use an installed plantuml launcher instead of a jar
  puml2svg --renderer /usr/bin/plantuml

  # PNG instead of SVG, machine-readable results
  puml2svg --format png --json > results.json

MANIFEST FORMAT:
  One diagram path per line. Surrounding whitespace is ignored. Relative
  paths are resolved against the working directory (or --base-dir). Entries
  that are not existing files are reported and skipped.

ENVIRONMENT VARIABLES:
  PUML2SVG_RENDERER    Renderer jar or executable (default: plantuml.jar)
  PUML2SVG_MANIFEST    Manifest file (default: diagrams.txt)
  PUML2SVG_OUTPUT_DIR  Output directory (default: svg-output)
  PUML2SVG_JAVA        JVM used for .jar renderers (default: java)
  RUST_LOG             Overrides the log filter, e.g. RUST_LOG=puml2svg=debug

EXIT STATUS:
  0 when the batch ran to completion, even if individual diagrams failed.
  Non-zero only when the batch could not run: unreadable manifest,
  uncreatable output directory, or a renderer that cannot be launched.
"#;

/// Batch-render PlantUML diagrams listed in a manifest file.
#[derive(Parser, Debug)]
#[command(
    name = "puml2svg",
    version,
    about = "Batch-render PlantUML diagrams listed in a manifest file",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Renderer: a .jar run through java, or an executable run directly.
    #[arg(short, long, env = "PUML2SVG_RENDERER", default_value = "plantuml.jar")]
    renderer: PathBuf,

    /// Manifest file listing one diagram path per line.
    #[arg(short, long, env = "PUML2SVG_MANIFEST", default_value = "diagrams.txt")]
    manifest: PathBuf,

    /// Directory all rendered files are written to (created if missing).
    #[arg(short, long, env = "PUML2SVG_OUTPUT_DIR", default_value = "svg-output")]
    output_dir: PathBuf,

    /// JVM launcher for .jar renderers.
    #[arg(long, env = "PUML2SVG_JAVA", default_value = "java")]
    java: PathBuf,

    /// Output format passed to the renderer.
    #[arg(short, long, env = "PUML2SVG_FORMAT", value_enum, default_value = "svg")]
    format: FormatArg,

    /// Do not pass -v to the renderer.
    #[arg(long)]
    no_renderer_verbose: bool,

    /// Resolve relative manifest entries against this directory instead of the working directory.
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Print per-diagram results as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// Show a progress bar instead of per-diagram log lines.
    #[arg(long)]
    progress: bool,

    /// Enable DEBUG-level logs, including renderer command lines and output.
    #[arg(short, long, env = "PUML2SVG_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PUML2SVG_QUIET", conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Svg,
    Png,
    Eps,
    Pdf,
    Txt,
}

impl From<FormatArg> for OutputFormat {
    fn from(v: FormatArg) -> Self {
        match v {
            FormatArg::Svg => OutputFormat::Svg,
            FormatArg::Png => OutputFormat::Png,
            FormatArg::Eps => OutputFormat::Eps,
            FormatArg::Pdf => OutputFormat::Pdf,
            FormatArg::Txt => OutputFormat::Txt,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // With the progress bar active the bar prints one line per diagram, so
    // library logs drop to errors only.
    let show_progress = cli.progress && !cli.quiet;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn BatchProgressCallback>)
    } else {
        None
    };

    let config = build_config(&cli, progress_cb)?;

    // ── Run batch ────────────────────────────────────────────────────────
    let results = run_batch(&config).context("Batch aborted")?;

    if cli.json {
        print_json(&results)?;
    }

    Ok(())
}

/// Map CLI args to `BatchConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<BatchConfig> {
    let mut builder = BatchConfig::builder()
        .renderer_path(&cli.renderer)
        .manifest_path(&cli.manifest)
        .output_dir(&cli.output_dir)
        .java_bin(&cli.java)
        .format(cli.format.into())
        .verbose(!cli.no_renderer_verbose);

    if let Some(ref base) = cli.base_dir {
        builder = builder.base_dir(base);
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

fn print_json(results: &[ItemResult]) -> Result<()> {
    let json = serde_json::to_string_pretty(results).context("Failed to serialise results")?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{json}").context("Failed to write to stdout")?;
    Ok(())
}
