//! Shared fixtures for integration tests.
//!
//! `fake_renderer()` is a POSIX shell script that behaves like a tiny
//! PlantUML: it accepts `[-v] -t<fmt> -o <dir> <source>`, appends the source
//! path to `<dir>/invocations.log`, and writes `<dir>/<stem>.svg`. Sources
//! whose path contains `broken` make it print to stderr and exit 1.
//!
//! The script is written once per test binary, before anything executes it,
//! to avoid ETXTBSY races between parallel tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tempfile::TempDir;

const SCRIPT: &str = r#"#!/bin/sh
out=""
src=""
while [ $# -gt 0 ]; do
  case "$1" in
    -o) out="$2"; shift 2 ;;
    -*) shift ;;
    *) src="$1"; shift ;;
  esac
done
echo "$src" >> "$out/invocations.log"
case "$src" in
  *broken*)
    echo "Error line 2 in file: $src" >&2
    echo "Some diagram description contains errors" >&2
    exit 1 ;;
esac
name=$(basename "$src")
echo "<svg/>" > "$out/${name%.*}.svg"
exit 0
"#;

static SCRIPT_DIR: OnceLock<TempDir> = OnceLock::new();

#[cfg(unix)]
pub fn fake_renderer() -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let dir = SCRIPT_DIR.get_or_init(|| {
        let dir = tempfile::tempdir().expect("script dir");
        let path = dir.path().join("fake-plantuml");
        std::fs::write(&path, SCRIPT).expect("write script");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("chmod script");
        dir
    });
    dir.path().join("fake-plantuml")
}

/// A scratch project directory with diagram sources.
pub struct Project {
    pub dir: TempDir,
}

impl Project {
    pub fn new(files: &[&str]) -> Self {
        let dir = tempfile::tempdir().expect("project dir");
        for f in files {
            let p = dir.path().join(f);
            std::fs::create_dir_all(p.parent().unwrap()).unwrap();
            std::fs::write(&p, "@startuml\nAlice -> Bob: hello\n@enduml\n").unwrap();
        }
        Self { dir }
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    pub fn write_manifest(&self, name: &str, lines: &[&str]) -> PathBuf {
        let p = self.path(name);
        let mut text = lines.join("\n");
        text.push('\n');
        std::fs::write(&p, text).unwrap();
        p
    }
}

/// Source paths the fake renderer saw, in call order.
pub fn invocations(output_dir: &Path) -> Vec<PathBuf> {
    match std::fs::read_to_string(output_dir.join("invocations.log")) {
        Ok(text) => text.lines().map(PathBuf::from).collect(),
        Err(_) => Vec::new(),
    }
}
