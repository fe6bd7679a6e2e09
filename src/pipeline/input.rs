//! Input resolution: normalise a manifest entry to an absolute path and
//! check that it names something the renderer can open.
//!
//! Normalisation is purely lexical: the entry is joined onto the base
//! directory and `.`/`..` components are collapsed. Symlinks are left alone
//! so log lines show the path the manifest author wrote.

use crate::error::ItemError;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Make `entry` absolute relative to `base` and collapse `.` and `..`.
///
/// An empty entry yields `base` itself. `..` never climbs above the root.
pub fn absolutize(entry: impl AsRef<Path>, base: &Path) -> PathBuf {
    let joined = base.join(entry.as_ref());
    normalize(&joined)
}

/// Lexically collapse `.` and `..` components.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(p) => out.push(p.as_os_str()),
            Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            Component::Normal(name) => out.push(name),
        }
    }
    out
}

/// Resolve the directory relative entries are anchored to.
///
/// A relative `base` is itself anchored to the process working directory.
pub fn resolve_base(base: Option<&Path>) -> std::io::Result<PathBuf> {
    let cwd = std::env::current_dir;
    match base {
        Some(b) if b.is_absolute() => Ok(normalize(b)),
        Some(b) => Ok(normalize(&cwd()?.join(b))),
        None => cwd(),
    }
}

/// Accept only existing regular files (symlinks to files count).
pub fn validate_source(path: &Path) -> Result<(), ItemError> {
    if path.is_file() {
        debug!("Resolved diagram source: {}", path.display());
        Ok(())
    } else {
        Err(ItemError::NotAFile {
            path: path.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn absolutize_relative_entry() {
        assert_eq!(
            absolutize("docs/a.puml", Path::new("/work")),
            PathBuf::from("/work/docs/a.puml")
        );
    }

    #[cfg(unix)]
    #[test]
    fn absolutize_keeps_absolute_entry() {
        assert_eq!(
            absolutize("/etc/x.puml", Path::new("/work")),
            PathBuf::from("/etc/x.puml")
        );
    }

    #[cfg(unix)]
    #[test]
    fn absolutize_collapses_dots() {
        assert_eq!(
            absolutize("./a/../b/./c.puml", Path::new("/work/sub")),
            PathBuf::from("/work/sub/b/c.puml")
        );
        assert_eq!(
            absolutize("../../../x.puml", Path::new("/work")),
            PathBuf::from("/x.puml")
        );
    }

    #[cfg(unix)]
    #[test]
    fn absolutize_empty_entry_is_base() {
        assert_eq!(absolutize("", Path::new("/work")), PathBuf::from("/work"));
    }

    #[test]
    fn normalize_relative_keeps_leading_parent() {
        assert_eq!(normalize(Path::new("../a/./b")), PathBuf::from("../a/b"));
        assert_eq!(normalize(Path::new("../../a")), PathBuf::from("../../a"));
        assert_eq!(normalize(Path::new("a/../..")), PathBuf::from(".."));
    }

    #[test]
    fn resolve_base_defaults_to_cwd() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(resolve_base(None).unwrap(), cwd);
        assert_eq!(resolve_base(Some(Path::new("."))).unwrap(), normalize(&cwd));
    }

    #[test]
    fn validate_existing_file() {
        let f = tempfile::NamedTempFile::new().unwrap();
        assert!(validate_source(f.path()).is_ok());
    }

    #[test]
    fn validate_rejects_directory_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            validate_source(dir.path()),
            Err(ItemError::NotAFile {
                path: dir.path().to_path_buf()
            })
        );
        assert!(validate_source(&dir.path().join("missing.puml")).is_err());
    }
}
