//! Lexical path normalization

use crate::Result;
use std::path::{Component, Path, PathBuf};

/// Makes `path` absolute against the current directory and folds `.` and `..`
/// components without touching the filesystem.
///
/// The path does not need to exist and symlinks are not resolved, so the
/// result is stable: normalizing an already-normalized path returns it unchanged.
pub fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(lexical_clean(path))
    } else {
        Ok(lexical_clean(&std::env::current_dir()?.join(path)))
    }
}

fn lexical_clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            // Popping at the root is a no-op, matching `/..` == `/`
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_absolute_folds_dots() {
        let path = absolute(Path::new("/out/./shaders/../bin/")).unwrap();
        assert_eq!(path, PathBuf::from("/out/bin"));
        assert_eq!(absolute(Path::new("/..")).unwrap(), PathBuf::from("/"));
    }

    #[test]
    fn test_relative_joins_current_dir() {
        let cwd = std::env::current_dir().unwrap();
        let path = absolute(Path::new("shader.hlsl")).unwrap();
        assert!(path.is_absolute());
        assert_eq!(path, lexical_clean(&cwd.join("shader.hlsl")));
    }

    #[test]
    fn test_absolute_is_idempotent() {
        let once = absolute(Path::new("a/../b/./c.glsl")).unwrap();
        let twice = absolute(&once).unwrap();
        assert_eq!(once, twice);
    }
}
