use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Result of sanitizing an archive entry name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SanitizedPath {
    /// Entry name with `/` as the only separator.
    pub original: String,
    /// Path below the destination directory.
    pub relative: PathBuf,
    /// Destination joined with `relative`.
    pub resolved: PathBuf,
}

/// Resolve a decoded entry name against `base`.
///
/// Backslashes are treated as separators regardless of the host platform.
/// Absolute names, and names whose `..` segments climb out of `base`, are
/// rejected with [`Error::ZipSlip`]. A name that resolves to `base` itself is
/// rejected as well: every entry must land strictly inside it.
pub fn sanitize_entry_name(name: &str, base: impl AsRef<Path>) -> Result<SanitizedPath> {
    let normalized = name.replace('\\', "/");
    let entry = Path::new(&normalized);
    let base = clean_path(base.as_ref());

    // Reject absolute paths (zip-slip protection)
    if entry.has_root() || entry.is_absolute() {
        return Err(Error::ZipSlip {
            resolved: clean_path(entry),
            entry: normalized,
        });
    }

    let resolved = clean_path(&base.join(entry));

    let relative = if base == Path::new(".") {
        match resolved.components().next() {
            Some(Component::Normal(_)) => Some(resolved.clone()),
            _ => None,
        }
    } else if resolved != base {
        resolved.strip_prefix(&base).ok().map(Path::to_path_buf)
    } else {
        None
    };

    match relative {
        Some(relative) => Ok(SanitizedPath {
            original: normalized,
            relative,
            resolved,
        }),
        None => Err(Error::ZipSlip {
            entry: normalized,
            resolved,
        }),
    }
}

/// Lexically clean a path: drop `.`, fold `name/..`, keep leading `..` of a
/// relative path and swallow `..` directly below the root.
///
/// The filesystem is never consulted, so symlinks are not followed.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> &'static Path {
        Path::new("/data/order/order.os_all_file")
    }

    #[test]
    fn nested_entry_resolves_inside() {
        let result = sanitize_entry_name("报告成功/2024EGA-001X-4.T7.ab1", base()).unwrap();
        assert_eq!(result.relative, Path::new("报告成功/2024EGA-001X-4.T7.ab1"));
        assert_eq!(result.resolved, base().join("报告成功/2024EGA-001X-4.T7.ab1"));
    }

    #[test]
    fn backslashes_become_separators() {
        let result = sanitize_entry_name("plate\\A01\\read.ab1", base()).unwrap();
        assert_eq!(result.original, "plate/A01/read.ab1");
        assert_eq!(result.relative, Path::new("plate/A01/read.ab1"));
    }

    #[test]
    fn inner_parent_segments_are_folded() {
        let result = sanitize_entry_name("a/../b/./c.txt", base()).unwrap();
        assert_eq!(result.relative, Path::new("b/c.txt"));
    }

    #[test]
    fn parent_escape_is_rejected() {
        let result = sanitize_entry_name("../../etc/passwd", base());
        assert!(matches!(result, Err(Error::ZipSlip { .. })));
    }

    #[test]
    fn windows_style_escape_is_rejected() {
        let result = sanitize_entry_name("..\\..\\evil.ab1", base());
        assert!(matches!(result, Err(Error::ZipSlip { .. })));
    }

    #[test]
    fn absolute_entry_is_rejected() {
        let result = sanitize_entry_name("/etc/passwd", base());
        assert!(matches!(result, Err(Error::ZipSlip { .. })));
    }

    #[test]
    fn entry_equal_to_base_is_rejected() {
        assert!(sanitize_entry_name("./", base()).is_err());
        assert!(sanitize_entry_name("a/..", base()).is_err());
    }

    #[test]
    fn sibling_with_common_prefix_is_rejected() {
        // "/data/order/order.os_all_file2" shares a string prefix with the base
        let result = sanitize_entry_name("../order.os_all_file2/x", base());
        assert!(matches!(result, Err(Error::ZipSlip { .. })));
    }

    #[test]
    fn relative_base() {
        let result = sanitize_entry_name("dir/file.ab1", "out/../extract").unwrap();
        assert_eq!(result.resolved, Path::new("extract/dir/file.ab1"));
        assert!(sanitize_entry_name("../x", "extract").is_err());
    }

    #[test]
    fn current_dir_base() {
        let result = sanitize_entry_name("file.ab1", ".").unwrap();
        assert_eq!(result.resolved, Path::new("file.ab1"));
        assert!(sanitize_entry_name("../file.ab1", ".").is_err());
        assert!(sanitize_entry_name("../file.ab1", "").is_err());
    }

    #[test]
    fn path_cleaning() {
        assert_eq!(clean_path(Path::new("foo//bar/baz/../qux")), Path::new("foo/bar/qux"));
        assert_eq!(clean_path(Path::new("../a/../../b")), Path::new("../../b"));
        assert_eq!(clean_path(Path::new("/../etc")), Path::new("/etc"));
        assert_eq!(clean_path(Path::new("a/..")), Path::new("."));
    }
}
