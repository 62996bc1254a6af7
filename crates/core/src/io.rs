//! Shared file-system utilities.

use std::{
    fs::{copy, create_dir_all, read_dir, remove_dir_all},
    path::{Component, Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::glob;
use log::debug;

/// Outcome of a recursive directory copy.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryCopy {
    pub files: usize,
    pub directories: usize,
}

/// Recursively copy `from` into `to`, creating `to` and any parents.
pub fn copy_dir_all(from: &Path, to: &Path) -> Result<DirectoryCopy> {
    let mut summary = DirectoryCopy::default();
    copy_dir_inner(from, to, &mut summary)?;
    Ok(summary)
}

fn copy_dir_inner(from: &Path, to: &Path, summary: &mut DirectoryCopy) -> Result<()> {
    create_dir_all(to).with_context(|| format!("Failed to create directory: {}", to.display()))?;
    summary.directories += 1;

    let entries =
        read_dir(from).with_context(|| format!("Failed to read directory: {}", from.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", from.display()))?;
        let source = entry.path();
        let target = to.join(entry.file_name());
        let file_type = entry
            .file_type()
            .with_context(|| format!("Failed to stat {}", source.display()))?;

        if file_type.is_dir() {
            copy_dir_inner(&source, &target, summary)?;
        } else {
            copy(&source, &target).with_context(|| {
                format!("Failed to copy {} -> {}", source.display(), target.display())
            })?;
            summary.files += 1;
        }
    }
    Ok(())
}

/// Copy `from` to `to`, removing whatever was at `to` first.
pub fn replace_dir_with_copy(from: &Path, to: &Path) -> Result<DirectoryCopy> {
    if !from.is_dir() {
        bail!("Not a directory: {}", from.display());
    }
    if to.exists() {
        debug!("Removing existing {}", to.display());
        remove_dir_all(to).with_context(|| format!("Failed to remove {}", to.display()))?;
    }
    copy_dir_all(from, to)
}

/// Remove a directory tree if present. Returns whether anything was removed.
pub fn remove_dir_if_exists(dir: &Path) -> Result<bool> {
    if !dir.exists() {
        return Ok(false);
    }
    remove_dir_all(dir).with_context(|| format!("Failed to remove {}", dir.display()))?;
    Ok(true)
}

/// Find fonts matching a glob pattern in a directory, sorted by path.
pub fn glob_fonts(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let pattern = dir.join(pattern);
    let pattern_str = pattern.to_str().context("Invalid pattern path")?;
    let mut paths: Vec<PathBuf> = glob(pattern_str)
        .with_context(|| format!("Failed to glob pattern: {pattern_str}"))?
        .filter_map(Result::ok)
        .collect();
    paths.sort();
    Ok(paths)
}

/// Express `target` relative to the directory `base`.
///
/// Both paths are compared lexically; `.` components are dropped and
/// unmatched components of `base` become `..`. An empty `base` means the
/// current directory.
pub fn relative_path(target: &Path, base: &Path) -> PathBuf {
    let target: Vec<Component> =
        target.components().filter(|c| *c != Component::CurDir).collect();
    let base: Vec<Component> = base.components().filter(|c| *c != Component::CurDir).collect();

    let shared = target.iter().zip(&base).take_while(|(a, b)| a == b).count();

    let mut relative = PathBuf::new();
    for _ in shared..base.len() {
        relative.push("..");
    }
    for component in &target[shared..] {
        relative.push(component.as_os_str());
    }
    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    relative
}

#[cfg(test)]
mod tests {
    use std::fs::{read_to_string, write};

    use super::*;

    #[test]
    fn relative_to_same_directory() {
        let rel = relative_path(Path::new("master_ufo/A-WeightMax.ufo"), Path::new("master_ufo"));
        assert_eq!(rel, PathBuf::from("A-WeightMax.ufo"));
    }

    #[test]
    fn relative_to_sibling_directory() {
        let rel = relative_path(Path::new("out/masters/A.ufo"), Path::new("out/designspace"));
        assert_eq!(rel, PathBuf::from("../masters/A.ufo"));
    }

    #[test]
    fn relative_to_empty_base() {
        let rel = relative_path(Path::new("./A.ufo"), Path::new(""));
        assert_eq!(rel, PathBuf::from("A.ufo"));
    }

    #[test]
    fn copy_nested_tree() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("Regular.ufo");
        create_dir_all(from.join("glyphs")).unwrap();
        write(from.join("metainfo.plist"), "meta").unwrap();
        write(from.join("glyphs/a.glif"), "a").unwrap();

        let to = dir.path().join("copy/Regular.ufo");
        let summary = copy_dir_all(&from, &to).unwrap();

        assert_eq!(summary, DirectoryCopy { files: 2, directories: 2 });
        assert_eq!(read_to_string(to.join("glyphs/a.glif")).unwrap(), "a");
    }

    #[test]
    fn replace_overwrites_stale_copy() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("Regular.ufo");
        create_dir_all(&from).unwrap();
        write(from.join("fresh.txt"), "fresh").unwrap();

        let to = dir.path().join("Regular-copy.ufo");
        create_dir_all(&to).unwrap();
        write(to.join("stale.txt"), "stale").unwrap();

        replace_dir_with_copy(&from, &to).unwrap();
        assert!(to.join("fresh.txt").exists());
        assert!(!to.join("stale.txt").exists());
    }

    #[test]
    fn replace_rejects_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let err = replace_dir_with_copy(&dir.path().join("missing.ufo"), &dir.path().join("x"));
        assert!(err.is_err());
    }

    #[test]
    fn remove_missing_directory_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!remove_dir_if_exists(&dir.path().join("export")).unwrap());
    }

    #[test]
    fn glob_sorted() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path().join("B.otf"), "").unwrap();
        write(dir.path().join("A.otf"), "").unwrap();
        write(dir.path().join("A.ttf"), "").unwrap();

        let fonts = glob_fonts(dir.path(), "*.otf").unwrap();
        let names: Vec<_> = fonts.iter().map(|p| p.file_name().unwrap().to_owned()).collect();
        assert_eq!(names, ["A.otf", "B.otf"]);
    }
}
