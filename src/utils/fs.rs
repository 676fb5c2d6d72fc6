//! Filesystem primitives for the install/uninstall flows.
//!
//! These helpers return plain [`std::io::Result`] so callers can attach the
//! operation-specific context the error taxonomy requires (every install
//! step reports a distinct failure message). They are synchronous: each
//! lifecycle transition is strictly sequential, and none of these calls is
//! large enough to benefit from offloading.

use std::fs;
use std::io;
use std::path::Path;

/// Create a directory and all parents; succeeds if it already exists.
///
/// Fails if the path exists but is not a directory.
pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if path.exists() {
        if path.is_dir() {
            return Ok(());
        }
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("path exists but is not a directory: {}", path.display()),
        ));
    }
    fs::create_dir_all(path)
}

/// Write bytes to a file atomically via a write-then-rename.
///
/// Readers never observe a partially written file: content goes to a
/// sibling `.tmp` file first and is renamed over the target.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(content)?;
        file.sync_all()?;
    }
    fs::rename(&temp_path, path)
}

/// Move a file, falling back to copy-and-remove across filesystems.
///
/// The staging path usually lives in `$TMPDIR`, which is often a different
/// filesystem than the install directory, so a bare rename can fail with
/// `EXDEV`.
pub fn move_file(src: &Path, dst: &Path) -> io::Result<()> {
    match fs::rename(src, dst) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            fs::copy(src, dst)?;
            fs::remove_file(src)
        }
        Err(e) => Err(e),
    }
}

/// Set the executable permission bits (`rwxr-xr-x`) on a file.
#[cfg(unix)]
pub fn set_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)
}

#[cfg(not(unix))]
pub fn set_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}

/// Remove a file, tolerating an already-absent target.
///
/// Returns whether the file existed.
pub fn remove_file_if_exists(path: &Path) -> io::Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Remove a directory only if it is empty; never an error.
///
/// Returns whether the directory was removed. A directory that still has
/// contents (or was never there) is left alone.
pub fn remove_dir_if_empty(path: &Path) -> bool {
    fs::remove_dir(path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn ensure_dir_is_idempotent() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("a/b/c");
        ensure_dir(&dir).unwrap();
        ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn ensure_dir_rejects_files() {
        let root = TempDir::new().unwrap();
        let file = root.path().join("occupied");
        fs::write(&file, b"x").unwrap();
        assert!(ensure_dir(&file).is_err());
    }

    #[test]
    fn atomic_write_replaces_content_and_leaves_no_temp() {
        let root = TempDir::new().unwrap();
        let target = root.path().join("entry.desktop");
        atomic_write(&target, b"first").unwrap();
        atomic_write(&target, b"second").unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"second");
        assert!(!target.with_extension("tmp").exists());
    }

    #[test]
    fn move_file_moves_within_filesystem() {
        let root = TempDir::new().unwrap();
        let src = root.path().join("src.bin");
        let dst = root.path().join("dst.bin");
        fs::write(&src, b"artifact").unwrap();
        move_file(&src, &dst).unwrap();
        assert!(!src.exists());
        assert_eq!(fs::read(&dst).unwrap(), b"artifact");
    }

    #[test]
    fn move_file_overwrites_existing_destination() {
        let root = TempDir::new().unwrap();
        let src = root.path().join("src.bin");
        let dst = root.path().join("dst.bin");
        fs::write(&src, b"new").unwrap();
        fs::write(&dst, b"old").unwrap();
        move_file(&src, &dst).unwrap();
        assert_eq!(fs::read(&dst).unwrap(), b"new");
    }

    #[cfg(unix)]
    #[test]
    fn set_executable_sets_mode_bits() {
        use std::os::unix::fs::PermissionsExt;
        let root = TempDir::new().unwrap();
        let file = root.path().join("app");
        fs::write(&file, b"#!/bin/sh").unwrap();
        set_executable(&file).unwrap();
        let mode = fs::metadata(&file).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn remove_file_if_exists_reports_presence() {
        let root = TempDir::new().unwrap();
        let file = root.path().join("gone");
        fs::write(&file, b"x").unwrap();
        assert!(remove_file_if_exists(&file).unwrap());
        assert!(!remove_file_if_exists(&file).unwrap());
    }

    #[test]
    fn remove_dir_if_empty_leaves_populated_dirs() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("keep");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("file"), b"x").unwrap();
        assert!(!remove_dir_if_empty(&dir));
        assert!(dir.exists());

        fs::remove_file(dir.join("file")).unwrap();
        assert!(remove_dir_if_empty(&dir));
        assert!(!dir.exists());
    }
}
