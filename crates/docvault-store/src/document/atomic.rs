//! Atomic write primitives
//!
//! Uses temp→rename in the target's directory so readers see either the old
//! document or the new one, never a truncated file.

use crate::errors::{io_error, Result};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Atomically replace `target_path` with `content`
///
/// Creates the parent directory if needed and keeps the permissions of an
/// existing target.
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    let parent = match target_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent).map_err(|e| io_error("create_document_dir", &parent, e))?;

    let temp_path = temp_path_for(&parent, target_path);

    if let Err(e) = write_synced(&temp_path, content) {
        let _ = fs::remove_file(&temp_path);
        return Err(io_error("write_document_temp", &temp_path, e));
    }

    if let Ok(existing) = fs::metadata(target_path) {
        let _ = fs::set_permissions(&temp_path, existing.permissions());
    }

    if let Err(e) = fs::rename(&temp_path, target_path) {
        let _ = fs::remove_file(&temp_path);
        return Err(io_error("rename_document_temp", target_path, e));
    }

    Ok(())
}

/// Hidden sibling: `.services.yaml.tmp`
fn temp_path_for(parent: &Path, target_path: &Path) -> PathBuf {
    let name = target_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    parent.join(format!(".{}.tmp", name))
}

fn write_synced(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content)?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("services.yaml");

        atomic_write(&target, b"hello: world\n").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"hello: world\n");
    }

    #[test]
    fn test_atomic_write_replaces_existing() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("services.yaml");
        fs::write(&target, "old: content\nwith: more lines\n").unwrap();

        atomic_write(&target, b"new: 1\n").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "new: 1\n");
    }

    #[test]
    fn test_atomic_write_creates_parent() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("data").join("services.yaml");

        atomic_write(&target, b"nested: true\n").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"nested: true\n");
    }

    #[test]
    fn test_no_tmp_files_after_write() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("services.yaml");

        atomic_write(&target, b"clean: true\n").unwrap();

        let tmp_count = fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.file_name()
                    .to_str()
                    .map(|s| s.ends_with(".tmp"))
                    .unwrap_or(false)
            })
            .count();

        assert_eq!(tmp_count, 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_permissions_preserved() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("services.yaml");
        fs::write(&target, "a: 1\n").unwrap();
        fs::set_permissions(&target, fs::Permissions::from_mode(0o640)).unwrap();

        atomic_write(&target, b"a: 2\n").unwrap();

        let mode = fs::metadata(&target).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
    }
}
