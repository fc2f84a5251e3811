use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Creates `dir` unless it already exists. Returns whether it was created.
pub fn create_dir_once<P: AsRef<Path>>(dir: P) -> Result<bool> {
    let dir = dir.as_ref();
    if dir.is_dir() {
        return Ok(false);
    }
    std::fs::create_dir_all(dir).map_err(Error::IoError)?;
    Ok(true)
}

/// Copies `source_path` to `dest_path` and flushes the copy to disk before returning.
pub fn copy_file_synced<P: AsRef<Path>, Q: AsRef<Path>>(
    source_path: P,
    dest_path: Q,
) -> Result<u64> {
    let mut reader = File::open(source_path.as_ref())?;
    let mut writer = File::create(dest_path.as_ref())?;
    let copied = std::io::copy(&mut reader, &mut writer)?;
    writer.sync_all()?;
    Ok(copied)
}

/// Writes `content` through a temp file in the destination directory, then
/// persists it over `dest_path`. An existing destination keeps its permissions.
pub fn write_file_atomic<P: AsRef<Path>>(content: &str, dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    let parent = match dest_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir()?,
    };

    let mut tmp = tempfile::NamedTempFile::new_in(&parent)?;
    tmp.write_all(content.as_bytes())?;
    if let Ok(existing) = std::fs::metadata(dest_path) {
        tmp.as_file().set_permissions(existing.permissions())?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(dest_path).map_err(|e| Error::IoError(e.error))?;
    Ok(())
}

/// Writes `content` to `dest_path`, creating parent directories if needed.
pub fn write_file<P: AsRef<Path>>(content: &str, dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    if let Some(parent) = dest_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(dest_path, content).map_err(Error::IoError)
}

/// Hex-encoded SHA-256 of a file's contents.
pub fn sha256_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let mut file = File::open(path.as_ref())?;
    let mut hasher = Sha256::new();
    std::io::copy(&mut file, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}

/// Resolves `path` against the current working directory.
pub fn absolutize<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

pub fn read_from(mut reader: impl std::io::Read) -> Result<String> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf).map_err(Error::IoError)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn create_dir_once_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("nested").join(".backup");
        assert!(create_dir_once(&dir).unwrap());
        std::fs::write(dir.join("kept"), "x").unwrap();
        assert!(!create_dir_once(&dir).unwrap());
        assert_eq!(std::fs::read_to_string(dir.join("kept")).unwrap(), "x");
    }

    #[test]
    fn copy_file_synced_preserves_bytes() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src.bin");
        let dst = tmp.path().join("dst.bin");
        let bytes: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
        std::fs::write(&src, &bytes).unwrap();

        assert_eq!(copy_file_synced(&src, &dst).unwrap(), 4096);
        assert_eq!(std::fs::read(&dst).unwrap(), bytes);
        assert_eq!(sha256_file(&src).unwrap(), sha256_file(&dst).unwrap());
    }

    #[test]
    fn copy_file_synced_reports_missing_source() {
        let tmp = TempDir::new().unwrap();
        let result = copy_file_synced(tmp.path().join("nope"), tmp.path().join("dst"));
        assert!(matches!(result, Err(Error::IoError(_))));
    }

    #[test]
    fn write_file_atomic_replaces_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("LICENSE");
        std::fs::write(&path, "old").unwrap();
        write_file_atomic("new", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn write_file_atomic_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("LICENSE");
        std::fs::write(&path, "old").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        write_file_atomic("new", &path).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[test]
    fn sha256_of_known_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("abc");
        std::fs::write(&path, "abc").unwrap();
        assert_eq!(
            sha256_file(&path).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
