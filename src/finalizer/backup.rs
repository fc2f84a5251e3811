use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::ioutils::{copy_file_synced, create_dir_once, sha256_file};

/// Result of storing one file in the backup folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupOutcome {
    /// A fresh, verified copy was written.
    Copied { target: PathBuf, bytes: u64 },
    /// An identical backup already existed and was left untouched.
    AlreadyPresent { target: PathBuf },
    /// A backup with this name already existed with different content. It is
    /// kept as is; the source has changed since it was taken.
    Diverged { target: PathBuf },
}

impl BackupOutcome {
    pub fn target(&self) -> &Path {
        match self {
            BackupOutcome::Copied { target, .. } => target,
            BackupOutcome::AlreadyPresent { target } => target,
            BackupOutcome::Diverged { target } => target,
        }
    }
}

/// Directory holding pre-substitution copies, keyed by file name.
#[derive(Debug, Clone)]
pub struct BackupFolder {
    path: PathBuf,
}

impl BackupFolder {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the folder if it is missing. Returns whether it was created.
    pub fn ensure(&self) -> Result<bool> {
        let created = create_dir_once(&self.path)?;
        if created {
            log::debug!("Created backup folder {}", self.path.display());
        }
        Ok(created)
    }

    /// Where `source` is (or would be) backed up.
    pub fn target_for<P: AsRef<Path>>(&self, source: P) -> Result<PathBuf> {
        let source = source.as_ref();
        let name = source.file_name().ok_or_else(|| {
            Error::Other(anyhow::anyhow!("'{}' has no file name", source.display()))
        })?;
        Ok(self.path.join(name))
    }

    /// Copies `source` into the folder under its base name.
    ///
    /// An existing backup is never overwritten, so repeated runs keep the
    /// oldest copy. It is compared with the source and reported as
    /// [`BackupOutcome::Diverged`] when they differ. A fresh copy is checked
    /// against its source digest.
    pub fn store<P: AsRef<Path>>(&self, source: P) -> Result<BackupOutcome> {
        let source = source.as_ref();
        let target = self.target_for(source)?;

        if target.exists() {
            if sha256_file(source)? == sha256_file(&target)? {
                log::debug!(
                    "Keeping existing backup {} for {}",
                    target.display(),
                    source.display()
                );
                return Ok(BackupOutcome::AlreadyPresent { target });
            }
            log::warn!(
                "Existing backup {} differs from {}, keeping the older copy",
                target.display(),
                source.display()
            );
            return Ok(BackupOutcome::Diverged { target });
        }

        let bytes = copy_file_synced(source, &target)?;
        if sha256_file(source)? != sha256_file(&target)? {
            return Err(Error::BackupMismatch { path: source.display().to_string() });
        }

        log::debug!("Backed up {} to {} ({bytes} bytes)", source.display(), target.display());
        Ok(BackupOutcome::Copied { target, bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn stores_under_base_name() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("LICENSE");
        std::fs::write(&source, "MIT <%= name %>").unwrap();

        let folder = BackupFolder::new(tmp.path().join(".backup"));
        folder.ensure().unwrap();
        let outcome = folder.store(&source).unwrap();

        let expected = tmp.path().join(".backup").join("LICENSE");
        assert_eq!(outcome, BackupOutcome::Copied { target: expected.clone(), bytes: 15 });
        assert_eq!(std::fs::read_to_string(expected).unwrap(), "MIT <%= name %>");
    }

    #[test]
    fn identical_backup_is_already_present() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("LICENSE");
        let folder = BackupFolder::new(tmp.path().join(".backup"));
        folder.ensure().unwrap();

        std::fs::write(&source, "original").unwrap();
        folder.store(&source).unwrap();
        let outcome = folder.store(&source).unwrap();

        assert!(matches!(outcome, BackupOutcome::AlreadyPresent { .. }));
    }

    #[test]
    fn never_overwrites_an_existing_backup() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("LICENSE");
        let folder = BackupFolder::new(tmp.path().join(".backup"));
        folder.ensure().unwrap();

        std::fs::write(&source, "original").unwrap();
        folder.store(&source).unwrap();
        std::fs::write(&source, "rewritten").unwrap();
        let outcome = folder.store(&source).unwrap();

        assert!(matches!(outcome, BackupOutcome::Diverged { .. }));
        assert_eq!(std::fs::read_to_string(outcome.target()).unwrap(), "original");
    }

    #[test]
    fn stale_backup_is_reported_as_diverged() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("LICENSE");
        std::fs::write(&source, "MIT <%= name %>").unwrap();
        let folder = BackupFolder::new(tmp.path().join(".backup"));
        folder.ensure().unwrap();
        std::fs::write(folder.path().join("LICENSE"), "stale").unwrap();

        let outcome = folder.store(&source).unwrap();

        let expected = folder.path().join("LICENSE");
        assert_eq!(outcome, BackupOutcome::Diverged { target: expected.clone() });
        assert_eq!(std::fs::read_to_string(expected).unwrap(), "stale");
    }

    #[test]
    fn ensure_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let folder = BackupFolder::new(tmp.path().join(".backup"));
        assert!(folder.ensure().unwrap());
        assert!(!folder.ensure().unwrap());
    }

    #[test]
    fn missing_source_is_an_io_error() {
        let tmp = TempDir::new().unwrap();
        let folder = BackupFolder::new(tmp.path().join(".backup"));
        folder.ensure().unwrap();
        let result = folder.store(tmp.path().join("absent"));
        assert!(matches!(result, Err(Error::IoError(_))));
    }
}
