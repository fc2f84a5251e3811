//! One-shot finalization of a freshly cloned template repository.
//!
//! The finalizer backs up the template files, rewrites their placeholders,
//! promotes `APP_README.md` over the instructional `README.md`, removes its
//! own installer entry and finally installs dependencies:
//! - `fileset`: the fixed set of files and their roles
//! - `backup`: the recovery folder the files are copied into first

pub mod backup;
pub mod fileset;

use rayon::prelude::*;
use std::path::PathBuf;

use crate::constants::BACKUP_DIR;
use crate::error::Result;
use crate::installer::{CommandOutcome, Installer, PackageManager};
use crate::ioutils::write_file_atomic;
use crate::placeholder::substitute;
use crate::settings::Settings;

pub use backup::{BackupFolder, BackupOutcome};
pub use fileset::{FileRole, FileSet};

/// Phases that have completed on this finalizer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub backed_up: bool,
    pub substituted: bool,
    pub promoted: bool,
    pub entry_removed: bool,
}

/// Summary of a finished [`TemplateFinalizer::run`].
#[derive(Debug)]
pub struct FinalizeReport {
    pub backups: Vec<BackupOutcome>,
    pub rewritten: Vec<PathBuf>,
    pub entry_removed: bool,
    /// `None` when installation was skipped.
    pub install: Option<Vec<CommandOutcome>>,
}

pub struct TemplateFinalizer {
    files: FileSet,
    backup: BackupFolder,
    settings: Settings,
    installer: Installer,
    progress: Progress,
}

impl TemplateFinalizer {
    pub fn new(files: FileSet, settings: Settings) -> Self {
        let backup = BackupFolder::new(files.root().join(BACKUP_DIR));
        let installer = Installer::new(PackageManager::detect(), files.root());
        Self { files, backup, settings, installer, progress: Progress::default() }
    }

    pub fn with_installer(mut self, installer: Installer) -> Self {
        self.installer = installer;
        self
    }

    pub fn files(&self) -> &FileSet {
        &self.files
    }

    pub fn backup_folder(&self) -> &BackupFolder {
        &self.backup
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    /// Runs every phase in order. Any failure before the install trigger
    /// stops the sequence; the backup folder is left for manual recovery.
    pub fn run(&mut self, install: bool) -> Result<FinalizeReport> {
        let backups = self.backup()?;
        let rewritten = self.substitute()?;
        self.promote()?;
        let entry_removed = self.remove_entry()?;

        let install = if install {
            Some(self.install_dependencies()?)
        } else {
            log::info!("Skipping dependency installation");
            None
        };

        Ok(FinalizeReport { backups, rewritten, entry_removed, install })
    }

    /// Copies every file of the set into the backup folder.
    ///
    /// Copies run in parallel and all of them finish before this returns.
    pub fn backup(&mut self) -> Result<Vec<BackupOutcome>> {
        log::info!("Backing up template files to {}", self.backup.path().display());
        self.files.ensure_exists(&FileRole::ALL)?;
        self.backup.ensure()?;

        let sources: Vec<_> = self.files.iter().map(|(_, path)| path).collect();
        let outcomes = sources
            .par_iter()
            .map(|source| self.backup.store(source))
            .collect::<Result<Vec<_>>>()?;

        self.progress.backed_up = true;
        log::info!("Backed up {} files", outcomes.len());
        Ok(outcomes)
    }

    /// Rewrites the placeholders of the templated files in place.
    ///
    /// Each file is replaced atomically. The set as a whole is not: a failure
    /// can leave some files rewritten and others untouched.
    pub fn substitute(&mut self) -> Result<Vec<PathBuf>> {
        log::info!("Substituting placeholders");
        self.files.ensure_exists(&FileRole::TEMPLATED)?;

        let settings = &self.settings;
        let rewritten = FileRole::TEMPLATED
            .par_iter()
            .map(|role| -> Result<PathBuf> {
                let path = self.files.path(*role);
                let content = std::fs::read_to_string(path)?;
                write_file_atomic(&substitute(&content, settings), path)?;
                log::debug!("Rewrote {role} file {}", path.display());
                Ok(path.to_path_buf())
            })
            .collect::<Result<Vec<_>>>()?;

        self.progress.substituted = true;
        log::info!("Substituted placeholders in {} files", rewritten.len());
        Ok(rewritten)
    }

    /// Deletes the instructional readme and moves the app readme in its place.
    ///
    /// The two steps are not atomic; if interrupted in between, neither file
    /// is at the readme path and the backup folder holds both.
    pub fn promote(&mut self) -> Result<()> {
        let readme = self.files.path(FileRole::Readme);
        let app_readme = self.files.path(FileRole::AppReadme);
        log::info!("Promoting {} to {}", app_readme.display(), readme.display());
        self.files.ensure_exists(&[FileRole::AppReadme])?;

        if readme.exists() {
            std::fs::remove_file(readme)?;
        }
        std::fs::rename(app_readme, readme)?;

        self.progress.promoted = true;
        log::info!("Promoted {}", readme.display());
        Ok(())
    }

    /// Deletes the installer entry. Returns whether a file was removed;
    /// calling it again, or with the entry already gone, is a no-op.
    pub fn remove_entry(&mut self) -> Result<bool> {
        let entry = self.files.path(FileRole::SelfEntry);
        if self.progress.entry_removed || !entry.exists() {
            log::debug!("Installer entry {} already removed", entry.display());
            self.progress.entry_removed = true;
            return Ok(false);
        }

        std::fs::remove_file(entry)?;
        log::info!("Removed installer entry {}", entry.display());
        self.progress.entry_removed = true;
        Ok(true)
    }

    /// Runs the package manager. A non-zero exit is reported in the outcome,
    /// only a failure to launch is an error.
    pub fn install_dependencies(&self) -> Result<Vec<CommandOutcome>> {
        let outcomes = self.installer.install()?;
        log::info!("Dependency installation finished");
        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seed(root: &std::path::Path) {
        std::fs::write(root.join("LICENSE"), "MIT <%= name %>").unwrap();
        std::fs::write(root.join("package.json"), r#"{"name":"<%= moduleName %>"}"#).unwrap();
        std::fs::write(root.join("APP_README.md"), "# <%= moduleName %>").unwrap();
        std::fs::write(root.join("README.md"), "Run ./install").unwrap();
        std::fs::write(root.join("install"), "#!/bin/sh\n").unwrap();
    }

    fn finalizer(root: &std::path::Path) -> TemplateFinalizer {
        let files = FileSet::resolve(root, None).unwrap();
        let settings = Settings {
            name: "Ada".into(),
            module_name: "left-pad".into(),
            ..Default::default()
        };
        TemplateFinalizer::new(files, settings)
    }

    #[test]
    fn run_without_install_finishes_all_file_phases() {
        let tmp = TempDir::new().unwrap();
        seed(tmp.path());
        let mut finalizer = finalizer(tmp.path());

        let report = finalizer.run(false).unwrap();

        assert_eq!(report.backups.len(), 5);
        assert_eq!(report.rewritten.len(), 3);
        assert!(report.entry_removed);
        assert!(report.install.is_none());
        assert_eq!(
            finalizer.progress(),
            Progress { backed_up: true, substituted: true, promoted: true, entry_removed: true }
        );
        assert_eq!(std::fs::read_to_string(tmp.path().join("README.md")).unwrap(), "# left-pad");
        assert!(!tmp.path().join("APP_README.md").exists());
    }

    #[cfg(unix)]
    #[test]
    fn install_runs_after_entry_removal_and_failure_is_reported() {
        let tmp = TempDir::new().unwrap();
        seed(tmp.path());
        let installer = Installer::new(PackageManager::Npm, tmp.path())
            .with_command("test ! -e install && test -e README.md && exit 3");
        let mut finalizer = finalizer(tmp.path()).with_installer(installer);

        let report = finalizer.run(true).unwrap();

        let outcomes = report.install.unwrap();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].code, Some(3));
        assert!(!outcomes[0].success());
        assert!(report.entry_removed);
    }

    #[cfg(unix)]
    #[test]
    fn successful_install_is_reported() {
        let tmp = TempDir::new().unwrap();
        seed(tmp.path());
        let installer = Installer::new(PackageManager::Npm, tmp.path()).with_command("echo done");
        let mut finalizer = finalizer(tmp.path()).with_installer(installer);

        let report = finalizer.run(true).unwrap();

        let outcomes = report.install.unwrap();
        assert!(outcomes[0].success());
        assert_eq!(outcomes[0].stdout, vec!["done".to_string()]);
    }

    #[test]
    fn backup_failure_stops_before_substitution() {
        let tmp = TempDir::new().unwrap();
        seed(tmp.path());
        std::fs::remove_file(tmp.path().join("package.json")).unwrap();
        let mut finalizer = finalizer(tmp.path());

        assert!(finalizer.run(false).is_err());
        assert_eq!(finalizer.progress(), Progress::default());
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("LICENSE")).unwrap(),
            "MIT <%= name %>"
        );
        assert!(tmp.path().join("install").exists());
    }

    #[test]
    fn remove_entry_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        seed(tmp.path());
        let mut finalizer = finalizer(tmp.path());

        assert!(finalizer.remove_entry().unwrap());
        assert!(!finalizer.remove_entry().unwrap());
    }

    #[test]
    fn remove_entry_tolerates_missing_file() {
        let tmp = TempDir::new().unwrap();
        seed(tmp.path());
        std::fs::remove_file(tmp.path().join("install")).unwrap();
        let mut finalizer = finalizer(tmp.path());

        assert!(!finalizer.remove_entry().unwrap());
        assert!(finalizer.progress().entry_removed);
    }

    #[test]
    fn promote_requires_app_readme() {
        let tmp = TempDir::new().unwrap();
        seed(tmp.path());
        std::fs::remove_file(tmp.path().join("APP_README.md")).unwrap();
        let mut finalizer = finalizer(tmp.path());

        assert!(finalizer.promote().is_err());
        assert!(tmp.path().join("README.md").exists());
    }
}
