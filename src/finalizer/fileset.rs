use std::fmt::Display;
use std::path::{Path, PathBuf};

use crate::constants::{files, DEFAULT_SELF_ENTRY};
use crate::error::{Error, Result};
use crate::ioutils::absolutize;

/// Logical role of a file the finalizer touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileRole {
    License,
    Package,
    AppReadme,
    Readme,
    SelfEntry,
}

impl Display for FileRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FileRole::License => "license",
            FileRole::Package => "package",
            FileRole::AppReadme => "appReadme",
            FileRole::Readme => "readme",
            FileRole::SelfEntry => "selfEntry",
        };
        write!(f, "{s}")
    }
}

impl FileRole {
    pub const ALL: [FileRole; 5] = [
        FileRole::License,
        FileRole::Package,
        FileRole::AppReadme,
        FileRole::Readme,
        FileRole::SelfEntry,
    ];

    /// Roles whose content carries placeholders.
    pub const TEMPLATED: [FileRole; 3] =
        [FileRole::License, FileRole::Package, FileRole::AppReadme];
}

/// Absolute paths for every [`FileRole`], fixed at construction.
#[derive(Debug, Clone)]
pub struct FileSet {
    root: PathBuf,
    license: PathBuf,
    package: PathBuf,
    app_readme: PathBuf,
    readme: PathBuf,
    self_entry: PathBuf,
}

impl FileSet {
    /// Resolves the file set under `root`. A relative `self_entry` is taken
    /// relative to `root`; `None` selects the default installer entry.
    /// An entry named like another file of the set is rejected with
    /// [`Error::BackupNameCollision`].
    pub fn resolve<P: AsRef<Path>>(root: P, self_entry: Option<&Path>) -> Result<Self> {
        let root = absolutize(root)?;
        let self_entry = match self_entry {
            Some(entry) if entry.is_absolute() => entry.to_path_buf(),
            Some(entry) => root.join(entry),
            None => root.join(DEFAULT_SELF_ENTRY),
        };

        // Backups are keyed by base name, so the entry must not reuse one.
        let entry_name = self_entry.file_name().map(|name| name.to_string_lossy().into_owned());
        if let Some(name) = entry_name {
            let taken = [files::LICENSE, files::PACKAGE, files::APP_README, files::README];
            if taken.contains(&name.as_str()) {
                return Err(Error::BackupNameCollision {
                    path: self_entry.display().to_string(),
                    name,
                });
            }
        }

        Ok(Self {
            license: root.join(files::LICENSE),
            package: root.join(files::PACKAGE),
            app_readme: root.join(files::APP_README),
            readme: root.join(files::README),
            self_entry,
            root,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, role: FileRole) -> &Path {
        match role {
            FileRole::License => &self.license,
            FileRole::Package => &self.package,
            FileRole::AppReadme => &self.app_readme,
            FileRole::Readme => &self.readme,
            FileRole::SelfEntry => &self.self_entry,
        }
    }

    /// Every role with its path, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (FileRole, &Path)> + '_ {
        FileRole::ALL.into_iter().map(move |role| (role, self.path(role)))
    }

    /// Fails with [`Error::MissingFile`] on the first role whose file is absent.
    pub fn ensure_exists(&self, roles: &[FileRole]) -> Result<()> {
        for role in roles {
            let path = self.path(*role);
            if !path.is_file() {
                return Err(Error::MissingFile {
                    role: role.to_string(),
                    path: path.display().to_string(),
                });
            }
        }
        Ok(())
    }
}
