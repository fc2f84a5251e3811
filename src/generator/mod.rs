//! Writes a new library project from the embedded templates.

pub mod templates;

use std::path::{Path, PathBuf};

use crate::constants::INITIAL_COMMIT_MESSAGE;
use crate::error::{Error, Result};
use crate::git::{self, GitRepo};
use crate::installer::{Installer, PackageManager};
use crate::ioutils::write_file;
use crate::placeholder::substitute;
use crate::settings::Settings;

pub use templates::{Stage, Template, TEMPLATES};

/// Switches for the install step of a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub force: bool,
    pub install: bool,
    pub latest: bool,
    pub git_init: bool,
    pub git_push: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self { force: false, install: true, latest: false, git_init: true, git_push: false }
    }
}

pub struct Generator<'a> {
    destination: PathBuf,
    answers: &'a Settings,
    options: GeneratorOptions,
}

impl<'a> Generator<'a> {
    pub fn new<P: Into<PathBuf>>(
        destination: P,
        answers: &'a Settings,
        options: GeneratorOptions,
    ) -> Self {
        Self { destination: destination.into(), answers, options }
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Writes every template, then installs dependencies and sets up git.
    pub fn run(&self) -> Result<Vec<PathBuf>> {
        let mut written = self.write_stage(Stage::Configuring)?;
        written.extend(self.write_stage(Stage::Writing)?);

        if self.options.install {
            Installer::new(PackageManager::detect(), &self.destination)
                .with_latest(self.options.latest)
                .install()?;
        }

        if self.options.git_init {
            if git::is_available() {
                self.init_repository()?;
            } else {
                log::warn!("git is not installed, skipping repository setup");
            }
        }

        Ok(written)
    }

    /// Writes the templates of `stage`. Existing files are only replaced with `force`.
    pub fn write_stage(&self, stage: Stage) -> Result<Vec<PathBuf>> {
        templates::for_stage(stage).map(|template| self.write_template(template)).collect()
    }

    fn write_template(&self, template: &Template) -> Result<PathBuf> {
        let target = self.destination.join(template.name);
        let target_exists = target.exists();
        if target_exists && !self.options.force {
            return Err(Error::OutputFileExistsError { path: target.display().to_string() });
        }

        let content = if template.render {
            substitute(template.content, self.answers)
        } else {
            template.content.to_string()
        };
        write_file(&content, &target)?;

        if target_exists {
            log::info!("Writing to '{}' (overwriting existing file)", target.display());
        } else {
            log::info!("Writing to '{}'", target.display());
        }
        Ok(target)
    }

    fn init_repository(&self) -> Result<()> {
        let repo = GitRepo::new(&self.destination);
        let names: Vec<&str> = TEMPLATES.iter().map(|t| t.name).collect();

        repo.init()?;
        repo.add(&names)?;
        repo.commit(INITIAL_COMMIT_MESSAGE)?;

        if self.options.git_push {
            self.push(&repo)?;
        }
        Ok(())
    }

    fn push(&self, repo: &GitRepo) -> Result<()> {
        let Some(remote) =
            git::github_remote(&self.answers.github_username, &self.answers.module_name)
        else {
            log::warn!("GitHub username or module name missing, not pushing");
            return Ok(());
        };

        if !repo.remote_exists(&remote) {
            println!("Remote url not found");
            return Ok(());
        }

        repo.add_remote("origin", &remote)?;
        repo.push("origin", "master")
    }
}
