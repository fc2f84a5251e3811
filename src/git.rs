use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// Whether a `git` executable is on `PATH`.
pub fn is_available() -> bool {
    which::which("git").is_ok()
}

/// Reads a git configuration value, e.g. `user.name`. Missing or empty
/// values, and a missing git, yield `None`.
pub fn config_value(key: &str) -> Option<String> {
    let output = Command::new("git")
        .args(["config", "--get", key])
        .stderr(Stdio::null())
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!value.is_empty()).then_some(value)
}

/// GitHub HTTPS remote for `user/module`.
pub fn github_remote(github_username: &str, module_name: &str) -> Option<String> {
    if github_username.is_empty() || module_name.is_empty() {
        return None;
    }
    Some(format!("https://github.com/{github_username}/{module_name}"))
}

/// A working tree driven through the `git` command line.
pub struct GitRepo {
    root: PathBuf,
}

impl GitRepo {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn git(&self, args: &[&str]) -> Result<()> {
        let command = format!("git {}", args.join(" "));
        log::debug!("Running '{command}' in {}", self.root.display());
        let status = Command::new("git").args(args).current_dir(&self.root).status()?;
        if !status.success() {
            return Err(Error::CommandError { command, status });
        }
        Ok(())
    }

    pub fn init(&self) -> Result<()> {
        self.git(&["init"])
    }

    pub fn add<S: AsRef<str>>(&self, paths: &[S]) -> Result<()> {
        let mut args = vec!["add", "--"];
        args.extend(paths.iter().map(|path| path.as_ref()));
        self.git(&args)
    }

    pub fn commit(&self, message: &str) -> Result<()> {
        self.git(&["commit", "-m", message])
    }

    /// Whether `url` answers `git ls-remote`.
    pub fn remote_exists(&self, url: &str) -> bool {
        Command::new("git")
            .args(["ls-remote", "--exit-code", "-h", url])
            .current_dir(&self.root)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            // --exit-code returns 2 for a reachable repository without branches
            .map(|status| matches!(status.code(), Some(0) | Some(2)))
            .unwrap_or(false)
    }

    pub fn add_remote(&self, name: &str, url: &str) -> Result<()> {
        self.git(&["remote", "add", name, url])
    }

    pub fn push(&self, remote: &str, branch: &str) -> Result<()> {
        self.git(&["push", "-u", remote, branch])
    }
}
