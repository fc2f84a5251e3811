//! Dependency installation through the detected package manager.

use std::fmt::Display;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::constants::{files, relay};
use crate::error::{Error, Result};

/// Package managers the installer knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Yarn,
    Npm,
}

impl Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program())
    }
}

impl PackageManager {
    /// Prefers `yarn` when it is on `PATH`, otherwise falls back to `npm`.
    pub fn detect() -> Self {
        if which::which("yarn").is_ok() {
            PackageManager::Yarn
        } else {
            PackageManager::Npm
        }
    }

    pub fn program(&self) -> &'static str {
        match self {
            PackageManager::Yarn => "yarn",
            PackageManager::Npm => "npm",
        }
    }

    /// `<pm> install`
    pub fn install_command(&self) -> String {
        format!("{} install", self.program())
    }

    /// Command adding `packages`, as regular or dev dependencies.
    pub fn add_command(&self, packages: &[String], dev: bool) -> String {
        let verb = match (self, dev) {
            (PackageManager::Yarn, false) => "add",
            (PackageManager::Yarn, true) => "add --dev",
            (PackageManager::Npm, false) => "install",
            (PackageManager::Npm, true) => "install --save-dev",
        };
        format!("{} {} {}", self.program(), verb, packages.join(" "))
    }
}

/// What a finished install command printed and how it exited.
#[derive(Debug, Default)]
pub struct CommandOutcome {
    /// Exit code, `None` when the child was killed by a signal.
    pub code: Option<i32>,
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
}

impl CommandOutcome {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

fn shell_command(command_line: &str) -> Command {
    #[cfg(windows)]
    {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg(command_line);
        cmd
    }
    #[cfg(not(windows))]
    {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command_line);
        cmd
    }
}

/// Reads `reader` line by line, relaying each line with `prefix` as it arrives.
fn relay_lines(reader: impl Read, prefix: &str) -> std::io::Result<Vec<String>> {
    let mut reader = BufReader::new(reader);
    let mut lines = Vec::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\r', '\n']).to_string();
        println!("{prefix} {line}");
        lines.push(line);
    }
    Ok(lines)
}

/// Runs `command_line` through the platform shell in `cwd`, streaming its output.
///
/// A failure to start the shell is returned as [`Error::InstallLaunchError`].
/// A non-zero exit is logged and reported through [`CommandOutcome::code`].
pub fn run_streamed<P: AsRef<Path>>(command_line: &str, cwd: P) -> Result<CommandOutcome> {
    log::debug!("Running '{command_line}' in {}", cwd.as_ref().display());

    let mut child = shell_command(command_line)
        .current_dir(cwd.as_ref())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| Error::InstallLaunchError {
            command: command_line.to_string(),
            source,
        })?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    // Both pipes are drained at once so neither can fill up and stall the child.
    let (stdout, stderr) = std::thread::scope(|s| {
        let stderr_reader = s.spawn(move || match stderr {
            Some(pipe) => relay_lines(pipe, relay::STDERR),
            None => Ok(Vec::new()),
        });
        let stdout = match stdout {
            Some(pipe) => relay_lines(pipe, relay::STDOUT),
            None => Ok(Vec::new()),
        };
        let stderr = stderr_reader
            .join()
            .unwrap_or_else(|_| Err(std::io::Error::other("stderr reader panicked")));
        (stdout, stderr)
    });

    let status = child.wait()?;
    let outcome = CommandOutcome { code: status.code(), stdout: stdout?, stderr: stderr? };

    match outcome.code {
        Some(code) => println!("child process exited with code {code}"),
        None => println!("child process exited with code null"),
    }
    if !outcome.success() {
        log::warn!("'{command_line}' exited with status {status}");
    }

    Ok(outcome)
}

/// Installs project dependencies with a package manager.
pub struct Installer {
    manager: PackageManager,
    project_root: PathBuf,
    latest: bool,
    command: Option<String>,
}

impl Installer {
    pub fn new<P: Into<PathBuf>>(manager: PackageManager, project_root: P) -> Self {
        Self { manager, project_root: project_root.into(), latest: false, command: None }
    }

    /// Runs `command_line` instead of the package manager's own install command.
    pub fn with_command<S: Into<String>>(mut self, command_line: S) -> Self {
        self.command = Some(command_line.into());
        self
    }

    /// Installs every dependency listed in `package.json` at `@latest` instead
    /// of the pinned versions.
    pub fn with_latest(mut self, latest: bool) -> Self {
        self.latest = latest;
        self
    }

    pub fn manager(&self) -> PackageManager {
        self.manager
    }

    /// Shell command lines this installer will run, in order.
    pub fn plan(&self) -> Result<Vec<String>> {
        if let Some(command_line) = &self.command {
            return Ok(vec![command_line.clone()]);
        }
        if !self.latest {
            return Ok(vec![self.manager.install_command()]);
        }

        let package_json = self.project_root.join(files::PACKAGE);
        let manifest: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(package_json)?)?;

        let at_latest = |section: &str| -> Vec<String> {
            manifest
                .get(section)
                .and_then(|deps| deps.as_object())
                .map(|deps| deps.keys().map(|dep| format!("{dep}@latest")).collect())
                .unwrap_or_default()
        };

        let dependencies = at_latest("dependencies");
        let dev_dependencies = at_latest("devDependencies");

        let mut plan = Vec::new();
        if dependencies.is_empty() {
            plan.push(self.manager.install_command());
        } else {
            plan.push(self.manager.add_command(&dependencies, false));
        }
        if !dev_dependencies.is_empty() {
            plan.push(self.manager.add_command(&dev_dependencies, true));
        }
        Ok(plan)
    }

    /// Runs the install plan. Non-zero exits are logged, not returned as errors.
    pub fn install(&self) -> Result<Vec<CommandOutcome>> {
        log::info!("Installing dependencies with {}", self.manager);
        self.plan()?
            .iter()
            .map(|command_line| run_streamed(command_line, &self.project_root))
            .collect()
    }
}
