use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON. Original error: {0}")]
    JSONParseError(#[from] serde_json::Error),

    #[error("Failed to parse YAML. Original error: {0}")]
    YAMLParseError(#[from] serde_yaml::Error),

    #[error("Prompt failed. Original error: {0}")]
    PromptError(#[from] dialoguer::Error),

    /// A file the finalizer relies on is not where it is expected.
    #[error("Cannot proceed: {role} file '{path}' does not exist.")]
    MissingFile { role: String, path: String },

    /// Two files of the set would be backed up under the same name.
    #[error("Cannot proceed: installer entry '{path}' shares the backup name '{name}' with another template file.")]
    BackupNameCollision { path: String, name: String },

    /// The backup copy does not match the file it was taken from.
    #[error("Backup of '{path}' does not match its source.")]
    BackupMismatch { path: String },

    /// The install command could not be started at all.
    #[error("Failed to launch '{command}'. Original error: {source}")]
    InstallLaunchError {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// When an external command has executed but finished with an error.
    #[error("Command '{command}' failed with status: {status}")]
    CommandError { command: String, status: ExitStatus },

    #[error("Cannot proceed: '{path}' already exists. Use --force to overwrite it.")]
    OutputFileExistsError { path: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience type alias for Results with the crate error as the error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(crate::constants::exit_codes::FAILURE);
}
