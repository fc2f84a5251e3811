//! Constants used throughout the scaffold application

/// File names the finalizer operates on
pub mod files {
    pub const LICENSE: &str = "LICENSE";
    pub const PACKAGE: &str = "package.json";
    pub const APP_README: &str = "APP_README.md";
    pub const README: &str = "README.md";
}

/// Default installer entry shipped with template repositories
pub const DEFAULT_SELF_ENTRY: &str = "install";

/// Directory holding pre-substitution copies of the finalized files
pub const BACKUP_DIR: &str = ".backup";

/// Stored prompt values, kept in the generated project
pub const STORE_FILENAME: &str = ".scaffold.yaml";

/// STDIN indicator for CLI arguments
pub const STDIN_INDICATOR: &str = "-";

/// Relay prefixes for install output
pub mod relay {
    pub const STDOUT: &str = "⌵";
    pub const STDERR: &str = "⨯";
}

/// Initial commit message for freshly generated projects
pub const INITIAL_COMMIT_MESSAGE: &str = "Initial";

/// Exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
