/// Handles argument parsing and command dispatch.
pub mod cli;

/// Defines custom error types.
pub mod error;

/// Constants shared across modules.
pub mod constants;

/// Template variables and their defaults.
pub mod settings;

/// `<%= identifier %>` placeholder substitution.
pub mod placeholder;

/// Backup, rewrite and self-removal of a cloned template.
pub mod finalizer;

/// Dependency installation through yarn or npm.
pub mod installer;

/// Default answers and prompting.
pub mod answers;

/// Answers remembered between runs.
pub mod store;

/// Project generation from embedded templates.
pub mod generator;

/// Git plumbing through the `git` command.
pub mod git;

/// A set of helpers for working with the file system.
pub mod ioutils;
