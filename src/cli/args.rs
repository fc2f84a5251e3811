use crate::constants::verbosity;
use clap::{Args as ClapArgs, Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

/// Top-level CLI.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate a new library project.
    New(NewArgs),
    /// Finalize a cloned template: back up, fill placeholders, remove the installer.
    Finalize(FinalizeArgs),
}

impl Commands {
    pub fn verbose(&self) -> u8 {
        match self {
            Commands::New(args) => args.verbose,
            Commands::Finalize(args) => args.verbose,
        }
    }
}

/// Arguments of `scaffold new`.
#[derive(ClapArgs, Debug, Clone)]
pub struct NewArgs {
    /// Destination directory for generated files.
    #[arg(value_name = "OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Agree on every question, don't ask anything.
    #[arg(short, long, conflicts_with = "yes_defaults")]
    pub yes: bool,

    /// Ask only questions which don't have a default or saved answer.
    #[arg(short = 'd', long = "yes-defaults")]
    pub yes_defaults: bool,

    /// Don't initialize a git repository.
    #[arg(long = "no-git-init")]
    pub no_git_init: bool,

    /// Push the initial commit to GitHub.
    #[arg(short = 'p', long = "git-push")]
    pub git_push: bool,

    /// Install latest versions of dependencies. Correct work is not guaranteed.
    #[arg(short, long)]
    pub latest: bool,

    /// Overwrite files that already exist in the output directory.
    #[arg(short, long)]
    pub force: bool,

    /// Don't run the package manager.
    #[arg(long = "skip-install")]
    pub skip_install: bool,

    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Arguments of `scaffold finalize`.
#[derive(ClapArgs, Debug, Clone)]
pub struct FinalizeArgs {
    /// Project directory holding the template files.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Settings as a JSON object, or `-` to read them from stdin.
    #[arg(short, long)]
    pub answers: Option<String>,

    /// Installer entry removed once finalization succeeds.
    #[arg(long, value_name = "PATH")]
    pub entry: Option<PathBuf>,

    /// Don't run the package manager.
    #[arg(long = "skip-install")]
    pub skip_install: bool,

    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parse command line arguments.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}
