use crate::{
    answers::{default_answers, resolve_answers, AnswerMode, DialoguerPrompter, Prompter},
    cli::{Commands, FinalizeArgs, NewArgs},
    error::Result,
    finalizer::{FileSet, TemplateFinalizer},
    generator::{Generator, GeneratorOptions},
    git,
    ioutils::absolutize,
    settings::{Settings, SettingsOverrides},
    store::StoredAnswers,
};

/// Dispatches a parsed subcommand.
pub fn run(command: Commands) -> Result<()> {
    match command {
        Commands::New(args) => run_new(args, &DialoguerPrompter),
        Commands::Finalize(args) => run_finalize(args),
    }
}

/// Generates a project: resolve answers, write templates, install, set up git.
pub fn run_new(args: NewArgs, prompter: &dyn Prompter) -> Result<()> {
    let destination = absolutize(&args.output_dir)?;
    let stored = StoredAnswers::load(&destination)?;
    let defaults = default_answers(&destination, &stored, git::config_value);

    let mode = if args.yes {
        AnswerMode::Yes
    } else if args.yes_defaults {
        AnswerMode::YesDefaults
    } else {
        AnswerMode::Ask
    };
    let answers = resolve_answers(&defaults, mode, prompter)?;
    StoredAnswers::from_settings(&answers).save(&destination)?;

    let options = GeneratorOptions {
        force: args.force,
        install: !args.skip_install,
        latest: args.latest,
        git_init: !args.no_git_init,
        git_push: args.git_push,
    };
    Generator::new(&destination, &answers, options).run()?;

    println!("Project generation completed successfully in {}.", destination.display());
    Ok(())
}

/// Finalizes a template checkout in place.
pub fn run_finalize(args: FinalizeArgs) -> Result<()> {
    let settings = Settings::from_overrides(SettingsOverrides::from_arg(args.answers.as_deref())?);
    let files = FileSet::resolve(&args.dir, args.entry.as_deref())?;
    let root = files.root().to_path_buf();

    let mut finalizer = TemplateFinalizer::new(files, settings);
    let report = finalizer.run(!args.skip_install)?;
    log::debug!("Finalize report: {report:?}");

    println!("Template finalized successfully in {}.", root.display());
    Ok(())
}
