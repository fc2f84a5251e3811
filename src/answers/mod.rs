//! Answers for a new project: defaults, prompting and merging.

pub mod prompter;

use cruet::case::{camel::to_camel_case, title::to_title_case};
use std::path::Path;

use crate::error::Result;
use crate::settings::Settings;
use crate::store::StoredAnswers;

pub use prompter::{DialoguerPrompter, Prompter, Question};

/// Questions in the order they are asked.
pub const QUESTIONS: &[Question] = &[
    Question { key: "name", help: "Your name" },
    Question { key: "email", help: "Your email" },
    Question { key: "website", help: "Your website" },
    Question { key: "moduleName", help: "Module name" },
    Question { key: "moduleDescription", help: "Module description" },
    Question { key: "githubUsername", help: "GitHub username" },
];

/// How much to ask before generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerMode {
    /// Ask every question, pre-filled with its default.
    Ask,
    /// Ask only questions that have no default.
    YesDefaults,
    /// Ask nothing and take the defaults.
    Yes,
}

/// Computes default answers for a project at `project_root`.
///
/// Stored answers win, then `git_config` (queried with git config keys such
/// as `user.name`), then the empty string. The module name is the directory
/// name.
pub fn default_answers(
    project_root: &Path,
    stored: &StoredAnswers,
    git_config: impl Fn(&str) -> Option<String>,
) -> Settings {
    let remembered = |key: &str, git_key: Option<&str>| -> String {
        stored
            .get(key)
            .map(str::to_string)
            .or_else(|| git_key.and_then(&git_config))
            .unwrap_or_default()
    };

    let module_name = project_root
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    Settings {
        name: remembered("name", Some("user.name")),
        email: remembered("email", Some("user.email")),
        website: remembered("website", None),
        camel_module_name: to_camel_case(&module_name),
        human_module_name: to_title_case(&module_name),
        module_name,
        module_description: String::new(),
        github_username: remembered("githubUsername", Some("github.user")),
    }
}

/// Resolves final answers from `defaults` according to `mode`.
///
/// Derived module names follow the answered module name unless the defaults
/// were already derived from the same name.
pub fn resolve_answers(
    defaults: &Settings,
    mode: AnswerMode,
    prompter: &dyn Prompter,
) -> Result<Settings> {
    let mut answers = defaults.clone();

    for question in QUESTIONS {
        let default = defaults.lookup(question.key).unwrap_or_default();
        let should_ask = match mode {
            AnswerMode::Ask => true,
            AnswerMode::YesDefaults => default.is_empty(),
            AnswerMode::Yes => false,
        };
        if !should_ask {
            continue;
        }

        let answer = prompter.ask(question, default)?;
        log::debug!("Answer for '{}': {answer:?}", question.key);
        if let Some(slot) = answers.lookup_mut(question.key) {
            *slot = answer;
        }
    }

    if answers.module_name != defaults.module_name {
        answers.camel_module_name = to_camel_case(&answers.module_name);
        answers.human_module_name = to_title_case(&answers.module_name);
    }

    Ok(answers)
}
