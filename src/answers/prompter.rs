use dialoguer::Input;

use crate::error::Result;

/// A question asked while generating a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    /// Settings identifier the answer is stored under.
    pub key: &'static str,
    pub help: &'static str,
}

/// Source of answers for [`Question`]s.
pub trait Prompter {
    fn ask(&self, question: &Question, default: &str) -> Result<String>;
}

/// Asks questions on the terminal.
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn ask(&self, question: &Question, default: &str) -> Result<String> {
        let mut input = Input::<String>::new().with_prompt(question.help).allow_empty(true);
        if !default.is_empty() {
            input = input.default(default.to_string());
        }
        Ok(input.interact_text()?)
    }
}
