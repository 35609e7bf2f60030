// dbackupcli/src/prompt/mod.rs
use dialoguer::{Input, Select};

use crate::errors::{AppError, Result};

/// Sentinel appended to selection lists; choosing it ends the workflow.
pub const EXIT_OPTION: &str = "exit";

/// Operator interaction used by the workflows.
pub trait Prompter {
    /// Blocks until the operator picks one of `options`.
    fn select_one(&self, message: &str, options: &[String], default: usize) -> Result<String>;

    /// Asks a y/n question; only `y` or `Y` counts as yes.
    fn confirm(&self, message: &str) -> Result<bool>;
}

pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn select_one(&self, message: &str, options: &[String], default: usize) -> Result<String> {
        if options.is_empty() {
            return Err(AppError::Prompt("nothing to select".to_string()));
        }
        let index = Select::new()
            .with_prompt(message)
            .items(options)
            .default(default.min(options.len() - 1))
            .interact()?;
        options
            .get(index)
            .cloned()
            .ok_or_else(|| AppError::Prompt(format!("selection {} out of range", index)))
    }

    fn confirm(&self, message: &str) -> Result<bool> {
        let answer: String = Input::new()
            .with_prompt(format!("{} (y/n)", message))
            .allow_empty(true)
            .interact_text()?;
        Ok(is_yes(&answer))
    }
}

pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim(), "y" | "Y")
}

/// Candidate list for an interactive pick, ending with the exit sentinel.
pub fn with_exit_option(mut options: Vec<String>) -> Vec<String> {
    options.push(EXIT_OPTION.to_string());
    options
}
