//! Interactive prompts.

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;

use crate::error::{InstallError, Result};

use super::Prompt;

/// Convert dialoguer errors to InstallError.
fn map_dialoguer_err(e: dialoguer::Error) -> InstallError {
    InstallError::Io(e.into())
}

/// Dialoguer theme rendering prompts as `> question: `.
fn prompt_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style(">".to_string()).dim(),
        prompt_suffix: style(":".to_string()),
        ..ColorfulTheme::default()
    }
}

/// Ask the operator for a line of text on `term`.
///
/// Empty answers are accepted; the value is used verbatim.
pub fn prompt_input(prompt: &Prompt, term: &Term) -> Result<String> {
    Input::<String>::with_theme(&prompt_theme())
        .with_prompt(&prompt.question)
        .allow_empty(true)
        .interact_on(term)
        .map_err(map_dialoguer_err)
}
