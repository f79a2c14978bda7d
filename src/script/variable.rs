//! Operator-supplied script variables.

use tracing::debug;

use crate::error::Result;
use crate::state::{StateBackend, StateStore};
use crate::ui::{Prompt, UserInterface};

/// A variable declared with `# var NAME: description`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariablePrompt {
    name: String,
    description: String,
}

impl VariablePrompt {
    /// Declare a variable.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Variable name, also used as the shell variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Text shown when asking for a value.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Get the value for this variable, asking the operator only if the
    /// store has no value yet. A fresh answer is persisted before returning.
    pub fn resolve<B: StateBackend>(
        &self,
        store: &mut StateStore<B>,
        ui: &mut dyn UserInterface,
    ) -> Result<String> {
        if let Some(value) = store.get_variable(&self.name) {
            debug!("Variable {} already resolved", self.name);
            return Ok(value.to_string());
        }

        let value = ui.prompt(&Prompt::new(&self.name, &self.description))?;
        store.set_variable(&self.name, &value)?;
        debug!("Variable {} resolved and saved", self.name);
        Ok(value)
    }

    /// Shell assignment line for `value`, e.g. `DISK=/dev/sda`.
    pub fn assignment(&self, value: &str) -> String {
        format!("{}={}", self.name, value)
    }
}
