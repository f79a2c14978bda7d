//! Executable script pieces.

use std::rc::Rc;

use crate::error::Result;
use crate::state::{StateBackend, StateStore};
use crate::ui::UserInterface;

use super::VariablePrompt;

/// One named, independently completable unit of installation work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPiece {
    name: String,
    lines: Vec<String>,
    imports: Vec<Rc<VariablePrompt>>,
}

impl ExecutionPiece {
    /// Create a piece. `lines` already include any prolog.
    pub fn new(
        name: impl Into<String>,
        lines: Vec<String>,
        imports: Vec<Rc<VariablePrompt>>,
    ) -> Self {
        Self {
            name: name.into(),
            lines,
            imports,
        }
    }

    /// Step name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Prolog and body lines, verbatim.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Variables this piece needs, in the order they were declared or imported.
    pub fn imports(&self) -> &[Rc<VariablePrompt>] {
        &self.imports
    }

    /// Resolve imports and return the full script: one `NAME=value` line per
    /// import, then the piece's own lines.
    pub fn assemble<B: StateBackend>(
        &self,
        store: &mut StateStore<B>,
        ui: &mut dyn UserInterface,
    ) -> Result<Vec<String>> {
        let mut assembled = Vec::with_capacity(self.imports.len() + self.lines.len());
        for var in &self.imports {
            let value = var.resolve(store, ui)?;
            assembled.push(var.assignment(&value));
        }
        assembled.extend(self.lines.iter().cloned());
        Ok(assembled)
    }
}

/// Join script lines, terminating every line with a newline.
pub fn render_script(lines: &[String]) -> String {
    let mut out = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}
