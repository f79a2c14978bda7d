//! Sequential, resumable execution of script pieces.

use std::collections::HashSet;
use std::io::Write;

use tracing::{debug, info, warn};

use crate::error::{InstallError, Result};
use crate::script::{render_script, ExecutionPiece};
use crate::shell::ScriptShell;
use crate::state::{StateBackend, StateStore};
use crate::ui::UserInterface;

/// Prefix of temporary step scripts.
pub const SCRIPT_PREFIX: &str = "os-install-";

/// Options for a run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Echo every assembled script before running it.
    pub preview: bool,
}

/// What happened to a single piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceOutcome {
    /// The piece ran and was marked completed.
    Executed,
    /// The piece was already completed in an earlier run.
    Skipped,
}

/// Summary of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Pieces executed in this run, in order.
    pub executed: Vec<String>,
    /// Pieces skipped because an earlier run completed them.
    pub skipped: Vec<String>,
}

impl RunReport {
    /// Total pieces seen.
    pub fn total(&self) -> usize {
        self.executed.len() + self.skipped.len()
    }
}

/// Fail if two pieces share a name.
pub fn validate_unique_names(pieces: &[ExecutionPiece]) -> Result<()> {
    let mut seen = HashSet::new();
    for piece in pieces {
        if !seen.insert(piece.name()) {
            return Err(InstallError::DuplicateStepName {
                name: piece.name().to_string(),
            });
        }
    }
    Ok(())
}

/// Executes pieces in order, once each across runs.
pub struct Runner<'a> {
    shell: &'a dyn ScriptShell,
    options: RunOptions,
}

impl<'a> Runner<'a> {
    /// Create a runner using `shell` to execute step scripts.
    pub fn new(shell: &'a dyn ScriptShell, options: RunOptions) -> Self {
        Self { shell, options }
    }

    /// Validate and run every piece in file order.
    ///
    /// Completed pieces are skipped. The first failing piece stops the run;
    /// it is left unmarked so the next run starts there.
    pub fn run<B: StateBackend>(
        &self,
        pieces: &[ExecutionPiece],
        store: &mut StateStore<B>,
        ui: &mut dyn UserInterface,
    ) -> Result<RunReport> {
        validate_unique_names(pieces)?;

        ui.show_header("Start executing...");

        let mut report = RunReport::default();
        for piece in pieces {
            match self.execute_piece(piece, store, ui)? {
                PieceOutcome::Executed => report.executed.push(piece.name().to_string()),
                PieceOutcome::Skipped => report.skipped.push(piece.name().to_string()),
            }
        }

        info!(
            "Run finished: {} executed, {} skipped",
            report.executed.len(),
            report.skipped.len()
        );
        Ok(report)
    }

    /// Run one piece unless it already completed.
    ///
    /// The assembled script is written to a temporary file that is removed
    /// afterwards, except when the script fails: then it is kept and its
    /// path is reported in the error.
    pub fn execute_piece<B: StateBackend>(
        &self,
        piece: &ExecutionPiece,
        store: &mut StateStore<B>,
        ui: &mut dyn UserInterface,
    ) -> Result<PieceOutcome> {
        let name = piece.name();

        if store.is_completed(name) {
            debug!("Skipping completed step '{}'", name);
            ui.message(&format!(">>> \"{}\" was already executed", name));
            return Ok(PieceOutcome::Skipped);
        }

        ui.message(&format!(">>> Execute: {}", name));

        let lines = piece.assemble(store, ui)?;

        let mut file = tempfile::Builder::new()
            .prefix(SCRIPT_PREFIX)
            .suffix(".sh")
            .tempfile()?;
        file.write_all(render_script(&lines).as_bytes())?;
        file.flush()?;
        let script = file.into_temp_path();

        if self.options.preview {
            ui.show_script(&lines);
        }

        info!("Executing step '{}' ({})", name, script.display());
        let result = self.shell.run_script(&script)?;

        if !result.success {
            if !self.options.preview {
                ui.show_script(&lines);
            }
            let path = script.keep().map_err(std::io::Error::from)?;
            warn!(
                "Step '{}' failed with exit code {:?}, script kept at {}",
                name,
                result.exit_code,
                path.display()
            );
            return Err(InstallError::StepFailed {
                step: name.to_string(),
                script: path,
                code: result.exit_code,
            });
        }

        store.mark_completed(name)?;
        info!("Step '{}' completed in {:?}", name, result.duration);

        Ok(PieceOutcome::Executed)
    }
}
