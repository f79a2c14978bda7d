//! Splitting a script into named pieces.
//!
//! [`GroupState`] is the accumulator for a single pass over the script's
//! lines; [`ScriptGrouper`] drives it lazily as an iterator.
//!
//! Section rules:
//! - `## name` closes the current section and starts a new one
//! - a section named `prolog` (any case) is not emitted at a heading;
//!   its lines are prepended to every later piece. Only one non-empty
//!   prolog is allowed; an empty one counts as no prolog at all
//! - sections without a name (before the first heading) or without
//!   content are dropped
//! - `# var` and `# import` lines register imports and are also kept as
//!   content

use std::collections::HashMap;
use std::iter::FusedIterator;
use std::path::Path;
use std::rc::Rc;

use anyhow::Context;
use tracing::debug;

use crate::error::{InstallError, Result};

use super::directive::{classify, LineKind};
use super::{ExecutionPiece, VariablePrompt};

/// Reserved section name for the shared prolog.
pub const PROLOG: &str = "prolog";

/// Scan state threaded through the lines of one script.
#[derive(Debug, Default)]
pub struct GroupState {
    current_name: String,
    current_lines: Vec<String>,
    prolog: Vec<String>,
    pending_imports: Vec<Rc<VariablePrompt>>,
    declared: HashMap<String, Rc<VariablePrompt>>,
}

impl GroupState {
    /// Fresh state for a new script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one line. Returns the piece completed by this line, if any.
    pub fn feed(&mut self, raw: &str) -> Result<Option<ExecutionPiece>> {
        let line = strip_terminator(raw);

        match classify(line) {
            LineKind::Heading(name) => {
                let finished = self.close_section()?;
                self.current_name = name.to_string();
                return Ok(finished);
            }
            LineKind::Declare { name, description } => {
                if self.declared.contains_key(name) {
                    return Err(InstallError::DuplicateVariable {
                        name: name.to_string(),
                    });
                }
                let var = Rc::new(VariablePrompt::new(name, description));
                self.declared.insert(name.to_string(), Rc::clone(&var));
                self.pending_imports.push(var);
            }
            LineKind::Import(name) => {
                let var = self.declared.get(name).ok_or_else(|| {
                    InstallError::UndeclaredVariableImport {
                        name: name.to_string(),
                    }
                })?;
                self.pending_imports.push(Rc::clone(var));
            }
            LineKind::Content => {}
        }

        self.current_lines.push(line.to_string());
        Ok(None)
    }

    /// End of input: emit the last section if it has a name and content.
    ///
    /// A trailing `prolog` section is emitted as an ordinary piece here,
    /// since no later piece could receive it.
    pub fn finish(mut self) -> Option<ExecutionPiece> {
        if self.current_name.is_empty() || self.current_lines.is_empty() {
            return None;
        }
        let name = std::mem::take(&mut self.current_name);
        let lines = std::mem::take(&mut self.current_lines);
        let imports = std::mem::take(&mut self.pending_imports);
        Some(self.build_piece(name, lines, imports))
    }

    fn close_section(&mut self) -> Result<Option<ExecutionPiece>> {
        let name = std::mem::take(&mut self.current_name);
        let lines = std::mem::take(&mut self.current_lines);
        let imports = std::mem::take(&mut self.pending_imports);

        if name.eq_ignore_ascii_case(PROLOG) {
            if !self.prolog.is_empty() {
                return Err(InstallError::MultipleProlog);
            }
            debug!("Prolog set ({} lines)", lines.len());
            self.prolog = lines;
            return Ok(None);
        }

        if name.is_empty() || lines.is_empty() {
            return Ok(None);
        }

        Ok(Some(self.build_piece(name, lines, imports)))
    }

    fn build_piece(
        &self,
        name: String,
        body: Vec<String>,
        imports: Vec<Rc<VariablePrompt>>,
    ) -> ExecutionPiece {
        let mut lines = self.prolog.clone();
        lines.extend(body);
        debug!(
            "Grouped piece '{}' ({} lines, {} imports)",
            name,
            lines.len(),
            imports.len()
        );
        ExecutionPiece::new(name, lines, imports)
    }
}

fn strip_terminator(raw: &str) -> &str {
    let line = raw.strip_suffix('\n').unwrap_or(raw);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Lazily groups script lines into pieces, in file order.
///
/// Stops after the first error.
pub struct ScriptGrouper<I> {
    lines: I,
    state: Option<GroupState>,
}

impl<I> ScriptGrouper<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    /// Group the given lines.
    pub fn new(lines: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            lines: lines.into_iter(),
            state: Some(GroupState::new()),
        }
    }
}

impl<I> Iterator for ScriptGrouper<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = Result<ExecutionPiece>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let state = self.state.as_mut()?;
            match self.lines.next() {
                Some(line) => match state.feed(line.as_ref()) {
                    Ok(Some(piece)) => return Some(Ok(piece)),
                    Ok(None) => continue,
                    Err(e) => {
                        self.state = None;
                        return Some(Err(e));
                    }
                },
                None => {
                    let state = self.state.take()?;
                    return state.finish().map(Ok);
                }
            }
        }
    }
}

impl<I> FusedIterator for ScriptGrouper<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
}

/// Group a whole script held in memory.
pub fn group_script(content: &str) -> Result<Vec<ExecutionPiece>> {
    ScriptGrouper::new(content.lines()).collect()
}

/// Read and group a script file.
pub fn group_file(path: &Path) -> Result<Vec<ExecutionPiece>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    group_script(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(lines: &[&str]) -> Result<Vec<ExecutionPiece>> {
        ScriptGrouper::new(lines.iter()).collect()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn import_names(piece: &ExecutionPiece) -> Vec<&str> {
        piece.imports().iter().map(|v| v.name()).collect()
    }

    #[test]
    fn splits_on_headings() {
        let pieces = group(&["## A", "echo 1", "## B", "echo 2"]).unwrap();

        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[0].name(), "A");
        assert_eq!(pieces[0].lines(), strings(&["echo 1"]).as_slice());
        assert_eq!(pieces[1].name(), "B");
        assert_eq!(pieces[1].lines(), strings(&["echo 2"]).as_slice());
    }

    #[test]
    fn prolog_is_prepended_and_not_emitted() {
        let pieces = group(&["## prolog", "set -e", "## A", "echo 1"]).unwrap();

        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].name(), "A");
        assert_eq!(pieces[0].lines(), strings(&["set -e", "echo 1"]).as_slice());
    }

    #[test]
    fn prolog_name_is_case_insensitive() {
        let pieces = group(&["## ProLog", "set -e", "## A", "echo 1"]).unwrap();
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].lines()[0], "set -e");
    }

    #[test]
    fn prolog_reaches_every_later_piece() {
        let pieces = group(&["## prolog", "set -eu", "## A", "a", "## B", "b"]).unwrap();

        assert_eq!(pieces[0].lines(), strings(&["set -eu", "a"]).as_slice());
        assert_eq!(pieces[1].lines(), strings(&["set -eu", "b"]).as_slice());
    }

    #[test]
    fn pieces_before_prolog_do_not_get_it() {
        let pieces = group(&["## A", "a", "## prolog", "set -e", "## B", "b"]).unwrap();

        assert_eq!(pieces[0].lines(), strings(&["a"]).as_slice());
        assert_eq!(pieces[1].lines(), strings(&["set -e", "b"]).as_slice());
    }

    #[test]
    fn second_prolog_fails() {
        let err = group(&["## prolog", "a", "## prolog", "b", "## X", "c"]).unwrap_err();
        assert!(matches!(err, InstallError::MultipleProlog));
    }

    #[test]
    fn empty_prolog_does_not_block_a_later_one() {
        let pieces = group(&["## prolog", "## prolog", "set -e", "## A", "echo"]).unwrap();

        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].lines(), strings(&["set -e", "echo"]).as_slice());
    }

    #[test]
    fn second_non_empty_prolog_fails_after_empty_one() {
        let err = group(&[
            "## prolog",
            "## prolog",
            "a",
            "## prolog",
            "b",
            "## A",
            "c",
        ])
        .unwrap_err();
        assert!(matches!(err, InstallError::MultipleProlog));
    }

    #[test]
    fn trailing_prolog_is_emitted_as_piece() {
        let pieces = group(&["## A", "a", "## prolog", "set -e"]).unwrap();

        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[1].name(), "prolog");
        assert_eq!(pieces[1].lines(), strings(&["set -e"]).as_slice());
    }

    #[test]
    fn lines_before_first_heading_are_dropped() {
        let pieces = group(&["#!/bin/bash", "echo orphan", "## A", "echo 1"]).unwrap();

        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].lines(), strings(&["echo 1"]).as_slice());
    }

    #[test]
    fn empty_sections_are_dropped() {
        let pieces = group(&["## A", "## B", "echo 2", "## C"]).unwrap();

        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].name(), "B");
    }

    #[test]
    fn blank_lines_count_as_content() {
        let pieces = group(&["## A", ""]).unwrap();
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].lines(), strings(&[""]).as_slice());
    }

    #[test]
    fn content_lines_are_kept_verbatim() {
        let pieces = group(&["## A", "    indented $X  ", "\tcat <<EOF"]).unwrap();
        assert_eq!(
            pieces[0].lines(),
            strings(&["    indented $X  ", "\tcat <<EOF"]).as_slice()
        );
    }

    #[test]
    fn line_terminators_are_removed() {
        let pieces = group(&["## A\r\n", "echo 1\r\n", "echo 2\n"]).unwrap();
        assert_eq!(pieces[0].name(), "A");
        assert_eq!(pieces[0].lines(), strings(&["echo 1", "echo 2"]).as_slice());
    }

    #[test]
    fn declare_registers_import_and_keeps_line() {
        let pieces = group(&["## A", "# var FOO: desc", "echo $FOO"]).unwrap();

        assert_eq!(import_names(&pieces[0]), vec!["FOO"]);
        assert_eq!(pieces[0].imports()[0].description(), "desc");
        assert_eq!(
            pieces[0].lines(),
            strings(&["# var FOO: desc", "echo $FOO"]).as_slice()
        );
    }

    #[test]
    fn import_shares_declaration() {
        let pieces = group(&[
            "## A",
            "# var FOO: desc",
            "## B",
            "# import FOO",
            "echo $FOO",
        ])
        .unwrap();

        assert_eq!(import_names(&pieces[1]), vec!["FOO"]);
        assert!(Rc::ptr_eq(&pieces[0].imports()[0], &pieces[1].imports()[0]));
    }

    #[test]
    fn imports_keep_encounter_order() {
        let pieces = group(&[
            "## A",
            "# var X: x",
            "# var Y: y",
            "## B",
            "# import Y",
            "# var Z: z",
            "# import X",
        ])
        .unwrap();

        assert_eq!(import_names(&pieces[1]), vec!["Y", "Z", "X"]);
    }

    #[test]
    fn imports_reset_per_section() {
        let pieces = group(&["## A", "# var X: x", "## B", "echo b"]).unwrap();
        assert!(pieces[1].imports().is_empty());
    }

    #[test]
    fn duplicate_declaration_fails() {
        let err = group(&["## A", "# var X: one", "## B", "# var X: two"]).unwrap_err();
        assert!(matches!(err, InstallError::DuplicateVariable { name } if name == "X"));
    }

    #[test]
    fn undeclared_import_fails() {
        let err = group(&["## A", "# import NOPE"]).unwrap_err();
        assert!(matches!(err, InstallError::UndeclaredVariableImport { name } if name == "NOPE"));
    }

    #[test]
    fn import_before_declaration_fails() {
        let err = group(&["## A", "# import X", "## B", "# var X: x"]).unwrap_err();
        assert!(matches!(err, InstallError::UndeclaredVariableImport { .. }));
    }

    #[test]
    fn prolog_declarations_are_global_but_not_injected() {
        let pieces = group(&[
            "## prolog",
            "# var X: x",
            "## A",
            "echo a",
            "## B",
            "# import X",
        ])
        .unwrap();

        assert!(pieces[0].imports().is_empty());
        assert_eq!(import_names(&pieces[1]), vec!["X"]);
    }

    #[test]
    fn grouper_is_lazy() {
        let mut grouper = ScriptGrouper::new(["## A", "a", "## B", "# import MISSING"].iter());

        let first = grouper.next().unwrap().unwrap();
        assert_eq!(first.name(), "A");
        assert!(grouper.next().unwrap().is_err());
    }

    #[test]
    fn grouper_stops_after_error() {
        let mut grouper = ScriptGrouper::new(["## A", "# import NOPE", "## B", "b"].iter());

        assert!(grouper.next().unwrap().is_err());
        assert!(grouper.next().is_none());
        assert!(grouper.next().is_none());
    }

    #[test]
    fn group_state_feed_and_finish() {
        let mut state = GroupState::new();
        assert!(state.feed("## A").unwrap().is_none());
        assert!(state.feed("echo a").unwrap().is_none());

        let closed = state.feed("## B").unwrap().unwrap();
        assert_eq!(closed.name(), "A");

        assert!(state.feed("echo b").unwrap().is_none());
        let last = state.finish().unwrap();
        assert_eq!(last.name(), "B");
    }

    #[test]
    fn group_script_from_string() {
        let pieces = group_script("## A\necho 1\n## B\necho 2\n").unwrap();
        let names: Vec<_> = pieces.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn empty_script_has_no_pieces() {
        assert!(group_script("").unwrap().is_empty());
    }

    #[test]
    fn group_file_missing_fails() {
        let temp = tempfile::TempDir::new().unwrap();
        let err = group_file(&temp.path().join("missing.sh")).unwrap_err();
        assert!(err.to_string().contains("missing.sh"));
    }
}
