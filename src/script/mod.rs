//! Install script parsing.
//!
//! - [`directive`] - Line classification (`##` headings, `# var`, `# import`)
//! - [`grouper`] - The state machine that splits a script into pieces
//! - [`piece`] - [`ExecutionPiece`], the unit of work
//! - [`variable`] - [`VariablePrompt`], operator-supplied values
//!
//! # Example
//!
//! ```
//! use os_install::script::group_script;
//!
//! let pieces = group_script("## prolog\nset -e\n## hello\necho hi\n").unwrap();
//! assert_eq!(pieces.len(), 1);
//! assert_eq!(pieces[0].name(), "hello");
//! assert_eq!(pieces[0].lines(), ["set -e".to_string(), "echo hi".to_string()]);
//! ```

pub mod directive;
pub mod grouper;
pub mod piece;
pub mod variable;

pub use directive::{classify, LineKind};
pub use grouper::{group_file, group_script, GroupState, ScriptGrouper, PROLOG};
pub use piece::{render_script, ExecutionPiece};
pub use variable::VariablePrompt;
