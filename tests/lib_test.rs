//! Library integration tests.

use os_install::runner::{validate_unique_names, RunOptions, Runner};
use os_install::script::{group_file, group_script, ScriptGrouper};
use os_install::shell::MockShell;
use os_install::state::{default_state_path, MemoryBackend, StateStore};
use os_install::ui::MockUI;
use os_install::InstallError;
use std::fs;
use tempfile::TempDir;

#[test]
fn error_types_are_public() {
    let err = InstallError::DuplicateStepName {
        name: "base".into(),
    };
    assert!(err.to_string().contains("base"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> os_install::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use os_install::cli::Cli;

    let cli = Cli::parse_from(["os-install", "install.sh", "--new", "--pp"]);
    assert!(cli.run.new);
    assert!(cli.run.preview);
}

#[test]
fn grouper_is_lazy_and_ordered() {
    let lines = ["## a", "echo a", "## b", "echo b", "## a", "echo again"];
    let names: Vec<String> = ScriptGrouper::new(lines)
        .map(|piece| piece.unwrap().name().to_string())
        .collect();

    // grouping itself does not reject repeated names
    assert_eq!(names, vec!["a", "b", "a"]);
}

#[test]
fn duplicate_names_are_caught_before_running() {
    let pieces = group_script("## a\n1\n## a\n2\n").unwrap();
    assert!(matches!(
        validate_unique_names(&pieces),
        Err(InstallError::DuplicateStepName { .. })
    ));
}

#[test]
fn file_backed_install_resumes() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("install.sh");
    fs::write(
        &script,
        "## prolog\nset -eu\n## disk\n# var DISK: Target disk\nmkfs $DISK\n## boot\n# import DISK\ngrub-install $DISK\n",
    )
    .unwrap();
    let state_path = default_state_path(&script);
    let pieces = group_file(&script).unwrap();

    // first attempt fails at "boot"
    {
        let shell = MockShell::new().failing_on("grub-install");
        let mut store = StateStore::create_file(&state_path);
        let mut ui = MockUI::new();
        ui.set_prompt_response("DISK", "/dev/vda");

        let err = Runner::new(&shell, RunOptions::default())
            .run(&pieces, &mut store, &mut ui)
            .unwrap_err();

        if let InstallError::StepFailed { script, .. } = &err {
            let _ = fs::remove_file(script);
        }
        assert!(matches!(err, InstallError::StepFailed { ref step, .. } if step == "boot"));
    }

    // second attempt reuses the stored answer and only runs "boot"
    let shell = MockShell::new();
    let mut store = StateStore::open_file(&state_path).unwrap();
    let mut ui = MockUI::new();

    let report = Runner::new(&shell, RunOptions::default())
        .run(&pieces, &mut store, &mut ui)
        .unwrap();

    assert_eq!(report.skipped, vec!["disk"]);
    assert_eq!(report.executed, vec!["boot"]);
    assert!(ui.prompts_shown().is_empty());
    assert_eq!(
        shell.contents(),
        vec!["DISK=/dev/vda\nset -eu\n# import DISK\ngrub-install $DISK\n".to_string()]
    );
}

#[test]
fn memory_store_runs_without_disk() {
    let pieces = group_script("## hello\necho hello\n").unwrap();
    let shell = MockShell::new();
    let mut store = StateStore::create(MemoryBackend::new());
    let mut ui = MockUI::new();

    Runner::new(&shell, RunOptions::default())
        .run(&pieces, &mut store, &mut ui)
        .unwrap();

    assert_eq!(store.completed_steps().collect::<Vec<_>>(), vec!["hello"]);
    assert!(store.backend().stored().is_some());
}
