use cast_shell_core::params::COMMAND_LINE_FILE;
use cast_shell_core::{
    load_command_line, ApplicationParameters, BuildProvenance, CommandLineDirective,
    CommandLineLoadError, CommandLineLoader, CommandLinePhase, CommandLineState,
    FileCommandLineLoader, ProcessBootstrap, ProcessConfiguration, ProcessKind,
    ProcessParameters,
};
use std::cell::RefCell;
use std::path::{Path, PathBuf};

/// Loader stub that counts file reads and returns canned arguments.
#[derive(Default)]
struct StubLoader {
    file_reads: RefCell<Vec<PathBuf>>,
    empty_inits: RefCell<usize>,
}

impl CommandLineLoader for StubLoader {
    fn load(
        &self,
        directive: &CommandLineDirective,
    ) -> Result<CommandLineState, CommandLineLoadError> {
        match directive {
            CommandLineDirective::FromFile(path) => {
                self.file_reads.borrow_mut().push(path.clone());
                Ok(CommandLineState::from_args([
                    "_",
                    "--enable-remote-debugging",
                    "--v=2",
                ]))
            }
            CommandLineDirective::Empty => {
                *self.empty_inits.borrow_mut() += 1;
                Ok(CommandLineState::empty())
            }
        }
    }
}

#[test]
fn userdebug_build_reads_override_path_exactly_once() {
    let loader = StubLoader::default();
    let bootstrap = ProcessBootstrap::new(BuildProvenance::new("userdebug"), &loader);
    let config = ProcessConfiguration::new();

    let report = bootstrap
        .run(ProcessKind::Primary, &ProcessParameters::new(), &config)
        .expect("primary bootstrap");

    assert_eq!(
        *loader.file_reads.borrow(),
        vec![PathBuf::from(COMMAND_LINE_FILE)]
    );
    assert_eq!(*loader.empty_inits.borrow(), 0);

    let state = config.command_line().expect("state initialized");
    assert_eq!(
        state,
        &CommandLineState::from_args(["_", "--enable-remote-debugging", "--v=2"])
    );
    assert_eq!(state.switch_value("v"), Some("2"));
    assert_eq!(
        report.command_line.expect("primary report").directive,
        CommandLineDirective::FromFile(PathBuf::from(COMMAND_LINE_FILE))
    );
}

#[test]
fn user_build_never_reads_override_path() {
    let loader = StubLoader::default();
    let bootstrap = ProcessBootstrap::new(BuildProvenance::user(), &loader);
    let config = ProcessConfiguration::new();

    bootstrap
        .run(ProcessKind::Primary, &ProcessParameters::new(), &config)
        .expect("primary bootstrap");

    assert!(loader.file_reads.borrow().is_empty());
    assert_eq!(*loader.empty_inits.borrow(), 1);
    assert_eq!(config.phase(), CommandLinePhase::Initialized);
    assert!(config.command_line().expect("state initialized").is_empty());
}

#[test]
fn user_build_ignores_existing_override_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("castshell-command-line");
    std::fs::write(&path, "_ --should-not-apply").unwrap();
    let config = ProcessConfiguration::new();

    let state = load_command_line(
        &BuildProvenance::user(),
        &path,
        &FileCommandLineLoader::default(),
        &config,
    )
    .expect("user build init");

    assert!(state.is_empty());
    assert!(!state.has_switch("should-not-apply"));
    assert_eq!(config.directive(), Some(&CommandLineDirective::Empty));
}

#[test]
fn internal_build_applies_existing_override_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("castshell-command-line");
    std::fs::write(&path, "_ --enable-logging --log-level=0\n").unwrap();
    let config = ProcessConfiguration::new();

    let state = load_command_line(
        &BuildProvenance::new("eng"),
        &path,
        &FileCommandLineLoader::default(),
        &config,
    )
    .expect("eng build init");

    assert!(state.has_switch("enable-logging"));
    assert_eq!(state.switch_value("log-level"), Some("0"));
    assert_eq!(
        config.directive(),
        Some(&CommandLineDirective::FromFile(path.clone()))
    );
}

#[test]
fn internal_build_with_missing_file_starts_empty_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let config = ProcessConfiguration::new();

    let state = load_command_line(
        &BuildProvenance::new("userdebug"),
        &dir.path().join("absent"),
        &FileCommandLineLoader::default(),
        &config,
    )
    .expect("missing file falls back to empty");

    assert!(state.is_empty());
    assert_eq!(config.phase(), CommandLinePhase::Initialized);
}

#[test]
fn scenario_userdebug_attempts_one_read_at_fixed_path() {
    let loader = StubLoader::default();
    let config = ProcessConfiguration::new();

    load_command_line(
        &BuildProvenance::new("userdebug"),
        ApplicationParameters::cast_shell().command_line_file(),
        &loader,
        &config,
    )
    .expect("userdebug init");

    let reads = loader.file_reads.borrow();
    assert_eq!(reads.len(), 1);
    assert_eq!(reads[0], Path::new("/data/local/tmp/castshell-command-line"));
}

#[test]
fn scenario_user_attempts_no_read_and_ends_empty() {
    let loader = StubLoader::default();
    let config = ProcessConfiguration::new();

    let state = load_command_line(
        &BuildProvenance::user(),
        ApplicationParameters::cast_shell().command_line_file(),
        &loader,
        &config,
    )
    .expect("user init");

    assert!(loader.file_reads.borrow().is_empty());
    assert_eq!(state, &CommandLineState::empty());
}
