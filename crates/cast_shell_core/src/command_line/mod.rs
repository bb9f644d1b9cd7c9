//! Command-line initialization gate.
//!
//! # Responsibility
//! - Choose between the override file and an empty configuration from the
//!   build provenance alone.
//! - Hand exactly one directive to the loader and store its result once.
//!
//! # Invariants
//! - Trusted release builds never issue a file directive, whether or not the
//!   override file exists.
//! - Loader failures are returned unchanged; no fallback happens here.
//! - A second initialization attempt performs no load.

mod loader;
mod provenance;
mod state;

pub use loader::{
    CommandLineDirective, CommandLineLoadError, CommandLineLoader, FileCommandLineLoader,
    ReadFailurePolicy, MAX_COMMAND_LINE_FILE_BYTES,
};
pub use provenance::{BuildClassification, BuildProvenance, TRUSTED_BUILD_TYPE};
pub use state::{CommandLinePhase, CommandLineState, ProcessConfiguration};

use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Picks the loader directive for `provenance`.
pub fn command_line_directive(
    provenance: &BuildProvenance,
    override_path: &Path,
) -> CommandLineDirective {
    if provenance.allows_command_line_import() {
        CommandLineDirective::FromFile(override_path.to_path_buf())
    } else {
        CommandLineDirective::Empty
    }
}

/// Initializes the process command line.
///
/// # Side effects
/// - Records the gate decision, then invokes `loader` once.
/// - Writes the loader result into `configuration`.
/// - Emits `command_line_gate` and `command_line_init` logging events.
///
/// # Errors
/// - [`CommandLineInitError::AlreadyInitialized`] when called twice for the
///   same `configuration`.
/// - [`CommandLineInitError::Load`] when the loader fails.
pub fn load_command_line<'c>(
    provenance: &BuildProvenance,
    override_path: &Path,
    loader: &impl CommandLineLoader,
    configuration: &'c ProcessConfiguration,
) -> Result<&'c CommandLineState, CommandLineInitError> {
    let directive = command_line_directive(provenance, override_path);
    info!(
        "event=command_line_gate module=command_line status=ok build_type={} directive={}",
        provenance.build_type(),
        directive.label()
    );

    if !configuration.begin_loading(directive.clone()) {
        error!(
            "event=command_line_init module=command_line status=error error_code=already_initialized"
        );
        return Err(CommandLineInitError::AlreadyInitialized);
    }

    if let CommandLineDirective::FromFile(path) = &directive {
        info!(
            "event=command_line_init module=command_line status=start directive=file path={}",
            path.display()
        );
    }

    let state = match loader.load(&directive) {
        Ok(state) => state,
        Err(err) => {
            error!(
                "event=command_line_init module=command_line status=error directive={} error_code=load_failed error={}",
                directive.label(),
                err
            );
            return Err(CommandLineInitError::Load(err));
        }
    };

    let args = state.args().len();
    if !configuration.finish_loading(state) {
        return Err(CommandLineInitError::AlreadyInitialized);
    }
    info!(
        "event=command_line_init module=command_line status=ok directive={} args={}",
        directive.label(),
        args
    );

    configuration
        .command_line()
        .ok_or(CommandLineInitError::AlreadyInitialized)
}

/// Command-line initialization errors.
#[derive(Debug)]
pub enum CommandLineInitError {
    AlreadyInitialized,
    Load(CommandLineLoadError),
}

impl Display for CommandLineInitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyInitialized => {
                write!(f, "command line already initialized for this process")
            }
            Self::Load(err) => write!(f, "command line load failed: {err}"),
        }
    }
}

impl Error for CommandLineInitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::AlreadyInitialized => None,
            Self::Load(err) => Some(err),
        }
    }
}

impl From<CommandLineLoadError> for CommandLineInitError {
    fn from(value: CommandLineLoadError) -> Self {
        Self::Load(value)
    }
}
