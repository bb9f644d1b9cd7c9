//! Process bootstrap for the cast shell.
//! Every process runs this before any other subsystem starts.

pub mod bootstrap;
pub mod command_line;
pub mod logging;
pub mod params;

pub use bootstrap::{BootstrapReport, CommandLineReport, ProcessBootstrap, ProcessKind};
pub use command_line::{
    command_line_directive, load_command_line, BuildClassification, BuildProvenance,
    CommandLineDirective, CommandLineInitError, CommandLineLoadError, CommandLineLoader,
    CommandLinePhase, CommandLineState, FileCommandLineLoader, ProcessConfiguration,
    ReadFailurePolicy,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use params::{
    announce_parameters, ApplicationParameters, MandatoryResourceSet, ParameterSink,
    ParametersError, PrivateStorageSuffix, ProcessParameters,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
