//! Per-process bootstrap sequence.
//!
//! # Responsibility
//! - Announce application parameters in every process.
//! - Initialize the command line in the primary process only.
//!
//! # Invariants
//! - Announcement always precedes command-line initialization.
//! - Child processes never reach the command-line loader.
//!
//! # See also
//! - [`crate::params`]
//! - [`crate::command_line`]

use crate::command_line::{
    load_command_line, BuildClassification, BuildProvenance, CommandLineDirective,
    CommandLineInitError, CommandLineLoader, CommandLineState, ProcessConfiguration,
};
use crate::params::{
    announce_parameters, ApplicationParameters, MandatoryResourceSet, ParameterSink,
    PrivateStorageSuffix,
};
use log::{error, info};
use serde::Serialize;
use std::time::Instant;

/// Kind of process being bootstrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessKind {
    /// Process hosting the main activity; owns the command-line override.
    Primary,
    /// Sandboxed or privileged child service process.
    Child,
}

impl ProcessKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Child => "child",
        }
    }

    /// Whether this process kind initializes the command line.
    pub fn loads_command_line(self) -> bool {
        matches!(self, Self::Primary)
    }
}

/// Bootstrap routine with its injected inputs.
#[derive(Debug, Clone)]
pub struct ProcessBootstrap<L> {
    parameters: ApplicationParameters,
    provenance: BuildProvenance,
    loader: L,
}

impl<L: CommandLineLoader> ProcessBootstrap<L> {
    /// Bootstrap with the compiled-in cast shell parameters.
    pub fn new(provenance: BuildProvenance, loader: L) -> Self {
        Self::with_parameters(ApplicationParameters::cast_shell(), provenance, loader)
    }

    pub fn with_parameters(
        parameters: ApplicationParameters,
        provenance: BuildProvenance,
        loader: L,
    ) -> Self {
        Self {
            parameters,
            provenance,
            loader,
        }
    }

    pub fn parameters(&self) -> &ApplicationParameters {
        &self.parameters
    }

    pub fn provenance(&self) -> &BuildProvenance {
        &self.provenance
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Process-creation hook; runs in every process.
    pub fn announce(&self, sink: &impl ParameterSink) {
        announce_parameters(&self.parameters, sink);
    }

    /// Primary-process hook that seeds the command line.
    pub fn init_command_line<'c>(
        &self,
        configuration: &'c ProcessConfiguration,
    ) -> Result<&'c CommandLineState, CommandLineInitError> {
        load_command_line(
            &self.provenance,
            self.parameters.command_line_file(),
            &self.loader,
            configuration,
        )
    }

    /// Runs the full sequence for `kind`.
    ///
    /// # Side effects
    /// - Publishes parameters into `sink`.
    /// - For [`ProcessKind::Primary`], initializes `configuration`.
    /// - Emits `process_bootstrap` logging events with duration and status.
    pub fn run(
        &self,
        kind: ProcessKind,
        sink: &impl ParameterSink,
        configuration: &ProcessConfiguration,
    ) -> Result<BootstrapReport, CommandLineInitError> {
        let started_at = Instant::now();
        info!(
            "event=process_bootstrap module=bootstrap status=start process={}",
            kind.as_str()
        );

        self.announce(sink);

        let command_line = if kind.loads_command_line() {
            match self.init_command_line(configuration) {
                Ok(state) => Some(CommandLineReport {
                    directive: configuration
                        .directive()
                        .cloned()
                        .unwrap_or(CommandLineDirective::Empty),
                    args: state.args().to_vec(),
                }),
                Err(err) => {
                    error!(
                        "event=process_bootstrap module=bootstrap status=error process={} duration_ms={} error={}",
                        kind.as_str(),
                        started_at.elapsed().as_millis(),
                        err
                    );
                    return Err(err);
                }
            }
        } else {
            None
        };

        info!(
            "event=process_bootstrap module=bootstrap status=ok process={} duration_ms={}",
            kind.as_str(),
            started_at.elapsed().as_millis()
        );

        Ok(BootstrapReport {
            process: kind,
            build_type: self.provenance.build_type().to_string(),
            classification: self.provenance.classification(),
            mandatory_resources: self.parameters.mandatory_resources(),
            private_data_suffix: self.parameters.private_data_suffix(),
            command_line,
        })
    }
}

/// Summary of one completed bootstrap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootstrapReport {
    pub process: ProcessKind,
    pub build_type: String,
    pub classification: BuildClassification,
    pub mandatory_resources: MandatoryResourceSet,
    pub private_data_suffix: PrivateStorageSuffix,
    /// `None` for processes that skip command-line initialization.
    pub command_line: Option<CommandLineReport>,
}

/// Command-line outcome recorded in [`BootstrapReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandLineReport {
    pub directive: CommandLineDirective,
    pub args: Vec<String>,
}
