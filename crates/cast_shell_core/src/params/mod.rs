//! Build-time application parameters shared by every process.
//!
//! # Responsibility
//! - Hold the mandatory resource bundle list, private storage suffix and
//!   command-line override path as compile-time constants.
//! - Publish the first two into a [`ParameterSink`] at process creation.
//!
//! # Invariants
//! - Values are `'static` and never derived from environment or runtime input.
//! - Publication happens before any consumer reads the values.
//!
//! # See also
//! - [`crate::bootstrap`]

mod announcer;

pub use announcer::{announce_parameters, ParameterSink, ParametersError, ProcessParameters};

use serde::Serialize;
use std::path::Path;

/// Bundles that must be extracted before the process may proceed.
pub const MANDATORY_RESOURCE_BUNDLES: &[&str] = &["cast_shell.pak", "icudtl.dat"];
/// Suffix appended to the private data directory name.
pub const PRIVATE_DATA_DIRECTORY_SUFFIX: &str = "cast_shell";
/// On-device file that may seed startup flags on non-release builds.
pub const COMMAND_LINE_FILE: &str = "/data/local/tmp/castshell-command-line";

/// Ordered list of resource bundle ids required before startup continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MandatoryResourceSet(&'static [&'static str]);

impl MandatoryResourceSet {
    pub const fn new(bundles: &'static [&'static str]) -> Self {
        Self(bundles)
    }

    pub fn bundles(&self) -> &'static [&'static str] {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, bundle: &str) -> bool {
        self.0.contains(&bundle)
    }
}

/// Storage namespace token for this application family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PrivateStorageSuffix(&'static str);

impl PrivateStorageSuffix {
    pub const fn new(suffix: &'static str) -> Self {
        Self(suffix)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Complete set of build-time bootstrap constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplicationParameters {
    mandatory_resources: MandatoryResourceSet,
    private_data_suffix: PrivateStorageSuffix,
    command_line_file: &'static str,
}

impl ApplicationParameters {
    /// Parameters compiled into the cast shell.
    pub const fn cast_shell() -> Self {
        Self {
            mandatory_resources: MandatoryResourceSet::new(MANDATORY_RESOURCE_BUNDLES),
            private_data_suffix: PrivateStorageSuffix::new(PRIVATE_DATA_DIRECTORY_SUFFIX),
            command_line_file: COMMAND_LINE_FILE,
        }
    }

    pub fn mandatory_resources(&self) -> MandatoryResourceSet {
        self.mandatory_resources
    }

    pub fn private_data_suffix(&self) -> PrivateStorageSuffix {
        self.private_data_suffix
    }

    /// Absolute override path; only read on non-release builds.
    pub fn command_line_file(&self) -> &'static Path {
        Path::new(self.command_line_file)
    }
}

impl Default for ApplicationParameters {
    fn default() -> Self {
        Self::cast_shell()
    }
}
