//! Build provenance classification used by the command-line gate.

use serde::Serialize;

/// Build type string of trusted release builds.
pub const TRUSTED_BUILD_TYPE: &str = "user";

/// Observed build type of the running image (`user`, `userdebug`, `eng`, ...).
///
/// Injected into the bootstrap instead of being read from global build
/// metadata, so callers decide where the value comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BuildProvenance {
    build_type: String,
}

/// Trust classification derived from [`BuildProvenance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildClassification {
    /// `user` builds; the override file is never consulted.
    TrustedRelease,
    /// Every other build type, including unknown and empty values.
    Internal,
}

impl BuildProvenance {
    pub fn new(build_type: impl Into<String>) -> Self {
        Self {
            build_type: build_type.into(),
        }
    }

    /// Provenance of a trusted release build.
    pub fn user() -> Self {
        Self::new(TRUSTED_BUILD_TYPE)
    }

    pub fn build_type(&self) -> &str {
        &self.build_type
    }

    /// Exact, case-sensitive comparison against `user`.
    pub fn classification(&self) -> BuildClassification {
        if self.build_type == TRUSTED_BUILD_TYPE {
            BuildClassification::TrustedRelease
        } else {
            BuildClassification::Internal
        }
    }

    /// Whether the command-line override file may be imported.
    pub fn allows_command_line_import(&self) -> bool {
        self.classification() == BuildClassification::Internal
    }
}
