//! Parameter publication into process-wide configuration.

use super::{ApplicationParameters, MandatoryResourceSet, PrivateStorageSuffix};
use log::{info, warn};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Receiver of announced parameters.
///
/// Implemented by whatever owns the values on behalf of the resource
/// extraction and path resolution collaborators.
pub trait ParameterSink {
    fn set_mandatory_resources(&self, resources: MandatoryResourceSet);
    fn set_private_data_directory_suffix(&self, suffix: PrivateStorageSuffix);
}

/// Publishes mandatory bundles and storage suffix into `sink`.
///
/// # Side effects
/// - Two sink writes, bundles first.
/// - Emits one `parameters_announce` logging event.
pub fn announce_parameters(parameters: &ApplicationParameters, sink: &impl ParameterSink) {
    let resources = parameters.mandatory_resources();
    let suffix = parameters.private_data_suffix();
    sink.set_mandatory_resources(resources);
    sink.set_private_data_directory_suffix(suffix);
    info!(
        "event=parameters_announce module=params status=ok bundles={} suffix={}",
        resources.bundles().join(","),
        suffix.as_str()
    );
}

/// Write-once holder for announced parameters.
///
/// Reads before publication fail with [`ParametersError::NotAnnounced`].
/// Republishing an equal value is a no-op; a conflicting value is ignored and
/// logged, so the first publication stays in effect for the process lifetime.
#[derive(Debug, Default)]
pub struct ProcessParameters {
    mandatory_resources: OnceCell<MandatoryResourceSet>,
    private_data_suffix: OnceCell<PrivateStorageSuffix>,
}

impl ProcessParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mandatory_resources(&self) -> Result<MandatoryResourceSet, ParametersError> {
        self.mandatory_resources
            .get()
            .copied()
            .ok_or(ParametersError::NotAnnounced("mandatory_resources"))
    }

    pub fn private_data_directory_suffix(&self) -> Result<PrivateStorageSuffix, ParametersError> {
        self.private_data_suffix
            .get()
            .copied()
            .ok_or(ParametersError::NotAnnounced("private_data_suffix"))
    }

    /// Returns true once both values are published.
    pub fn is_announced(&self) -> bool {
        self.mandatory_resources.get().is_some() && self.private_data_suffix.get().is_some()
    }
}

impl ParameterSink for ProcessParameters {
    fn set_mandatory_resources(&self, resources: MandatoryResourceSet) {
        let active = self.mandatory_resources.get_or_init(|| resources);
        if *active != resources {
            warn!(
                "event=parameters_announce module=params status=conflict field=mandatory_resources active={} ignored={}",
                active.bundles().join(","),
                resources.bundles().join(",")
            );
        }
    }

    fn set_private_data_directory_suffix(&self, suffix: PrivateStorageSuffix) {
        let active = self.private_data_suffix.get_or_init(|| suffix);
        if *active != suffix {
            warn!(
                "event=parameters_announce module=params status=conflict field=private_data_suffix active={} ignored={}",
                active.as_str(),
                suffix.as_str()
            );
        }
    }
}

/// Parameter read errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParametersError {
    /// A value was read before `announce_parameters` ran.
    NotAnnounced(&'static str),
}

impl Display for ParametersError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnnounced(field) => {
                write!(f, "parameter read before announcement: {field}")
            }
        }
    }
}

impl Error for ParametersError {}

#[cfg(test)]
mod tests {
    use super::{announce_parameters, ParameterSink, ParametersError, ProcessParameters};
    use crate::params::{ApplicationParameters, MandatoryResourceSet, PrivateStorageSuffix};

    #[test]
    fn reads_before_announcement_are_rejected() {
        let params = ProcessParameters::new();
        assert!(!params.is_announced());
        assert_eq!(
            params.mandatory_resources(),
            Err(ParametersError::NotAnnounced("mandatory_resources"))
        );
        assert_eq!(
            params.private_data_directory_suffix(),
            Err(ParametersError::NotAnnounced("private_data_suffix"))
        );
    }

    #[test]
    fn announcement_publishes_both_values() {
        let app = ApplicationParameters::cast_shell();
        let params = ProcessParameters::new();
        announce_parameters(&app, &params);

        assert!(params.is_announced());
        assert_eq!(
            params.mandatory_resources().expect("bundles published"),
            app.mandatory_resources()
        );
        assert_eq!(
            params
                .private_data_directory_suffix()
                .expect("suffix published")
                .as_str(),
            "cast_shell"
        );
    }

    #[test]
    fn conflicting_republish_keeps_first_value() {
        let params = ProcessParameters::new();
        params.set_private_data_directory_suffix(PrivateStorageSuffix::new("cast_shell"));
        params.set_private_data_directory_suffix(PrivateStorageSuffix::new("other_shell"));
        params.set_mandatory_resources(MandatoryResourceSet::new(&["a.pak"]));
        params.set_mandatory_resources(MandatoryResourceSet::new(&["b.pak"]));

        assert_eq!(
            params.private_data_directory_suffix().unwrap().as_str(),
            "cast_shell"
        );
        assert_eq!(params.mandatory_resources().unwrap().bundles(), &["a.pak"]);
    }

    #[test]
    fn not_announced_error_names_field() {
        let message = ParametersError::NotAnnounced("private_data_suffix").to_string();
        assert!(message.contains("private_data_suffix"));
    }
}
