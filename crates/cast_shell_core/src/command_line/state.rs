//! Write-once command-line state for one process.
//!
//! # Invariants
//! - The directive is recorded once, before the loader runs.
//! - The resolved state is recorded once, after the loader succeeds.
//! - Phases only move forward: `Uninitialized -> Loading -> Initialized`.

use super::loader::CommandLineDirective;
use once_cell::sync::OnceCell;
use serde::Serialize;

/// Resolved command-line arguments in effect for the process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandLineState {
    args: Vec<String>,
}

impl CommandLineState {
    /// Configuration with no overrides.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Returns true for `--name` or `--name=value`.
    pub fn has_switch(&self, name: &str) -> bool {
        self.args
            .iter()
            .any(|arg| match_switch(arg, name).is_some())
    }

    /// Returns the value of the last `--name=value` occurrence.
    ///
    /// A bare `--name` yields an empty string.
    pub fn switch_value(&self, name: &str) -> Option<&str> {
        self.args
            .iter()
            .rev()
            .find_map(|arg| match_switch(arg, name))
    }
}

fn match_switch<'a>(arg: &'a str, name: &str) -> Option<&'a str> {
    let rest = arg.strip_prefix("--")?.strip_prefix(name)?;
    if rest.is_empty() {
        return Some("");
    }
    rest.strip_prefix('=')
}

/// Observable command-line lifecycle phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandLinePhase {
    Uninitialized,
    Loading(CommandLineDirective),
    Initialized,
}

/// Process-owned holder of the command-line configuration.
///
/// Created by the host and passed by reference to the bootstrap and to every
/// consumer; there is no global instance.
#[derive(Debug, Default)]
pub struct ProcessConfiguration {
    directive: OnceCell<CommandLineDirective>,
    state: OnceCell<CommandLineState>,
}

impl ProcessConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> CommandLinePhase {
        if self.state.get().is_some() {
            return CommandLinePhase::Initialized;
        }
        match self.directive.get() {
            Some(directive) => CommandLinePhase::Loading(directive.clone()),
            None => CommandLinePhase::Uninitialized,
        }
    }

    /// Returns the effective state, or `None` before initialization.
    pub fn command_line(&self) -> Option<&CommandLineState> {
        self.state.get()
    }

    /// Directive chosen by the gate, if it has been evaluated.
    pub fn directive(&self) -> Option<&CommandLineDirective> {
        self.directive.get()
    }

    /// Records the gate decision. Returns false when one was already recorded.
    pub(crate) fn begin_loading(&self, directive: CommandLineDirective) -> bool {
        self.directive.set(directive).is_ok()
    }

    /// Stores the loader result. Returns false when a state already exists.
    pub(crate) fn finish_loading(&self, state: CommandLineState) -> bool {
        self.state.set(state).is_ok()
    }
}
