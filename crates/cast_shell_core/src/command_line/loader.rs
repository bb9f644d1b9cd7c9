//! Configuration-loading collaborator contract and the default file loader.
//!
//! # Responsibility
//! - Define the single directive handed to the loader.
//! - Provide a file-backed loader that owns read-failure semantics.
//!
//! # Invariants
//! - The `Empty` directive never touches the file system.
//! - File reads are bounded by [`MAX_COMMAND_LINE_FILE_BYTES`].

use super::state::CommandLineState;
use log::{info, warn};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Upper bound for the override file size.
pub const MAX_COMMAND_LINE_FILE_BYTES: u64 = 8 * 1024;

/// What the loader is asked to do. Exactly one is issued per process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum CommandLineDirective {
    /// Seed the configuration from the override file.
    FromFile(PathBuf),
    /// Start with no overrides.
    Empty,
}

impl CommandLineDirective {
    pub fn label(&self) -> &'static str {
        match self {
            Self::FromFile(_) => "file",
            Self::Empty => "empty",
        }
    }
}

/// Produces the effective command-line state for one directive.
pub trait CommandLineLoader {
    fn load(&self, directive: &CommandLineDirective)
        -> Result<CommandLineState, CommandLineLoadError>;
}

impl<T: CommandLineLoader + ?Sized> CommandLineLoader for &T {
    fn load(
        &self,
        directive: &CommandLineDirective,
    ) -> Result<CommandLineState, CommandLineLoadError> {
        (**self).load(directive)
    }
}

/// Behavior of [`FileCommandLineLoader`] when the override file cannot be used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadFailurePolicy {
    /// Fall back to an empty configuration and log a warning.
    #[default]
    Empty,
    /// Surface the failure to the caller.
    Fail,
}

/// Loader that reads whitespace-separated arguments from the override file.
///
/// Quoting and escaping are not interpreted.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileCommandLineLoader {
    policy: ReadFailurePolicy,
}

impl FileCommandLineLoader {
    pub fn new(policy: ReadFailurePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ReadFailurePolicy {
        self.policy
    }
}

impl CommandLineLoader for FileCommandLineLoader {
    fn load(
        &self,
        directive: &CommandLineDirective,
    ) -> Result<CommandLineState, CommandLineLoadError> {
        let path = match directive {
            CommandLineDirective::Empty => return Ok(CommandLineState::empty()),
            CommandLineDirective::FromFile(path) => path,
        };

        match read_bounded(path) {
            Ok(contents) => {
                let state = CommandLineState::from_args(contents.split_ascii_whitespace());
                info!(
                    "event=command_line_file_read module=command_line status=ok path={} args={}",
                    path.display(),
                    state.args().len()
                );
                Ok(state)
            }
            Err(err) => match self.policy {
                ReadFailurePolicy::Empty => {
                    warn!(
                        "event=command_line_file_read module=command_line status=skip path={} fallback=empty error={}",
                        path.display(),
                        err
                    );
                    Ok(CommandLineState::empty())
                }
                ReadFailurePolicy::Fail => {
                    warn!(
                        "event=command_line_file_read module=command_line status=error path={} error={}",
                        path.display(),
                        err
                    );
                    Err(err)
                }
            },
        }
    }
}

fn read_bounded(path: &Path) -> Result<String, CommandLineLoadError> {
    let io_error = |source| CommandLineLoadError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_error)?;
    let declared = file.metadata().map_err(io_error)?.len();
    if declared > MAX_COMMAND_LINE_FILE_BYTES {
        return Err(CommandLineLoadError::TooLarge {
            path: path.to_path_buf(),
            size: declared,
            limit: MAX_COMMAND_LINE_FILE_BYTES,
        });
    }

    // Files may grow between stat and read.
    let mut bytes = Vec::new();
    file.take(MAX_COMMAND_LINE_FILE_BYTES + 1)
        .read_to_end(&mut bytes)
        .map_err(io_error)?;
    if bytes.len() as u64 > MAX_COMMAND_LINE_FILE_BYTES {
        return Err(CommandLineLoadError::TooLarge {
            path: path.to_path_buf(),
            size: bytes.len() as u64,
            limit: MAX_COMMAND_LINE_FILE_BYTES,
        });
    }

    String::from_utf8(bytes).map_err(|_| CommandLineLoadError::NotUtf8 {
        path: path.to_path_buf(),
    })
}

/// Failures reported by a configuration-loading collaborator.
#[derive(Debug)]
pub enum CommandLineLoadError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    TooLarge {
        path: PathBuf,
        size: u64,
        limit: u64,
    },
    NotUtf8 {
        path: PathBuf,
    },
    /// Loader-specific failure outside the file reader's taxonomy.
    Other(String),
}

impl Display for CommandLineLoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read `{}`: {source}", path.display())
            }
            Self::TooLarge { path, size, limit } => write!(
                f,
                "command-line file `{}` is {size} bytes; limit is {limit}",
                path.display()
            ),
            Self::NotUtf8 { path } => {
                write!(f, "command-line file `{}` is not valid UTF-8", path.display())
            }
            Self::Other(message) => write!(f, "{message}"),
        }
    }
}

impl Error for CommandLineLoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
