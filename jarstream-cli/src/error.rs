//! CLI error type.

use std::fmt;
use std::io;

/// Errors surfaced to the terminal with exit code 1.
#[derive(Debug)]
pub enum CliError {
    /// Failed to read the descriptor file.
    Read { path: String, source: io::Error },

    /// The descriptor file is not valid JSON for the interchange model.
    Descriptor {
        path: String,
        source: serde_json::Error,
    },

    /// Loader construction failed.
    Loader(jarstream::LoaderError),

    /// A resolve or download command failed.
    Resolution(jarstream::ResolutionError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => write!(f, "failed to read {}: {}", path, source),
            Self::Descriptor { path, source } => {
                write!(f, "invalid descriptor {}: {}", path, source)
            }
            Self::Loader(err) => write!(f, "{}", err),
            Self::Resolution(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Descriptor { source, .. } => Some(source),
            Self::Loader(err) => Some(err),
            Self::Resolution(err) => Some(err),
        }
    }
}

impl From<jarstream::LoaderError> for CliError {
    fn from(err: jarstream::LoaderError) -> Self {
        Self::Loader(err)
    }
}

impl From<jarstream::ResolutionError> for CliError {
    fn from(err: jarstream::ResolutionError) -> Self {
        Self::Resolution(err)
    }
}
