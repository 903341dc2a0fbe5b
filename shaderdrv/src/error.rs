//! Error types for shaderdrv operations

use crate::Backend;
use std::path::PathBuf;
use thiserror::Error;

/// Non-fatal configuration problem.
///
/// Raised when a loosely-typed option value does not name a known backend,
/// stage or profile. The option keeps its previous value and compilation
/// proceeds with it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// Compiler name is not one of dxc, fxc, glslc
    #[error("Unknown shader compiler {0}, ignoring")]
    UnknownBackend(String),

    /// Stage name is not one of the six pipeline stages
    #[error("Unknown shader stage {0}, ignoring")]
    UnknownStage(String),

    /// Profile string is not valid for the active backend
    #[error("Unknown shader profile ({backend}) {profile}, ignoring")]
    UnknownProfile {
        /// Backend the profile was validated against
        backend: Backend,
        /// The rejected profile text
        profile: String,
    },
}

/// Error type for shaderdrv operations
#[derive(Error, Debug)]
pub enum Error {
    /// The compiler executable could not be started
    #[error("Failed to launch {}: {source}", .executable.display())]
    Spawn {
        /// Executable that was launched
        executable: PathBuf,
        /// Underlying OS error
        source: std::io::Error,
    },

    /// Waiting for the child or draining one of its streams failed
    #[error("Failed to read compiler output: {0}")]
    Stream(std::io::Error),

    /// The input path has no file name to derive the output name from
    #[error("Input file has no file name: {}", .0.display())]
    MissingFileStem(PathBuf),

    /// IO error while resolving paths
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for shaderdrv operations
pub type Result<T> = std::result::Result<T, Error>;
