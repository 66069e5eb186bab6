//! Error types for viewcrate

use thiserror::Error;

/// Main error type for viewcrate operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A required collaborator was not supplied when installing the interaction layer
    #[error("Missing required collaborator: {0}")]
    MissingCollaborator(&'static str),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for viewcrate operations
pub type Result<T> = std::result::Result<T, Error>;
