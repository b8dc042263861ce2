use crate::descriptor::DescriptorKind;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// No descriptor matched the name, or the requested kind has no match.
    #[error("No {} found for '{name}'", .kind.as_ref().map_or("formula or cask", DescriptorKind::noun))]
    NotFound {
        name: String,
        kind: Option<DescriptorKind>,
    },

    #[error("Doesn't look like a formula or cask file")]
    UnrecognizedDescriptor,

    #[error("Failed to find a sha256 checksum")]
    ChecksumNotFound,

    #[error("No checksum declared for host architecture '{arch}'")]
    AmbiguousArchitectureResult { arch: String },

    #[error("`{command}` failed: {reason}")]
    ExternalCommandFailure { command: String, reason: String },

    #[error("Invalid formula / cask name: {0}")]
    InvalidPackageReference(String),

    #[error("Failed to read {}: {source}", .path.display())]
    ReadDescriptor {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fieldless view of [`Error`] for matching on the failure taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    UnrecognizedDescriptor,
    ChecksumNotFound,
    AmbiguousArchitectureResult,
    ExternalCommandFailure,
    InvalidPackageReference,
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::UnrecognizedDescriptor => ErrorKind::UnrecognizedDescriptor,
            Error::ChecksumNotFound => ErrorKind::ChecksumNotFound,
            Error::AmbiguousArchitectureResult { .. } => ErrorKind::AmbiguousArchitectureResult,
            Error::ExternalCommandFailure { .. } => ErrorKind::ExternalCommandFailure,
            Error::InvalidPackageReference(_) => ErrorKind::InvalidPackageReference,
            Error::ReadDescriptor { .. } | Error::Io(_) => ErrorKind::Io,
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::Io(err.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
