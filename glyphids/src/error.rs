use std::{io, path::PathBuf};

use thiserror::Error;

use crate::host::HostError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no arguments given")]
    NoArguments,
    #[error("invalid parameter specified at argument {index}")]
    InvalidArgument { index: usize },
    #[error("No font name or input text file specified.")]
    MissingFontOrFile,
    #[error("The font name is too long (max {max} characters).")]
    FontNameTooLong { len: usize, max: usize },
    #[error("Could not open input file: {source}")]
    OpenInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Could not read input file: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid range on line {line}: '{text}'")]
    BadRange { line: usize, text: String },
    #[error("Font resolution failed: {0}")]
    Host(#[from] HostError),
    #[error("unable to write output: {0}")]
    Output(#[source] io::Error),
}

impl Error {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::NoArguments => 1,
            Error::InvalidArgument { .. } => 2,
            Error::MissingFontOrFile => 3,
            Error::FontNameTooLong { .. } => 4,
            Error::OpenInput { .. } | Error::ReadInput { .. } | Error::BadRange { .. } => 5,
            Error::Host(_) => 6,
            Error::Output(_) => 7,
        }
    }

    /// Whether the usage text belongs after the message.
    pub fn wants_usage(&self) -> bool {
        matches!(
            self,
            Error::NoArguments
                | Error::InvalidArgument { .. }
                | Error::MissingFontOrFile
                | Error::OpenInput { .. }
        )
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Output(e)
    }
}
