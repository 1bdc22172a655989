use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure while reading or writing one of the pipeline's input or output files.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("File not found: '{path}'", path = path.display())]
    NotFound { path: PathBuf },

    #[error("I/O error for '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed file '{path}': {message}", path = path.display())]
    Format { path: PathBuf, message: String },
}

impl InputError {
    pub(crate) fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            InputError::NotFound { path }
        } else {
            InputError::Io { path, source }
        }
    }

    pub(crate) fn format(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        InputError::Format {
            path: path.into(),
            message: message.into(),
        }
    }
}
