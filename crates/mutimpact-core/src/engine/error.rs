use std::path::PathBuf;
use thiserror::Error;

use super::tools::ToolError;
use crate::core::io::error::InputError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Input file not found: '{path}'", path = path.display())]
    InputNotFound { path: PathBuf },

    #[error("Format error in '{path}': {message}", path = path.display())]
    Format { path: PathBuf, message: String },

    #[error("Mutation position {position} is outside the reference range [1, {length}]")]
    OutOfRange { position: i64, length: usize },

    #[error("Invalid amino acid '{symbol}' at position {position}")]
    InvalidResidue { position: i64, symbol: String },

    #[error(
        "Reference mismatch at position {position}: sequence has '{found}', mutation expects '{expected}'"
    )]
    ReferenceMismatch {
        position: usize,
        expected: char,
        found: char,
    },

    #[error("No-op mutation at position {position}: wild type and mutant are both '{residue}'")]
    NoOpMutation { position: usize, residue: char },

    #[error("Chain '{chain_id}' not found in structure (available: {available})")]
    ChainNotFound { chain_id: String, available: String },

    #[error("External tool failed: {source}")]
    ExternalTool {
        #[from]
        source: ToolError,
    },

    #[error("Internal logic error: {0}")]
    Internal(String),
}

impl From<InputError> for PipelineError {
    fn from(err: InputError) -> Self {
        match err {
            InputError::NotFound { path } => PipelineError::InputNotFound { path },
            InputError::Io { path, source } => PipelineError::Format {
                path,
                message: source.to_string(),
            },
            InputError::Format { path, message } => PipelineError::Format { path, message },
        }
    }
}
