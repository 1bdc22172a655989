//! Boundaries to the external programs the pipeline depends on.
//!
//! The pipeline only sees the [`SequenceAligner`] and [`AccessibilityAnalyzer`]
//! traits; [`mafft`] and [`dssp`] provide the process-backed implementations.

pub mod dssp;
pub mod mafft;

use crate::core::models::sequence::SequenceRecord;
use crate::core::models::structure::{ResidueKey, StructureModel};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use thiserror::Error;

pub use dssp::DsspAnalyzer;
pub use mafft::MafftAligner;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Failed to launch '{tool}': {source}. Ensure it is installed and on PATH.")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    #[error("'{tool}' exited with {status}: {stderr}")]
    Failed {
        tool: String,
        status: String,
        stderr: String,
    },

    #[error("'{tool}' produced unusable output: {message}")]
    Output { tool: String, message: String },

    #[error("Scratch file error for '{path}': {source}", path = path.display())]
    Scratch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Multiple sequence alignment.
///
/// Implementations return one aligned row per input record, in input order,
/// all of equal length, with `-` for gaps.
pub trait SequenceAligner: Send + Sync {
    fn align(&self, sequences: &[SequenceRecord]) -> Result<Vec<SequenceRecord>, ToolError>;
}

/// Per-residue secondary structure and relative solvent accessibility.
pub trait AccessibilityAnalyzer: Send + Sync {
    fn analyze(
        &self,
        model: &StructureModel,
        structure_path: &Path,
    ) -> Result<AccessibilityTable, ToolError>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResidueAccessibility {
    pub secondary_structure: char,
    pub relative_accessibility: f64, // in [0, 1]
}

/// Analyzer output keyed by chain identifier and residue key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccessibilityTable {
    entries: HashMap<(String, ResidueKey), ResidueAccessibility>,
}

impl AccessibilityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later entries for the same residue replace earlier ones.
    pub fn insert(&mut self, chain_id: &str, key: ResidueKey, value: ResidueAccessibility) {
        self.entries.insert((chain_id.to_string(), key), value);
    }

    pub fn get(&self, chain_id: &str, key: &ResidueKey) -> Option<&ResidueAccessibility> {
        self.entries.get(&(chain_id.to_string(), key.clone()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Runs `command` to completion and fails unless it exits successfully.
pub(crate) fn run_command(tool: &str, command: &mut Command) -> Result<Output, ToolError> {
    let output = command.output().map_err(|source| ToolError::Spawn {
        tool: tool.to_string(),
        source,
    })?;
    if !output.status.success() {
        return Err(ToolError::Failed {
            tool: tool.to_string(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(output)
}
