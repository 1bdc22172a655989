use super::{SequenceAligner, ToolError, run_command};
use crate::core::io::fasta;
use crate::core::models::sequence::SequenceRecord;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

const TOOL: &str = "mafft";
const COMBINED_FILE: &str = "combined.fasta";
const ALIGNED_FILE: &str = "aligned.fasta";

/// Aligns sequences by running MAFFT on a FASTA file in a scratch directory.
///
/// The unaligned input and the aligned output are left behind as
/// `combined.fasta` and `aligned.fasta`.
#[derive(Debug, Clone)]
pub struct MafftAligner {
    executable: PathBuf,
    args: Vec<String>,
    scratch_dir: PathBuf,
}

impl MafftAligner {
    pub fn new(scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            executable: PathBuf::from(TOOL),
            args: vec!["--auto".to_string()],
            scratch_dir: scratch_dir.into(),
        }
    }

    pub fn with_executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.executable = executable.into();
        self
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }
}

impl SequenceAligner for MafftAligner {
    fn align(&self, sequences: &[SequenceRecord]) -> Result<Vec<SequenceRecord>, ToolError> {
        fs::create_dir_all(&self.scratch_dir).map_err(|source| ToolError::Scratch {
            path: self.scratch_dir.clone(),
            source,
        })?;
        let combined = self.scratch_dir.join(COMBINED_FILE);
        let aligned = self.scratch_dir.join(ALIGNED_FILE);

        fasta::write_fasta(&combined, sequences).map_err(|e| ToolError::Output {
            tool: TOOL.to_string(),
            message: e.to_string(),
        })?;

        info!(
            sequences = sequences.len(),
            executable = %self.executable.display(),
            "Running multiple sequence alignment."
        );
        let output = run_command(
            TOOL,
            Command::new(&self.executable).args(&self.args).arg(&combined),
        )?;
        fs::write(&aligned, &output.stdout).map_err(|source| ToolError::Scratch {
            path: aligned.clone(),
            source,
        })?;

        let records = fasta::read_fasta(&aligned).map_err(|e| ToolError::Output {
            tool: TOOL.to_string(),
            message: e.to_string(),
        })?;
        check_alignment(sequences.len(), &records)?;
        debug!(
            columns = records.first().map_or(0, SequenceRecord::len),
            "Alignment read back."
        );
        Ok(records)
    }
}

/// An alignment must keep the record count and have rows of one length.
pub(crate) fn check_alignment(expected: usize, records: &[SequenceRecord]) -> Result<(), ToolError> {
    if records.len() != expected {
        return Err(ToolError::Output {
            tool: TOOL.to_string(),
            message: format!("expected {expected} aligned records, found {}", records.len()),
        });
    }
    if let Some(first) = records.first() {
        let width = first.len();
        if let Some(bad) = records.iter().find(|r| r.len() != width) {
            return Err(ToolError::Output {
                tool: TOOL.to_string(),
                message: format!(
                    "aligned row '{}' has length {}, expected {width}",
                    bad.id,
                    bad.len()
                ),
            });
        }
    }
    Ok(())
}
