use super::{AccessibilityAnalyzer, AccessibilityTable, ResidueAccessibility, ToolError, run_command};
use crate::core::models::structure::{ResidueKey, StructureModel};
use phf::{Map, phf_map};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

const TOOL: &str = "mkdssp";
const HEADER_PREFIX: &str = "  #  RESIDUE";

// Sander & Rost maximal accessible surface area, in square angstroms.
static MAX_ASA: Map<char, f64> = phf_map! {
    'A' => 106.0, 'R' => 248.0, 'N' => 157.0, 'D' => 163.0,
    'C' => 135.0, 'Q' => 198.0, 'E' => 194.0, 'G' => 84.0,
    'H' => 184.0, 'I' => 169.0, 'L' => 164.0, 'K' => 205.0,
    'M' => 188.0, 'F' => 197.0, 'P' => 136.0, 'S' => 130.0,
    'T' => 142.0, 'W' => 227.0, 'Y' => 222.0, 'V' => 142.0,
};

/// Runs DSSP on the structure file and reads its classic residue table from stdout.
#[derive(Debug, Clone)]
pub struct DsspAnalyzer {
    executable: PathBuf,
    args: Vec<String>,
}

impl Default for DsspAnalyzer {
    fn default() -> Self {
        Self {
            executable: PathBuf::from(TOOL),
            args: vec!["--output-format".to_string(), "dssp".to_string()],
        }
    }
}

impl DsspAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.executable = executable.into();
        self
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }
}

impl AccessibilityAnalyzer for DsspAnalyzer {
    fn analyze(
        &self,
        model: &StructureModel,
        structure_path: &Path,
    ) -> Result<AccessibilityTable, ToolError> {
        info!(
            path = %structure_path.display(),
            executable = %self.executable.display(),
            "Running secondary structure and accessibility analysis."
        );
        let output = run_command(
            TOOL,
            Command::new(&self.executable)
                .args(&self.args)
                .arg(structure_path),
        )?;
        let text = String::from_utf8_lossy(&output.stdout);
        let parsed = parse_dssp(&text)?;

        let mut table = AccessibilityTable::new();
        let mut foreign = 0usize;
        for (chain_id, key, value) in parsed {
            if model.chain(&chain_id).is_some() {
                table.insert(&chain_id, key, value);
            } else {
                foreign += 1;
            }
        }
        if foreign > 0 {
            debug!(foreign, "Dropped residues on chains absent from the parsed model.");
        }
        debug!(residues = table.len(), "Accessibility table built.");
        Ok(table)
    }
}

/// Relative accessibility from DSSP's absolute value, clamped into `[0, 1]`.
pub fn relative_accessibility(residue: char, absolute: f64) -> Option<f64> {
    MAX_ASA
        .get(&residue.to_ascii_uppercase())
        .map(|max| (absolute / max).clamp(0.0, 1.0))
}

/// Parses the residue section of a classic-format DSSP file.
///
/// Chain-break lines and residues without a known maximal surface are skipped.
/// Lowercase amino-acid letters mark half-cystines and are read as `C`.
pub fn parse_dssp(
    text: &str,
) -> Result<Vec<(String, ResidueKey, ResidueAccessibility)>, ToolError> {
    let mut lines = text.lines();
    if !lines.any(|line| line.starts_with(HEADER_PREFIX)) {
        return Err(output_error("no residue table header found"));
    }

    let mut rows = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let bytes = line.as_bytes();
        if bytes.len() < 38 {
            return Err(output_error(format!("truncated residue line: '{line}'")));
        }
        let aa = bytes[13] as char;
        if aa == '!' {
            continue;
        }

        let serial: isize = field(line, 5..10)?
            .parse()
            .map_err(|_| output_error(format!("bad residue number in '{line}'")))?;
        let insertion = (bytes[10] as char).to_string();
        let chain_id = (bytes[11] as char).to_string();
        let secondary_structure = match bytes[16] as char {
            ' ' => '-',
            c => c,
        };
        let absolute: f64 = field(line, 34..38)?
            .parse()
            .map_err(|_| output_error(format!("bad accessibility in '{line}'")))?;

        let residue = if aa.is_ascii_lowercase() { 'C' } else { aa };
        let Some(relative) = relative_accessibility(residue, absolute) else {
            debug!(chain = %chain_id, serial, residue = %residue, "Skipping residue without maximal ASA.");
            continue;
        };

        rows.push((
            chain_id,
            ResidueKey::with_insertion_code(serial, &insertion),
            ResidueAccessibility {
                secondary_structure,
                relative_accessibility: relative,
            },
        ));
    }
    Ok(rows)
}

fn field(line: &str, range: std::ops::Range<usize>) -> Result<&str, ToolError> {
    line.get(range)
        .map(str::trim)
        .ok_or_else(|| output_error(format!("malformed residue line: '{line}'")))
}

fn output_error(message: impl Into<String>) -> ToolError {
    ToolError::Output {
        tool: TOOL.to_string(),
        message: message.into(),
    }
}
