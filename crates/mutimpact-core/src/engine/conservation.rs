use super::error::PipelineError;
use super::tools::SequenceAligner;
use crate::core::models::features::ConservationColumn;
use crate::core::models::sequence::{ReferenceSequence, SequenceRecord};
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

const GAP: char = '-';

fn is_gap(c: char) -> bool {
    c == GAP || c == '.'
}

/// Shannon entropy in bits over the non-gap symbols of one column.
///
/// Gaps are left out of the denominator. A column with no residues has entropy 0.
pub fn column_entropy<I>(column: I) -> f64
where
    I: IntoIterator<Item = char>,
{
    let mut counts: HashMap<char, usize> = HashMap::new();
    let mut total = 0usize;
    for symbol in column.into_iter().filter(|&c| !is_gap(c)) {
        *counts.entry(symbol.to_ascii_uppercase()).or_default() += 1;
        total += 1;
    }
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    let entropy: f64 = counts
        .values()
        .map(|&n| {
            let p = n as f64 / total;
            -p * p.log2()
        })
        .sum();
    // A single symbol yields -0.0; report it as 0.
    entropy.max(0.0)
}

/// Per-position entropies from an alignment whose first row is the reference.
///
/// Columns where the reference row holds a gap are skipped and do not consume
/// a position, so positions count the reference's own residues from 1.
pub fn profile_from_alignment(aligned: &[SequenceRecord]) -> Result<Vec<ConservationColumn>, PipelineError> {
    let Some(reference_row) = aligned.first() else {
        return Err(PipelineError::Internal("alignment contains no rows".to_string()));
    };
    let rows: Vec<Vec<char>> = aligned.iter().map(|r| r.sequence.chars().collect()).collect();
    let width = rows[0].len();
    if let Some(bad) = rows.iter().position(|r| r.len() != width) {
        return Err(PipelineError::Internal(format!(
            "aligned row '{}' has length {}, expected {width}",
            aligned[bad].id,
            rows[bad].len()
        )));
    }

    let mut columns = Vec::new();
    let mut position = 0usize;
    for col in 0..width {
        if is_gap(rows[0][col]) {
            continue;
        }
        position += 1;
        columns.push(ConservationColumn {
            position,
            entropy: column_entropy(rows.iter().map(|r| r[col])),
        });
    }
    debug!(reference = %reference_row.id, width, positions = position, "Alignment profiled.");
    Ok(columns)
}

#[instrument(skip_all, fields(homologs = homologs.len()))]
pub fn build_conservation_profile(
    reference: &ReferenceSequence,
    homologs: &[SequenceRecord],
    aligner: &dyn SequenceAligner,
) -> Result<Vec<ConservationColumn>, PipelineError> {
    let mut sequences = Vec::with_capacity(homologs.len() + 1);
    sequences.push(reference.to_record());
    sequences.extend(homologs.iter().cloned());
    if homologs.is_empty() {
        warn!("No homologs supplied; every column will have zero entropy.");
    }

    let aligned = aligner.align(&sequences)?;
    if aligned.len() != sequences.len() {
        return Err(PipelineError::Internal(format!(
            "aligner returned {} rows for {} sequences",
            aligned.len(),
            sequences.len()
        )));
    }

    let profile = profile_from_alignment(&aligned)?;
    if profile.len() != reference.len() {
        warn!(
            profiled = profile.len(),
            reference = reference.len(),
            "Aligned reference row does not cover the reference sequence exactly."
        );
    }
    info!(positions = profile.len(), "Conservation profile built.");
    Ok(profile)
}
