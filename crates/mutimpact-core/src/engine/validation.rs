use super::error::PipelineError;
use crate::core::models::mutation::{Mutation, RawMutation};
use crate::core::models::residue::AminoAcid;
use crate::core::models::sequence::ReferenceSequence;
use tracing::{debug, info, instrument};

/// Checks every raw mutation against the reference and returns them in input order.
///
/// Checks run in the order range, residue symbols, reference identity, no-op.
/// The first failing row aborts the whole batch.
#[instrument(skip_all, fields(rows = raw.len()))]
pub fn validate_mutations(
    reference: &ReferenceSequence,
    raw: &[RawMutation],
) -> Result<Vec<Mutation>, PipelineError> {
    let validated = raw
        .iter()
        .map(|row| validate_one(reference, row))
        .collect::<Result<Vec<_>, _>>()?;
    info!(count = validated.len(), "Mutations validated.");
    Ok(validated)
}

fn validate_one(reference: &ReferenceSequence, raw: &RawMutation) -> Result<Mutation, PipelineError> {
    let length = reference.len();
    let position = usize::try_from(raw.position)
        .ok()
        .filter(|&p| p >= 1 && p <= length)
        .ok_or(PipelineError::OutOfRange {
            position: raw.position,
            length,
        })?;

    let wt = parse_symbol(raw.position, &raw.wt)?;
    let mutant = parse_symbol(raw.position, &raw.mutant)?;

    let found = reference
        .residue_at(position)
        .ok_or_else(|| PipelineError::Internal(format!("position {position} passed range check")))?;
    if found != wt.code() {
        return Err(PipelineError::ReferenceMismatch {
            position,
            expected: wt.code(),
            found,
        });
    }

    if wt == mutant {
        return Err(PipelineError::NoOpMutation {
            position,
            residue: wt.code(),
        });
    }

    let mutation = Mutation::new(position, wt, mutant);
    debug!(%mutation, "Accepted mutation.");
    Ok(mutation)
}

fn parse_symbol(position: i64, symbol: &str) -> Result<AminoAcid, PipelineError> {
    symbol
        .parse::<AminoAcid>()
        .map_err(|_| PipelineError::InvalidResidue {
            position,
            symbol: symbol.to_string(),
        })
}
