use super::error::PipelineError;
use crate::core::chemistry::properties;
use crate::core::models::features::ChemistryFeature;
use crate::core::models::mutation::Mutation;
use crate::core::models::residue::AminoAcid;
use tracing::{info, instrument};

fn lookup(table: &str, aa: AminoAcid, value: Option<f64>) -> Result<f64, PipelineError> {
    value.ok_or_else(|| PipelineError::Internal(format!("no {table} value for residue {aa}")))
}

pub fn chemistry_for(mutation: &Mutation) -> Result<ChemistryFeature, PipelineError> {
    let (wt, mutant) = (mutation.wt, mutation.mutant);
    let hydro_wt = lookup("hydrophobicity", wt, properties::hydrophobicity(wt))?;
    let hydro_mut = lookup("hydrophobicity", mutant, properties::hydrophobicity(mutant))?;
    let vol_wt = lookup("volume", wt, properties::volume(wt))?;
    let vol_mut = lookup("volume", mutant, properties::volume(mutant))?;

    Ok(ChemistryFeature {
        position: mutation.position,
        wt,
        mutant,
        charge_change: properties::charge(mutant) - properties::charge(wt),
        hydrophobicity_delta: hydro_mut - hydro_wt,
        volume_delta: vol_mut - vol_wt,
        polarity_change_flag: u8::from(properties::is_polar(wt) != properties::is_polar(mutant)),
    })
}

/// One chemistry record per mutation, in input order.
#[instrument(skip_all, fields(mutations = mutations.len()))]
pub fn compute_chemistry_features(
    mutations: &[Mutation],
) -> Result<Vec<ChemistryFeature>, PipelineError> {
    let features = mutations
        .iter()
        .map(chemistry_for)
        .collect::<Result<Vec<_>, _>>()?;
    info!(count = features.len(), "Chemistry features computed.");
    Ok(features)
}
