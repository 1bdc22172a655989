use super::config::JoinStrategy;
use super::error::PipelineError;
use crate::core::models::features::{
    ChemistryFeature, ConservationColumn, FeatureRow, PositionFeatures, StructuralFeature,
};
use crate::core::models::mutation::Mutation;
use crate::core::models::residue::AminoAcid;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use tracing::{debug, info, instrument};

/// Builds a lookup where the first record seen for a key wins.
fn index_first<'a, K, V, F>(items: &'a [V], key: F) -> HashMap<K, &'a V>
where
    K: Eq + Hash,
    F: Fn(&V) -> K,
{
    let mut index = HashMap::with_capacity(items.len());
    for item in items {
        index.entry(key(item)).or_insert(item);
    }
    index
}

/// Inner join of structural and conservation features on position.
///
/// Output follows the structural features' order.
pub fn join_position_features(
    structural: &[StructuralFeature],
    conservation: &[ConservationColumn],
) -> Vec<PositionFeatures> {
    let entropy_by_position = index_first(conservation, |c| c.position);
    let mut seen = HashSet::new();
    structural
        .iter()
        .filter(|s| seen.insert(s.position))
        .filter_map(|s| {
            entropy_by_position
                .get(&s.position)
                .map(|c| PositionFeatures {
                    position: s.position,
                    structure: s.clone(),
                    entropy: c.entropy,
                })
        })
        .collect()
}

type ChemistryIndex<'a> = HashMap<(usize, AminoAcid, AminoAcid), &'a ChemistryFeature>;

fn chemistry_for(
    index: &ChemistryIndex<'_>,
    mutation: &Mutation,
) -> Result<ChemistryFeature, PipelineError> {
    index
        .get(&mutation.key())
        .map(|c| **c)
        .ok_or_else(|| PipelineError::Internal(format!("no chemistry features for mutation {mutation}")))
}

fn check_row_count(rows: &[FeatureRow], mutations: &[Mutation]) -> Result<(), PipelineError> {
    if rows.len() != mutations.len() {
        return Err(PipelineError::Internal(format!(
            "aggregation produced {} rows for {} mutations",
            rows.len(),
            mutations.len()
        )));
    }
    Ok(())
}

/// Left-joins structure, then conservation, then chemistry onto the mutations.
#[instrument(skip_all, fields(mutations = mutations.len()))]
pub fn merge_features(
    mutations: &[Mutation],
    structural: &[StructuralFeature],
    conservation: &[ConservationColumn],
    chemistry: &[ChemistryFeature],
) -> Result<Vec<FeatureRow>, PipelineError> {
    let structure_by_position = index_first(structural, |s| s.position);
    let entropy_by_position = index_first(conservation, |c| c.position);
    let chemistry_by_key = index_first(chemistry, ChemistryFeature::key);

    let rows = mutations
        .iter()
        .map(|m| {
            Ok(FeatureRow {
                mutation: *m,
                structure: structure_by_position.get(&m.position).map(|s| (*s).clone()),
                entropy: entropy_by_position.get(&m.position).map(|c| c.entropy),
                chemistry: chemistry_for(&chemistry_by_key, m)?,
                stability: None,
            })
        })
        .collect::<Result<Vec<_>, PipelineError>>()?;

    check_row_count(&rows, mutations)?;
    log_coverage(&rows);
    Ok(rows)
}

/// Inner-joins structure with conservation, left-joins the result onto the
/// mutations, then attaches chemistry.
///
/// A position with only one of the two position-keyed sources ends up with
/// neither here.
#[instrument(skip_all, fields(mutations = mutations.len()))]
pub fn build_feature_matrix(
    mutations: &[Mutation],
    structural: &[StructuralFeature],
    conservation: &[ConservationColumn],
    chemistry: &[ChemistryFeature],
) -> Result<Vec<FeatureRow>, PipelineError> {
    let combined = join_position_features(structural, conservation);
    debug!(positions = combined.len(), "Positions with structure and conservation.");
    let combined_by_position = index_first(&combined, |p| p.position);
    let chemistry_by_key = index_first(chemistry, ChemistryFeature::key);

    let rows = mutations
        .iter()
        .map(|m| {
            let position = combined_by_position.get(&m.position);
            Ok(FeatureRow {
                mutation: *m,
                structure: position.map(|p| p.structure.clone()),
                entropy: position.map(|p| p.entropy),
                chemistry: chemistry_for(&chemistry_by_key, m)?,
                stability: None,
            })
        })
        .collect::<Result<Vec<_>, PipelineError>>()?;

    check_row_count(&rows, mutations)?;
    log_coverage(&rows);
    Ok(rows)
}

pub fn aggregate(
    strategy: JoinStrategy,
    mutations: &[Mutation],
    structural: &[StructuralFeature],
    conservation: &[ConservationColumn],
    chemistry: &[ChemistryFeature],
) -> Result<Vec<FeatureRow>, PipelineError> {
    match strategy {
        JoinStrategy::LeftJoins => merge_features(mutations, structural, conservation, chemistry),
        JoinStrategy::PositionsFirst => {
            build_feature_matrix(mutations, structural, conservation, chemistry)
        }
    }
}

fn log_coverage(rows: &[FeatureRow]) {
    let with_structure = rows.iter().filter(|r| r.structure.is_some()).count();
    let with_entropy = rows.iter().filter(|r| r.entropy.is_some()).count();
    info!(
        rows = rows.len(),
        with_structure, with_entropy, "Feature rows assembled."
    );
}
