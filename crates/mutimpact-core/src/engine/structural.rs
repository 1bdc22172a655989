use super::error::PipelineError;
use super::mapping::CoordinateMapping;
use super::tools::AccessibilityTable;
use crate::core::models::features::StructuralFeature;
use crate::core::models::structure::StructureModel;
use tracing::{debug, info, instrument};

/// Relative accessibility strictly below this marks a residue as buried.
pub const BURIAL_THRESHOLD: f64 = 0.2;

pub fn buried_flag(relative_accessibility: f64) -> u8 {
    u8::from(relative_accessibility < BURIAL_THRESHOLD)
}

/// One feature per observed residue that is both mapped and reported by the analyzer.
///
/// Output follows the chain's structural order. Residues missing from either
/// source are skipped.
#[instrument(skip_all, fields(chain = chain_id))]
pub fn extract_structural_features(
    model: &StructureModel,
    chain_id: &str,
    mapping: &CoordinateMapping,
    accessibility: &AccessibilityTable,
) -> Result<Vec<StructuralFeature>, PipelineError> {
    let chain = model
        .chain(chain_id)
        .ok_or_else(|| PipelineError::ChainNotFound {
            chain_id: chain_id.to_string(),
            available: model.chain_ids().join(", "),
        })?;
    if mapping.chain_id() != chain_id {
        return Err(PipelineError::Internal(format!(
            "coordinate mapping was built for chain '{}', not '{chain_id}'",
            mapping.chain_id()
        )));
    }

    let mut features = Vec::new();
    let (mut unmapped, mut unresolved) = (0usize, 0usize);
    for residue in chain.observed_residues() {
        let Some(position) = mapping.position(&residue.key) else {
            unmapped += 1;
            continue;
        };
        let Some(acc) = accessibility.get(chain_id, &residue.key) else {
            unresolved += 1;
            debug!(residue = %residue.key, "No accessibility reported for residue.");
            continue;
        };
        features.push(StructuralFeature {
            position,
            secondary_structure: acc.secondary_structure,
            relative_sasa: acc.relative_accessibility,
            buried_flag: buried_flag(acc.relative_accessibility),
        });
    }

    info!(
        features = features.len(),
        unmapped, unresolved, "Structural features extracted."
    );
    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::sequence::ReferenceSequence;
    use crate::core::models::structure::{ResidueKey, StructureModelBuilder};
    use crate::engine::mapping::build_coordinate_mapping;
    use crate::engine::tools::ResidueAccessibility;

    fn acc(ss: char, rsa: f64) -> ResidueAccessibility {
        ResidueAccessibility {
            secondary_structure: ss,
            relative_accessibility: rsa,
        }
    }

    #[test]
    fn burial_threshold_is_exclusive() {
        assert_eq!(buried_flag(0.0), 1);
        assert_eq!(buried_flag(0.1999), 1);
        assert_eq!(buried_flag(0.2), 0);
        assert_eq!(buried_flag(0.75), 0);
    }

    #[test]
    fn features_use_reference_positions_and_skip_uncovered_residues() {
        let mut builder = StructureModelBuilder::new();
        builder
            .start_chain("A")
            .add_residue(ResidueKey::new(5), "CYS", false)
            .add_residue(ResidueKey::new(6), "ASP", false)
            .add_residue(ResidueKey::new(7), "GLU", false)
            .add_residue(ResidueKey::new(8), "TRP", false);
        let model = builder.build();
        let reference = ReferenceSequence::new("ref", "ACDEFG");
        let mapping = build_coordinate_mapping(&model, "A", &reference).unwrap();

        let mut table = AccessibilityTable::new();
        table.insert("A", ResidueKey::new(5), acc('H', 0.05));
        table.insert("A", ResidueKey::new(7), acc('E', 0.2));
        table.insert("A", ResidueKey::new(8), acc('-', 0.9));

        let features = extract_structural_features(&model, "A", &mapping, &table).unwrap();
        let positions: Vec<usize> = features.iter().map(|f| f.position).collect();
        // Residue 6 has no accessibility entry; W8 pairs with G as a mismatch.
        assert_eq!(positions, vec![2, 4, 6]);
        assert_eq!(features[0].buried_flag, 1);
        assert_eq!(features[0].secondary_structure, 'H');
        assert_eq!(features[1].buried_flag, 0);
        assert!(features.iter().all(|f| f.position != 3));
    }

    #[test]
    fn missing_chain_is_an_error() {
        let model = StructureModelBuilder::new().build();
        let mapping = CoordinateMapping::default();
        let err = extract_structural_features(&model, "A", &mapping, &AccessibilityTable::new())
            .unwrap_err();
        assert!(matches!(err, PipelineError::ChainNotFound { .. }));
    }

    #[test]
    fn mapping_for_another_chain_is_rejected() {
        let mut builder = StructureModelBuilder::new();
        builder
            .start_chain("A")
            .add_residue(ResidueKey::new(1), "ALA", false)
            .start_chain("B")
            .add_residue(ResidueKey::new(1), "ALA", false);
        let model = builder.build();
        let reference = ReferenceSequence::new("ref", "ACDEFG");
        let mapping = build_coordinate_mapping(&model, "B", &reference).unwrap();
        assert_eq!(mapping.chain_id(), "B");

        let err = extract_structural_features(&model, "A", &mapping, &AccessibilityTable::new())
            .unwrap_err();
        assert!(matches!(err, PipelineError::Internal(_)));
    }
}
