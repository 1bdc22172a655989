use crate::core::models::features::{FeatureRow, StabilityClass, StabilityFeatures};
use tracing::{info, instrument, warn};

const VOLUME_SCALE: f64 = 100.0;
const HYDROPHOBICITY_SCALE: f64 = 5.0;
const BURIAL_WEIGHT: f64 = 2.0;

const SCORE_FLOOR: f64 = -1.0; // exclusive
const LOW_UPPER: f64 = 1.5;
const MODERATE_UPPER: f64 = 3.0;
const SCORE_CEILING: f64 = 10.0;

/// Bins a score into `(-1, 1.5]`, `(1.5, 3]`, `(3, 10]`.
///
/// Returns `None` for scores outside `(-1, 10]`.
pub fn bin_score(score: f64) -> Option<StabilityClass> {
    if score > SCORE_FLOOR && score <= LOW_UPPER {
        Some(StabilityClass::Low)
    } else if score > LOW_UPPER && score <= MODERATE_UPPER {
        Some(StabilityClass::Moderate)
    } else if score > MODERATE_UPPER && score <= SCORE_CEILING {
        Some(StabilityClass::High)
    } else {
        None
    }
}

/// Like [`bin_score`], but clamps out-of-range scores into the outer bins.
pub fn classify(score: f64) -> StabilityClass {
    bin_score(score).unwrap_or_else(|| {
        let clamped = if score > SCORE_CEILING {
            StabilityClass::High
        } else {
            StabilityClass::Low
        };
        warn!(score, class = %clamped, "Stability score outside (-1, 10]; clamped.");
        clamped
    })
}

/// Largest non-null entropy of the run, or 1 when there is none above zero.
pub fn max_entropy(rows: &[FeatureRow]) -> f64 {
    rows.iter()
        .filter_map(|r| r.entropy)
        .fold(None, |acc: Option<f64>, e| Some(acc.map_or(e, |a| a.max(e))))
        .filter(|&m| m > 0.0)
        .unwrap_or(1.0)
}

pub fn stability_features(row: &FeatureRow, max_entropy: f64) -> StabilityFeatures {
    let volume_impact = row.chemistry.volume_delta.abs() / VOLUME_SCALE;
    let hydro_impact = row.chemistry.hydrophobicity_delta.abs() / HYDROPHOBICITY_SCALE;
    let conservation_score = row.entropy.map(|e| 1.0 - e / max_entropy);
    let buried = f64::from(row.buried_flag().unwrap_or(0));

    let stability_score =
        BURIAL_WEIGHT * buried + volume_impact + hydro_impact + conservation_score.unwrap_or(0.0);

    StabilityFeatures {
        volume_impact,
        hydro_impact,
        conservation_score,
        stability_score,
        stability_class: classify(stability_score),
    }
}

/// Fills in the stability columns of every row. Row count and order are unchanged.
#[instrument(skip_all, fields(rows = rows.len()))]
pub fn score_stability(mut rows: Vec<FeatureRow>) -> Vec<FeatureRow> {
    let max_entropy = max_entropy(&rows);
    for row in &mut rows {
        row.stability = Some(stability_features(row, max_entropy));
    }
    let high = rows
        .iter()
        .filter(|r| r.stability.is_some_and(|s| s.stability_class == StabilityClass::High))
        .count();
    info!(max_entropy, high_impact = high, "Stability scored.");
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::features::StructuralFeature;
    use crate::core::models::mutation::Mutation;
    use crate::core::models::residue::AminoAcid::*;
    use crate::engine::chemistry::chemistry_for;

    fn row(buried: Option<u8>, entropy: Option<f64>) -> FeatureRow {
        let mutation = Mutation::new(3, AsparticAcid, GlutamicAcid);
        FeatureRow {
            mutation,
            structure: buried.map(|flag| StructuralFeature {
                position: 3,
                secondary_structure: 'H',
                relative_sasa: if flag == 1 { 0.1 } else { 0.6 },
                buried_flag: flag,
            }),
            entropy,
            chemistry: chemistry_for(&mutation).unwrap(),
            stability: None,
        }
    }

    #[test]
    fn bins_are_half_open_on_the_left() {
        assert_eq!(bin_score(-0.999), Some(StabilityClass::Low));
        assert_eq!(bin_score(1.5), Some(StabilityClass::Low));
        assert_eq!(bin_score(1.5001), Some(StabilityClass::Moderate));
        assert_eq!(bin_score(3.0), Some(StabilityClass::Moderate));
        assert_eq!(bin_score(3.0001), Some(StabilityClass::High));
        assert_eq!(bin_score(10.0), Some(StabilityClass::High));
        assert_eq!(bin_score(-1.0), None);
        assert_eq!(bin_score(10.5), None);
    }

    #[test]
    fn out_of_range_scores_are_clamped_into_outer_bins() {
        assert_eq!(classify(-3.0), StabilityClass::Low);
        assert_eq!(classify(42.0), StabilityClass::High);
        assert_eq!(classify(f64::NAN), StabilityClass::Low);
    }

    #[test]
    fn all_zero_entropy_gives_full_conservation() {
        let rows = score_stability(vec![row(Some(0), Some(0.0)), row(None, Some(0.0))]);
        for r in &rows {
            assert_eq!(r.stability.unwrap().conservation_score, Some(1.0));
        }
    }

    #[test]
    fn conservation_is_relative_to_run_maximum() {
        let rows = score_stability(vec![row(Some(0), Some(2.0)), row(Some(0), Some(0.5))]);
        assert_eq!(rows[0].stability.unwrap().conservation_score, Some(0.0));
        assert_eq!(rows[1].stability.unwrap().conservation_score, Some(0.75));
    }

    #[test]
    fn composite_score_for_buried_aspartate_to_glutamate() {
        let rows = score_stability(vec![row(Some(1), Some(0.0))]);
        let s = rows[0].stability.unwrap();
        assert!((s.volume_impact - 0.273).abs() < 1e-9);
        assert_eq!(s.hydro_impact, 0.0);
        // 2 * 1 + 0.273 + 0 + 1
        assert!((s.stability_score - 3.273).abs() < 1e-9);
        assert_eq!(s.stability_class, StabilityClass::High);
    }

    #[test]
    fn missing_coverage_contributes_zero_and_never_nan() {
        let rows = score_stability(vec![row(None, None)]);
        let s = rows[0].stability.unwrap();
        assert_eq!(s.conservation_score, None);
        assert!(s.stability_score.is_finite());
        assert!((s.stability_score - 0.273).abs() < 1e-9);
        assert_eq!(s.stability_class, StabilityClass::Low);
    }

    #[test]
    fn max_entropy_ignores_nulls() {
        assert_eq!(max_entropy(&[row(None, None)]), 1.0);
        assert_eq!(max_entropy(&[row(None, None), row(None, Some(1.7))]), 1.7);
    }
}
