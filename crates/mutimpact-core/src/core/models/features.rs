use super::mutation::Mutation;
use super::residue::AminoAcid;
use std::fmt;

/// Structural context of one reference position.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuralFeature {
    pub position: usize,
    pub secondary_structure: char,
    pub relative_sasa: f64,
    pub buried_flag: u8,
}

/// Conservation of one non-gap column of the reference's aligned row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConservationColumn {
    pub position: usize,
    pub entropy: f64, // Shannon entropy in bits over non-gap symbols
}

/// Physicochemical deltas of a single amino-acid substitution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChemistryFeature {
    pub position: usize,
    pub wt: AminoAcid,
    pub mutant: AminoAcid,
    pub charge_change: f64,
    pub hydrophobicity_delta: f64,
    pub volume_delta: f64,
    pub polarity_change_flag: u8,
}

impl ChemistryFeature {
    pub fn key(&self) -> (usize, AminoAcid, AminoAcid) {
        (self.position, self.wt, self.mutant)
    }
}

/// Structural and conservation columns joined on position.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionFeatures {
    pub position: usize,
    pub structure: StructuralFeature,
    pub entropy: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StabilityClass {
    Low,
    Moderate,
    High,
}

impl StabilityClass {
    pub fn label(self) -> &'static str {
        match self {
            StabilityClass::Low => "Low impact",
            StabilityClass::Moderate => "Moderate impact",
            StabilityClass::High => "High impact",
        }
    }
}

impl fmt::Display for StabilityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Columns derived by the stability heuristic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilityFeatures {
    pub volume_impact: f64,
    pub hydro_impact: f64,
    pub conservation_score: Option<f64>,
    pub stability_score: f64,
    pub stability_class: StabilityClass,
}

/// One row of the final table: a validated mutation and everything known about it.
///
/// `structure` and `entropy` are `None` where the position has no structural or
/// alignment coverage. `stability` is filled in by the scorer.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub mutation: Mutation,
    pub structure: Option<StructuralFeature>,
    pub entropy: Option<f64>,
    pub chemistry: ChemistryFeature,
    pub stability: Option<StabilityFeatures>,
}

impl FeatureRow {
    pub fn position(&self) -> usize {
        self.mutation.position
    }

    pub fn buried_flag(&self) -> Option<u8> {
        self.structure.as_ref().map(|s| s.buried_flag)
    }
}
