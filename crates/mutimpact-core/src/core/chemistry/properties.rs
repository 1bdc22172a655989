use crate::core::models::residue::AminoAcid;
use phf::{Map, Set, phf_map, phf_set};

// Net side-chain charge at neutral pH; histidine counted as a partial positive.
static CHARGE: Map<char, f64> = phf_map! {
    'D' => -1.0, 'E' => -1.0,
    'K' => 1.0, 'R' => 1.0,
    'H' => 0.5,
};

// Kyte-Doolittle hydropathy.
static HYDROPHOBICITY: Map<char, f64> = phf_map! {
    'A' => 1.8, 'C' => 2.5, 'D' => -3.5, 'E' => -3.5,
    'F' => 2.8, 'G' => -0.4, 'H' => -3.2, 'I' => 4.5,
    'K' => -3.9, 'L' => 3.8, 'M' => 1.9, 'N' => -3.5,
    'P' => -1.6, 'Q' => -3.5, 'R' => -4.5, 'S' => -0.8,
    'T' => -0.7, 'V' => 4.2, 'W' => -0.9, 'Y' => -1.3,
};

// Side-chain volume in cubic angstroms.
static VOLUME: Map<char, f64> = phf_map! {
    'A' => 88.6, 'C' => 108.5, 'D' => 111.1, 'E' => 138.4,
    'F' => 189.9, 'G' => 60.1, 'H' => 153.2, 'I' => 166.7,
    'K' => 168.6, 'L' => 166.7, 'M' => 162.9, 'N' => 114.1,
    'P' => 112.7, 'Q' => 143.8, 'R' => 173.4, 'S' => 89.0,
    'T' => 116.1, 'V' => 140.0, 'W' => 227.8, 'Y' => 193.6,
};

static POLAR: Set<char> = phf_set! {
    'D', 'E', 'K', 'R', 'H', 'N', 'Q', 'S', 'T', 'Y',
};

/// Residues without a listed charge are neutral.
pub fn charge(aa: AminoAcid) -> f64 {
    CHARGE.get(&aa.code()).copied().unwrap_or(0.0)
}

pub fn hydrophobicity(aa: AminoAcid) -> Option<f64> {
    HYDROPHOBICITY.get(&aa.code()).copied()
}

pub fn volume(aa: AminoAcid) -> Option<f64> {
    VOLUME.get(&aa.code()).copied()
}

pub fn is_polar(aa: AminoAcid) -> bool {
    POLAR.contains(&aa.code())
}
