use crate::core::utils::identifiers;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the twenty standard amino acids.
///
/// Everything downstream of validation works on this type, so a value of
/// `AminoAcid` is always a residue the property tables know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AminoAcid {
    // --- Aliphatic, Nonpolar ---
    Alanine,    // A (ALA)
    Glycine,    // G (GLY)
    Isoleucine, // I (ILE)
    Leucine,    // L (LEU)
    Proline,    // P (PRO)
    Valine,     // V (VAL)

    // --- Aromatic ---
    Phenylalanine, // F (PHE)
    Tryptophan,    // W (TRP)
    Tyrosine,      // Y (TYR)

    // --- Polar, Uncharged ---
    Asparagine, // N (ASN)
    Cysteine,   // C (CYS)
    Glutamine,  // Q (GLN)
    Serine,     // S (SER)
    Threonine,  // T (THR)
    Methionine, // M (MET)

    // --- Positively Charged (Basic) ---
    Arginine,  // R (ARG)
    Lysine,    // K (LYS)
    Histidine, // H (HIS)

    // --- Negatively Charged (Acidic) ---
    AsparticAcid, // D (ASP)
    GlutamicAcid, // E (GLU)
}

impl AminoAcid {
    pub const ALL: [AminoAcid; 20] = [
        AminoAcid::Alanine,
        AminoAcid::Cysteine,
        AminoAcid::AsparticAcid,
        AminoAcid::GlutamicAcid,
        AminoAcid::Phenylalanine,
        AminoAcid::Glycine,
        AminoAcid::Histidine,
        AminoAcid::Isoleucine,
        AminoAcid::Lysine,
        AminoAcid::Leucine,
        AminoAcid::Methionine,
        AminoAcid::Asparagine,
        AminoAcid::Proline,
        AminoAcid::Glutamine,
        AminoAcid::Arginine,
        AminoAcid::Serine,
        AminoAcid::Threonine,
        AminoAcid::Valine,
        AminoAcid::Tryptophan,
        AminoAcid::Tyrosine,
    ];

    /// Parses a one-letter code, ignoring case.
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'A' => Some(AminoAcid::Alanine),
            'C' => Some(AminoAcid::Cysteine),
            'D' => Some(AminoAcid::AsparticAcid),
            'E' => Some(AminoAcid::GlutamicAcid),
            'F' => Some(AminoAcid::Phenylalanine),
            'G' => Some(AminoAcid::Glycine),
            'H' => Some(AminoAcid::Histidine),
            'I' => Some(AminoAcid::Isoleucine),
            'K' => Some(AminoAcid::Lysine),
            'L' => Some(AminoAcid::Leucine),
            'M' => Some(AminoAcid::Methionine),
            'N' => Some(AminoAcid::Asparagine),
            'P' => Some(AminoAcid::Proline),
            'Q' => Some(AminoAcid::Glutamine),
            'R' => Some(AminoAcid::Arginine),
            'S' => Some(AminoAcid::Serine),
            'T' => Some(AminoAcid::Threonine),
            'V' => Some(AminoAcid::Valine),
            'W' => Some(AminoAcid::Tryptophan),
            'Y' => Some(AminoAcid::Tyrosine),
            _ => None,
        }
    }

    /// Parses a three-letter residue name as found in structure files.
    pub fn from_three_letter(name: &str) -> Option<Self> {
        identifiers::amino_acid_from_residue_name(name)
    }

    pub fn code(self) -> char {
        match self {
            AminoAcid::Alanine => 'A',
            AminoAcid::Cysteine => 'C',
            AminoAcid::AsparticAcid => 'D',
            AminoAcid::GlutamicAcid => 'E',
            AminoAcid::Phenylalanine => 'F',
            AminoAcid::Glycine => 'G',
            AminoAcid::Histidine => 'H',
            AminoAcid::Isoleucine => 'I',
            AminoAcid::Lysine => 'K',
            AminoAcid::Leucine => 'L',
            AminoAcid::Methionine => 'M',
            AminoAcid::Asparagine => 'N',
            AminoAcid::Proline => 'P',
            AminoAcid::Glutamine => 'Q',
            AminoAcid::Arginine => 'R',
            AminoAcid::Serine => 'S',
            AminoAcid::Threonine => 'T',
            AminoAcid::Valine => 'V',
            AminoAcid::Tryptophan => 'W',
            AminoAcid::Tyrosine => 'Y',
        }
    }

    pub fn three_letter(self) -> &'static str {
        match self {
            AminoAcid::Alanine => "ALA",
            AminoAcid::Cysteine => "CYS",
            AminoAcid::AsparticAcid => "ASP",
            AminoAcid::GlutamicAcid => "GLU",
            AminoAcid::Phenylalanine => "PHE",
            AminoAcid::Glycine => "GLY",
            AminoAcid::Histidine => "HIS",
            AminoAcid::Isoleucine => "ILE",
            AminoAcid::Lysine => "LYS",
            AminoAcid::Leucine => "LEU",
            AminoAcid::Methionine => "MET",
            AminoAcid::Asparagine => "ASN",
            AminoAcid::Proline => "PRO",
            AminoAcid::Glutamine => "GLN",
            AminoAcid::Arginine => "ARG",
            AminoAcid::Serine => "SER",
            AminoAcid::Threonine => "THR",
            AminoAcid::Valine => "VAL",
            AminoAcid::Tryptophan => "TRP",
            AminoAcid::Tyrosine => "TYR",
        }
    }
}

impl fmt::Display for AminoAcid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("'{0}' is not one of the 20 standard amino acid codes")]
pub struct ParseAminoAcidError(pub String);

impl FromStr for AminoAcid {
    type Err = ParseAminoAcidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_code(c).ok_or_else(|| ParseAminoAcidError(s.into())),
            _ => Err(ParseAminoAcidError(s.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_for_every_standard_residue() {
        for aa in AminoAcid::ALL {
            assert_eq!(AminoAcid::from_code(aa.code()), Some(aa));
            assert_eq!(AminoAcid::from_three_letter(aa.three_letter()), Some(aa));
        }
    }

    #[test]
    fn from_code_is_case_insensitive() {
        assert_eq!(AminoAcid::from_code('d'), Some(AminoAcid::AsparticAcid));
        assert_eq!(AminoAcid::from_code('W'), Some(AminoAcid::Tryptophan));
    }

    #[test]
    fn from_code_rejects_ambiguous_and_non_standard_codes() {
        for c in ['B', 'J', 'O', 'U', 'X', 'Z', '-', '*'] {
            assert_eq!(AminoAcid::from_code(c), None, "{c} should be rejected");
        }
    }

    #[test]
    fn from_str_requires_exactly_one_letter() {
        assert_eq!("k".parse::<AminoAcid>(), Ok(AminoAcid::Lysine));
        assert_eq!(" E ".parse::<AminoAcid>(), Ok(AminoAcid::GlutamicAcid));
        assert!("".parse::<AminoAcid>().is_err());
        assert!("AL".parse::<AminoAcid>().is_err());
        assert!("ALA".parse::<AminoAcid>().is_err());
    }

    #[test]
    fn all_contains_twenty_distinct_residues() {
        let mut codes: Vec<char> = AminoAcid::ALL.iter().map(|aa| aa.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 20);
    }
}
