use crate::core::models::residue::AminoAcid;
use phf::{Map, phf_map};

static STANDARD_RESIDUE_NAMES: Map<&'static str, AminoAcid> = phf_map! {
    "ALA" => AminoAcid::Alanine,
    "ARG" => AminoAcid::Arginine,
    "ASN" => AminoAcid::Asparagine,
    "ASP" => AminoAcid::AsparticAcid,
    "CYS" => AminoAcid::Cysteine,
    "GLN" => AminoAcid::Glutamine,
    "GLU" => AminoAcid::GlutamicAcid,
    "GLY" => AminoAcid::Glycine,
    "HIS" => AminoAcid::Histidine,
    "ILE" => AminoAcid::Isoleucine,
    "LEU" => AminoAcid::Leucine,
    "LYS" => AminoAcid::Lysine,
    "MET" => AminoAcid::Methionine,
    "PHE" => AminoAcid::Phenylalanine,
    "PRO" => AminoAcid::Proline,
    "SER" => AminoAcid::Serine,
    "THR" => AminoAcid::Threonine,
    "TRP" => AminoAcid::Tryptophan,
    "TYR" => AminoAcid::Tyrosine,
    "VAL" => AminoAcid::Valine,
};

/// Resolves a structure-file residue name to a standard amino acid.
///
/// Matching ignores surrounding whitespace and case. Modified residues such as
/// `MSE` or `SEP` are deliberately not resolved.
pub fn amino_acid_from_residue_name(residue_name: &str) -> Option<AminoAcid> {
    let trimmed = residue_name.trim();
    if trimmed.len() != 3 {
        return None;
    }
    STANDARD_RESIDUE_NAMES
        .get(trimmed.to_ascii_uppercase().as_str())
        .copied()
}

pub fn is_standard_residue(residue_name: &str) -> bool {
    amino_acid_from_residue_name(residue_name).is_some()
}
