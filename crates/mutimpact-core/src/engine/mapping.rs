use super::error::PipelineError;
use crate::core::models::sequence::ReferenceSequence;
use crate::core::models::structure::{ResidueKey, StructuralResidue, StructureModel};
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

/// One column of a pairwise alignment; `None` is a gap on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignedPair {
    pub structure: Option<usize>,
    pub reference: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairwiseAlignment {
    pub score: usize,
    pub pairs: Vec<AlignedPair>,
}

impl PairwiseAlignment {
    /// Renders both rows with `-` for gaps, structure row first.
    pub fn rows(&self, structure: &[char], reference: &[char]) -> (String, String) {
        let render = |idx: Option<usize>, seq: &[char]| idx.and_then(|i| seq.get(i)).copied().unwrap_or('-');
        self.pairs
            .iter()
            .map(|p| (render(p.structure, structure), render(p.reference, reference)))
            .unzip()
    }
}

/// Global alignment scoring 1 per identity, 0 for mismatches and gaps.
///
/// Traceback starts at the bottom-right cell and, among equally scoring moves,
/// takes the diagonal first, then a gap in the reference row, then a gap in the
/// structure row. The result is therefore deterministic.
pub fn global_align(structure: &[char], reference: &[char]) -> PairwiseAlignment {
    let (n, m) = (structure.len(), reference.len());
    let width = m + 1;
    let mut score = vec![0usize; (n + 1) * width];
    let matches = |i: usize, j: usize| usize::from(structure[i - 1] == reference[j - 1]);

    for i in 1..=n {
        for j in 1..=m {
            let diag = score[(i - 1) * width + (j - 1)] + matches(i, j);
            let up = score[(i - 1) * width + j];
            let left = score[i * width + (j - 1)];
            score[i * width + j] = diag.max(up).max(left);
        }
    }

    let mut pairs = Vec::with_capacity(n.max(m));
    let (mut i, mut j) = (n, m);
    while i > 0 || j > 0 {
        let here = score[i * width + j];
        if i > 0 && j > 0 && here == score[(i - 1) * width + (j - 1)] + matches(i, j) {
            i -= 1;
            j -= 1;
            pairs.push(AlignedPair {
                structure: Some(i),
                reference: Some(j),
            });
        } else if i > 0 && (j == 0 || here == score[(i - 1) * width + j]) {
            i -= 1;
            pairs.push(AlignedPair {
                structure: Some(i),
                reference: None,
            });
        } else {
            j -= 1;
            pairs.push(AlignedPair {
                structure: None,
                reference: Some(j),
            });
        }
    }
    pairs.reverse();

    PairwiseAlignment {
        score: score[n * width + m],
        pairs,
    }
}

/// Lookup from a chain's residue keys to 1-based reference positions.
///
/// Entries are kept in alignment order, so positions increase strictly along them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoordinateMapping {
    chain_id: String,
    entries: Vec<(ResidueKey, usize)>,
    index: HashMap<ResidueKey, usize>,
}

impl CoordinateMapping {
    fn new(chain_id: &str) -> Self {
        Self {
            chain_id: chain_id.to_string(),
            ..Self::default()
        }
    }

    fn push(&mut self, key: ResidueKey, position: usize) {
        self.index.insert(key.clone(), position);
        self.entries.push((key, position));
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    pub fn position(&self, key: &ResidueKey) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn entries(&self) -> &[(ResidueKey, usize)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The chain's observed polymer residues in structural order.
pub fn extract_chain_sequence(
    model: &StructureModel,
    chain_id: &str,
) -> Result<Vec<StructuralResidue>, PipelineError> {
    let chain = model
        .chain(chain_id)
        .ok_or_else(|| PipelineError::ChainNotFound {
            chain_id: chain_id.to_string(),
            available: model.chain_ids().join(", "),
        })?;
    Ok(chain.observed_residues())
}

#[instrument(skip_all, fields(chain = chain_id))]
pub fn build_coordinate_mapping(
    model: &StructureModel,
    chain_id: &str,
    reference: &ReferenceSequence,
) -> Result<CoordinateMapping, PipelineError> {
    let residues = extract_chain_sequence(model, chain_id)?;
    let observed: Vec<char> = residues.iter().map(|r| r.amino_acid.code()).collect();
    if observed.is_empty() {
        warn!("Chain has no standard polymer residues; nothing can be mapped.");
    }

    let alignment = global_align(&observed, reference.residues());
    let mut mapping = CoordinateMapping::new(chain_id);
    let mut identical = 0usize;
    for pair in &alignment.pairs {
        if let (Some(s), Some(r)) = (pair.structure, pair.reference) {
            if observed[s] == reference.residues()[r] {
                identical += 1;
            }
            mapping.push(residues[s].key.clone(), r + 1);
        }
    }

    if tracing::enabled!(tracing::Level::DEBUG) {
        let (structure_row, reference_row) = alignment.rows(&observed, reference.residues());
        debug!(%structure_row, %reference_row, "Structure-to-reference alignment.");
    }
    info!(
        observed = observed.len(),
        mapped = mapping.len(),
        identical,
        "Coordinate mapping built."
    );
    Ok(mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::structure::StructureModelBuilder;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn rows(structure: &str, reference: &str) -> (String, String) {
        let (s, r) = (chars(structure), chars(reference));
        global_align(&s, &r).rows(&s, &r)
    }

    fn model(chain: &str, residues: &[(isize, &str, &str, bool)]) -> StructureModel {
        let mut builder = StructureModelBuilder::new();
        builder.start_chain(chain);
        for &(serial, icode, name, hetero) in residues {
            builder.add_residue(ResidueKey::with_insertion_code(serial, icode), name, hetero);
        }
        builder.build()
    }

    #[test]
    fn identical_sequences_align_without_gaps() {
        let (s, r) = rows("ACDEFG", "ACDEFG");
        assert_eq!(s, "ACDEFG");
        assert_eq!(r, "ACDEFG");
    }

    #[test]
    fn missing_internal_residue_becomes_structure_gap() {
        let (s, r) = rows("ACDFG", "ACDEFG");
        assert_eq!(s, "ACD-FG");
        assert_eq!(r, "ACDEFG");
    }

    #[test]
    fn missing_terminal_residue_becomes_leading_gap() {
        let alignment = global_align(&chars("CDEFG"), &chars("ACDEFG"));
        assert_eq!(alignment.score, 5);
        assert_eq!(
            alignment.pairs[0],
            AlignedPair {
                structure: None,
                reference: Some(0)
            }
        );
        assert_eq!(
            alignment.pairs[1],
            AlignedPair {
                structure: Some(0),
                reference: Some(1)
            }
        );
    }

    #[test]
    fn extra_structure_residue_becomes_reference_gap() {
        let (s, r) = rows("ACDWEFG", "ACDEFG");
        assert_eq!(s, "ACDWEFG");
        assert_eq!(r, "ACD-EFG");
    }

    #[test]
    fn empty_inputs_align_to_all_gaps() {
        let alignment = global_align(&[], &chars("ACD"));
        assert_eq!(alignment.score, 0);
        assert_eq!(alignment.pairs.len(), 3);
        assert!(alignment.pairs.iter().all(|p| p.structure.is_none()));
        assert!(global_align(&[], &[]).pairs.is_empty());
    }

    #[test]
    fn tie_break_is_deterministic() {
        let a = global_align(&chars("AAGA"), &chars("AGAA"));
        let b = global_align(&chars("AAGA"), &chars("AGAA"));
        assert_eq!(a, b);
    }

    #[test]
    fn mapping_skips_hetero_and_follows_author_numbering() {
        let model = model(
            "A",
            &[
                (10, "", "CYS", false),
                (11, "", "ASP", false),
                (11, "A", "GLU", false),
                (12, "", "PHE", false),
                (300, "", "HOH", true),
            ],
        );
        let reference = ReferenceSequence::new("ref", "ACDEFG");
        let mapping = build_coordinate_mapping(&model, "A", &reference).unwrap();

        assert_eq!(mapping.len(), 4);
        assert_eq!(mapping.position(&ResidueKey::new(10)), Some(2));
        assert_eq!(mapping.position(&ResidueKey::new(11)), Some(3));
        assert_eq!(
            mapping.position(&ResidueKey::with_insertion_code(11, "A")),
            Some(4)
        );
        assert_eq!(mapping.position(&ResidueKey::new(12)), Some(5));
        assert_eq!(mapping.position(&ResidueKey::new(300)), None);
    }

    #[test]
    fn mapped_positions_are_strictly_increasing_and_unique() {
        let model = model(
            "B",
            &[
                (1, "", "MET", false),
                (2, "", "LYS", false),
                (3, "", "TRP", false),
                (4, "", "VAL", false),
                (5, "", "LEU", false),
            ],
        );
        let reference = ReferenceSequence::new("ref", "MKVLLSTW");
        let mapping = build_coordinate_mapping(&model, "B", &reference).unwrap();
        let positions: Vec<usize> = mapping.entries().iter().map(|(_, p)| *p).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(positions.iter().all(|&p| (1..=reference.len()).contains(&p)));
    }

    #[test]
    fn unknown_chain_is_reported_with_available_chains() {
        let model = model("A", &[(1, "", "ALA", false)]);
        let reference = ReferenceSequence::new("ref", "A");
        let err = build_coordinate_mapping(&model, "Z", &reference).unwrap_err();
        match err {
            PipelineError::ChainNotFound {
                chain_id,
                available,
            } => {
                assert_eq!(chain_id, "Z");
                assert_eq!(available, "A");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
