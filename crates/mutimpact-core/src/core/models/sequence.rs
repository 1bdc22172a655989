use std::fmt;

/// A named sequence as read from, or written to, a FASTA file.
///
/// Aligned records keep their gap symbols (`-`) in `sequence`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    pub id: String,
    pub description: Option<String>,
    pub sequence: String,
}

impl SequenceRecord {
    pub fn new(id: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: None,
            sequence: sequence.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// The canonical amino-acid sequence that mutations are numbered against.
///
/// Symbols are stored uppercase. Positions handed to [`ReferenceSequence::residue_at`]
/// are 1-based, matching mutation numbering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSequence {
    id: String,
    residues: Vec<char>,
}

impl ReferenceSequence {
    pub fn new(id: impl Into<String>, sequence: &str) -> Self {
        Self {
            id: id.into(),
            residues: sequence
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| c.to_ascii_uppercase())
                .collect(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Returns the residue symbol at a 1-based position.
    pub fn residue_at(&self, position: usize) -> Option<char> {
        position
            .checked_sub(1)
            .and_then(|idx| self.residues.get(idx))
            .copied()
    }

    pub fn residues(&self) -> &[char] {
        &self.residues
    }

    pub fn to_record(&self) -> SequenceRecord {
        SequenceRecord::new(self.id.clone(), self.to_string())
    }
}

impl fmt::Display for ReferenceSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.residues {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uppercases_and_strips_whitespace() {
        let seq = ReferenceSequence::new("ref", "acd ef\ng");
        assert_eq!(seq.to_string(), "ACDEFG");
        assert_eq!(seq.len(), 6);
    }

    #[test]
    fn residue_at_is_one_based() {
        let seq = ReferenceSequence::new("ref", "ACDEFG");
        assert_eq!(seq.residue_at(1), Some('A'));
        assert_eq!(seq.residue_at(3), Some('D'));
        assert_eq!(seq.residue_at(6), Some('G'));
    }

    #[test]
    fn residue_at_out_of_range_returns_none() {
        let seq = ReferenceSequence::new("ref", "ACDEFG");
        assert_eq!(seq.residue_at(0), None);
        assert_eq!(seq.residue_at(7), None);
    }

    #[test]
    fn to_record_preserves_id_and_sequence() {
        let seq = ReferenceSequence::new("sp|P69905|HBA", "mvls");
        let record = seq.to_record();
        assert_eq!(record.id, "sp|P69905|HBA");
        assert_eq!(record.sequence, "MVLS");
    }
}
