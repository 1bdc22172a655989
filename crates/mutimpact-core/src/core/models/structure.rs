use super::residue::AminoAcid;
use std::collections::HashMap;
use std::fmt;

/// A residue's native label inside its chain: sequence number plus optional insertion code.
///
/// Two residues `52` and `52A` are distinct keys; this is the identity the
/// coordinate mapping and the accessibility analyzer agree on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResidueKey {
    pub serial: isize,
    pub insertion_code: Option<String>,
}

impl ResidueKey {
    pub fn new(serial: isize) -> Self {
        Self {
            serial,
            insertion_code: None,
        }
    }

    pub fn with_insertion_code(serial: isize, insertion_code: &str) -> Self {
        let trimmed = insertion_code.trim();
        Self {
            serial,
            insertion_code: (!trimmed.is_empty()).then(|| trimmed.to_string()),
        }
    }
}

impl fmt::Display for ResidueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.insertion_code {
            Some(code) => write!(f, "{}{}", self.serial, code),
            None => write!(f, "{}", self.serial),
        }
    }
}

/// Any residue present in a chain, including ligands, waters and modified residues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainResidue {
    pub key: ResidueKey,
    pub name: String,      // Residue name from the file (e.g., "ALA", "HOH")
    pub hetero: bool,      // True when the residue came from HETATM records
}

/// A residue that contributes to the chain's observed polymer sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralResidue {
    pub key: ResidueKey,
    pub amino_acid: AminoAcid,
    pub index: usize, // 0-based index among the chain's observed residues
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    pub id: String,
    residues: Vec<ChainResidue>,
    residue_index: HashMap<ResidueKey, usize>,
}

impl Chain {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            residues: Vec::new(),
            residue_index: HashMap::new(),
        }
    }

    pub fn residues(&self) -> &[ChainResidue] {
        &self.residues
    }

    pub fn residue(&self, key: &ResidueKey) -> Option<&ChainResidue> {
        self.residue_index.get(key).map(|&idx| &self.residues[idx])
    }

    /// Standard, non-hetero residues in structural order, numbered from zero.
    pub fn observed_residues(&self) -> Vec<StructuralResidue> {
        self.residues
            .iter()
            .filter(|r| !r.hetero)
            .filter_map(|r| AminoAcid::from_three_letter(&r.name).map(|aa| (r, aa)))
            .enumerate()
            .map(|(index, (r, amino_acid))| StructuralResidue {
                key: r.key.clone(),
                amino_acid,
                index,
            })
            .collect()
    }

    fn push_residue(&mut self, residue: ChainResidue) {
        if self.residue_index.contains_key(&residue.key) {
            return;
        }
        self.residue_index
            .insert(residue.key.clone(), self.residues.len());
        self.residues.push(residue);
    }
}

/// One model of a parsed structure file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructureModel {
    chains: Vec<Chain>,
}

impl StructureModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    pub fn chain(&self, id: &str) -> Option<&Chain> {
        self.chains.iter().find(|c| c.id == id)
    }

    pub fn chain_ids(&self) -> Vec<&str> {
        self.chains.iter().map(|c| c.id.as_str()).collect()
    }
}

pub struct StructureModelBuilder {
    model: StructureModel,
    chain_id_map: HashMap<String, usize>,
    current_chain_idx: Option<usize>,
}

impl Default for StructureModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StructureModelBuilder {
    pub fn new() -> Self {
        Self {
            model: StructureModel::new(),
            chain_id_map: HashMap::new(),
            current_chain_idx: None,
        }
    }

    /// Makes `id` the current chain, creating it on first sight.
    pub fn start_chain(&mut self, id: &str) -> &mut Self {
        let idx = match self.chain_id_map.get(id) {
            Some(&idx) => idx,
            None => {
                let idx = self.model.chains.len();
                self.model.chains.push(Chain::new(id));
                self.chain_id_map.insert(id.to_string(), idx);
                idx
            }
        };
        self.current_chain_idx = Some(idx);
        self
    }

    /// Appends a residue to the current chain. A residue added before any
    /// chain was started lands in a chain with a blank identifier.
    /// Repeated keys within a chain keep the first occurrence.
    pub fn add_residue(&mut self, key: ResidueKey, name: &str, hetero: bool) -> &mut Self {
        if self.current_chain_idx.is_none() {
            self.start_chain(" ");
        }
        if let Some(idx) = self.current_chain_idx {
            self.model.chains[idx].push_residue(ChainResidue {
                key,
                name: name.trim().to_string(),
                hetero,
            });
        }
        self
    }

    pub fn build(self) -> StructureModel {
        self.model
    }
}
