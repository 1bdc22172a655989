use super::error::InputError;
use crate::core::models::structure::{ResidueKey, StructureModel, StructureModelBuilder};
use pdbtbx::{Format, PDB, ReadOptions, StrictnessLevel};
use std::path::Path;
use tracing::{debug, warn};

/// Structure file flavours the reader distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureFormat {
    Pdb,
    Mmcif,
}

impl StructureFormat {
    /// `.cif` / `.mmcif` (any case) selects mmCIF; everything else is read as PDB.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("cif") | Some("mmcif") => StructureFormat::Mmcif,
            _ => StructureFormat::Pdb,
        }
    }
}

impl From<StructureFormat> for Format {
    fn from(format: StructureFormat) -> Self {
        match format {
            StructureFormat::Pdb => Format::Pdb,
            StructureFormat::Mmcif => Format::Mmcif,
        }
    }
}

/// Parses a PDB or mmCIF file and returns its first model.
pub fn load_structure(path: &Path) -> Result<StructureModel, InputError> {
    if !path.exists() {
        return Err(InputError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let format = StructureFormat::from_path(path);
    let path_str = path.to_string_lossy();

    let (pdb, warnings) = ReadOptions::default()
        .set_format(format.into())
        .set_level(StrictnessLevel::Loose)
        .read(path_str.as_ref())
        .map_err(|errors| {
            let message = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            InputError::format(path, message)
        })?;
    if !warnings.is_empty() {
        debug!(
            path = %path.display(),
            count = warnings.len(),
            "Structure parsed with warnings."
        );
    }

    model_from_pdb(&pdb).ok_or_else(|| InputError::format(path, "structure contains no models"))
}

/// Converts model 0 of a parsed structure into a [`StructureModel`].
///
/// A residue counts as hetero when its first atom came from a HETATM record.
pub fn model_from_pdb(pdb: &PDB) -> Option<StructureModel> {
    let model = pdb.model(0)?;
    let mut builder = StructureModelBuilder::new();

    for chain in model.chains() {
        builder.start_chain(chain.id());
        for residue in chain.residues() {
            let (serial, insertion_code) = residue.id();
            let key = match insertion_code {
                Some(code) => ResidueKey::with_insertion_code(serial, code),
                None => ResidueKey::new(serial),
            };
            let Some(name) = residue.name() else {
                warn!(chain = chain.id(), residue = %key, "Residue without a name skipped.");
                continue;
            };
            let hetero = residue.atoms().next().is_some_and(|atom| atom.hetero());
            builder.add_residue(key, name, hetero);
        }
    }
    Some(builder.build())
}
