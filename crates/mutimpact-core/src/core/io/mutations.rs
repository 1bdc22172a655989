use super::error::InputError;
use crate::core::models::mutation::{Mutation, RawMutation};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;

const REQUIRED_COLUMNS: [&str; 3] = ["position", "wt", "mut"];

/// Reads a mutation table with at least the columns `position`, `wt`, `mut`.
///
/// Column order is free and extra columns are ignored. `source` only labels errors.
pub fn read_mutations<R: Read>(reader: R, source: &Path) -> Result<Vec<RawMutation>, InputError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| InputError::format(source, e.to_string()))?
        .clone();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if !missing.is_empty() {
        return Err(InputError::format(
            source,
            format!(
                "mutation table must contain columns: position, wt, mut (missing: {})",
                missing.join(", ")
            ),
        ));
    }

    rdr.deserialize::<RawMutation>()
        .enumerate()
        .map(|(i, row)| {
            row.map_err(|e| InputError::format(source, format!("row {}: {}", i + 1, e)))
        })
        .collect()
}

pub fn load_mutations(path: &Path) -> Result<Vec<RawMutation>, InputError> {
    let file = File::open(path).map_err(|e| InputError::from_io(path, e))?;
    let mutations = read_mutations(file, path)?;
    debug!(path = %path.display(), rows = mutations.len(), "Read mutation table.");
    Ok(mutations)
}

/// Writes validated mutations as `position,wt,mut`.
pub fn write_validated<W: Write>(writer: W, mutations: &[Mutation]) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for mutation in mutations {
        wtr.serialize(mutation)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_validated_to_path(path: &Path, mutations: &[Mutation]) -> Result<(), InputError> {
    let file = File::create(path).map_err(|e| InputError::from_io(path, e))?;
    write_validated(file, mutations).map_err(|e| match e.into_kind() {
        csv::ErrorKind::Io(source) => InputError::from_io(path, source),
        other => InputError::format(path, format!("{other:?}")),
    })
}
