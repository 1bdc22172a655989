use super::error::InputError;
use crate::core::models::sequence::{ReferenceSequence, SequenceRecord};
use bio::io::fasta;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;

/// Reads every record of a FASTA stream, preserving file order.
///
/// `source` only labels errors.
pub fn read_records<R: Read>(reader: R, source: &Path) -> Result<Vec<SequenceRecord>, InputError> {
    fasta::Reader::new(reader)
        .records()
        .map(|record| {
            let record = record.map_err(|e| InputError::format(source, e.to_string()))?;
            record
                .check()
                .map_err(|e| InputError::format(source, e.to_string()))?;
            Ok(SequenceRecord {
                id: record.id().to_string(),
                description: record.desc().map(str::to_string),
                sequence: String::from_utf8_lossy(record.seq()).into_owned(),
            })
        })
        .collect()
}

pub fn read_fasta(path: &Path) -> Result<Vec<SequenceRecord>, InputError> {
    let file = File::open(path).map_err(|e| InputError::from_io(path, e))?;
    let records = read_records(file, path)?;
    debug!(path = %path.display(), records = records.len(), "Read FASTA file.");
    Ok(records)
}

/// Loads the reference sequence; the file must hold exactly one record.
pub fn load_reference(path: &Path) -> Result<ReferenceSequence, InputError> {
    let records = read_fasta(path)?;
    match records.as_slice() {
        [record] => Ok(ReferenceSequence::new(record.id.clone(), &record.sequence)),
        _ => Err(InputError::format(
            path,
            format!(
                "FASTA must contain exactly one sequence, found {}",
                records.len()
            ),
        )),
    }
}

/// Loads a homolog set; any number of records, order preserved.
pub fn load_homologs(path: &Path) -> Result<Vec<SequenceRecord>, InputError> {
    read_fasta(path)
}

pub fn write_records<W: Write>(writer: W, records: &[SequenceRecord]) -> std::io::Result<()> {
    let mut writer = fasta::Writer::new(writer);
    for record in records {
        writer.write(
            &record.id,
            record.description.as_deref(),
            record.sequence.as_bytes(),
        )?;
    }
    writer.flush()
}

pub fn write_fasta(path: &Path, records: &[SequenceRecord]) -> Result<(), InputError> {
    let file = File::create(path).map_err(|e| InputError::from_io(path, e))?;
    write_records(file, records).map_err(|e| InputError::from_io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn read_records_preserves_order_and_descriptions() {
        let input = b">first some description\nACDE\nFG\n>second\nMKV\n";
        let records = read_records(&input[..], Path::new("mem.fasta")).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "first");
        assert_eq!(records[0].description.as_deref(), Some("some description"));
        assert_eq!(records[0].sequence, "ACDEFG");
        assert_eq!(records[1].id, "second");
        assert_eq!(records[1].sequence, "MKV");
    }

    #[test]
    fn load_reference_uppercases_single_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ref.fasta");
        fs::write(&path, ">ref\nacdefg\n").unwrap();
        let reference = load_reference(&path).unwrap();
        assert_eq!(reference.to_string(), "ACDEFG");
        assert_eq!(reference.id(), "ref");
    }

    #[test]
    fn load_reference_rejects_multiple_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ref.fasta");
        fs::write(&path, ">a\nACD\n>b\nEFG\n").unwrap();
        let err = load_reference(&path).unwrap_err();
        assert!(matches!(err, InputError::Format { .. }));
    }

    #[test]
    fn load_reference_rejects_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ref.fasta");
        fs::write(&path, "").unwrap();
        let err = load_reference(&path).unwrap_err();
        assert!(matches!(err, InputError::Format { .. }));
    }

    #[test]
    fn missing_file_is_reported_as_not_found() {
        let dir = tempdir().unwrap();
        let err = read_fasta(&dir.path().join("absent.fasta")).unwrap_err();
        assert!(matches!(err, InputError::NotFound { .. }));
    }

    #[test]
    fn written_records_can_be_read_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.fasta");
        let records = vec![
            SequenceRecord::new("ref", "ACDEFG"),
            SequenceRecord::new("hom1", "ACDEYG"),
        ];
        write_fasta(&path, &records).unwrap();
        let read_back = read_fasta(&path).unwrap();
        assert_eq!(read_back, records);
    }
}
