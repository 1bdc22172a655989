//! Readers and writers for the pipeline's files.
//!
//! Inputs are the reference and homolog FASTA files, the mutation table and a
//! PDB or mmCIF structure. Outputs are the feature tables and the validated
//! mutation table. All of them report failures as [`error::InputError`].

pub mod error;
pub mod fasta;
pub mod mutations;
pub mod structure;
pub mod table;
