//! # Core Models Module
//!
//! Plain data types shared by every pipeline stage.
//!
//! ## Key Components
//!
//! - [`residue`] - The twenty standard amino acids
//! - [`sequence`] - The 1-based reference sequence and FASTA records
//! - [`mutation`] - Raw mutation requests and validated mutations
//! - [`structure`] - Chains and residues of one structural model, keyed by native residue labels
//! - [`features`] - Per-position and per-mutation feature records and the aggregated row
//!
//! Three numbering systems meet in these types: structural residue keys
//! ([`structure::ResidueKey`]), 1-based reference positions, and alignment
//! columns. Only reference positions ever appear in a feature record.

pub mod features;
pub mod mutation;
pub mod residue;
pub mod sequence;
pub mod structure;
