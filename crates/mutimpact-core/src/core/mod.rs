//! # Core Module
//!
//! Stateless building blocks shared by every pipeline stage.
//!
//! ## Architecture
//!
//! - **Data Models** ([`models`]) - Sequences, mutations, structures and feature records
//! - **Chemistry Tables** ([`chemistry`]) - Fixed per-residue physicochemical scales
//! - **File I/O** ([`io`]) - FASTA, CSV and structure readers plus table writers
//! - **Utilities** ([`utils`]) - Residue name lookups
//!
//! Nothing in this module talks to external programs or holds state between calls.

pub mod chemistry;
pub mod io;
pub mod models;
pub mod utils;
