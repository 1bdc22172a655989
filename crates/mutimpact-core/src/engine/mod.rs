//! # Engine Module
//!
//! The pipeline stages that turn validated inputs into per-mutation features.
//!
//! ## Overview
//!
//! Each stage is a plain function over the models in [`crate::core`]. Stages that
//! need an external program reach it through the traits in [`tools`], so any
//! stage can be exercised with an in-memory stand-in.
//!
//! ## Architecture
//!
//! - **Validation** ([`validation`]) - Range, symbol and reference checks on raw mutations
//! - **Coordinate Mapping** ([`mapping`]) - Pairwise alignment of a chain's observed
//!   residues onto the reference numbering
//! - **Structural Features** ([`structural`]) - Secondary structure and burial per mapped position
//! - **Conservation** ([`conservation`]) - Column entropy of a multiple sequence alignment
//! - **Chemistry** ([`chemistry`]) - Charge, hydrophobicity, volume and polarity deltas
//! - **Aggregation** ([`aggregation`]) - Keyed joins into one row per mutation
//! - **Stability** ([`stability`]) - Heuristic composite score and impact class
//! - **External Tools** ([`tools`]) - Alignment and accessibility programs
//! - **Configuration, Progress, Errors** ([`config`], [`progress`], [`error`])

pub mod aggregation;
pub mod chemistry;
pub mod config;
pub mod conservation;
pub mod error;
pub mod mapping;
pub mod progress;
pub mod stability;
pub mod structural;
pub mod tools;
pub mod validation;
