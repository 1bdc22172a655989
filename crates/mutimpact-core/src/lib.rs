//! # mutimpact Core Library
//!
//! Builds a per-mutation feature table for protein variants from three signal
//! sources: structural context, evolutionary conservation and amino-acid
//! physicochemistry.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same three-layer split throughout.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`ReferenceSequence`,
//!   `Mutation`, `StructureModel`, `FeatureRow`), fixed property tables and file I/O.
//!
//! - **[`engine`]: The Pipeline Stages.** Validation, structure-to-sequence coordinate
//!   mapping, structural and conservation feature extraction, chemistry deltas, keyed
//!   joins and the stability heuristic. External programs sit behind the
//!   `SequenceAligner` and `AccessibilityAnalyzer` traits.
//!
//! - **[`workflows`]: The Public API.** Runs the stages in order against loaded inputs
//!   and reports progress along the way.
//!
//! The stability score is a heuristic composite, not a free-energy prediction.

pub mod core;
pub mod engine;
pub mod workflows;
