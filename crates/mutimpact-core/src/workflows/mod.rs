//! # Workflows Module
//!
//! End-to-end entry points that tie the [`crate::engine`] stages together.
//!
//! - **Feature Workflow** ([`features`]) - Loads inputs, validates mutations, runs the
//!   structural and conservation stages (optionally side by side), computes chemistry,
//!   joins everything into one row per mutation and scores stability. Also provides
//!   the validation-only path used to produce a cleaned mutation table.

pub mod features;
