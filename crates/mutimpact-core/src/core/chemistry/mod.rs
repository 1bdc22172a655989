//! Fixed physicochemical reference tables for the standard amino acids.

pub mod properties;
