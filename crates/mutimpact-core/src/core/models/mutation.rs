use super::residue::AminoAcid;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A mutation request exactly as it appears in the input table, before any checks.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawMutation {
    pub position: i64,
    pub wt: String,
    #[serde(rename = "mut")]
    pub mutant: String,
}

impl RawMutation {
    pub fn new(position: i64, wt: impl Into<String>, mutant: impl Into<String>) -> Self {
        Self {
            position,
            wt: wt.into(),
            mutant: mutant.into(),
        }
    }
}

/// A mutation that passed validation against the reference sequence.
///
/// `position` lies in `[1, len(reference)]`, the reference carries `wt` at that
/// position, and `wt != mutant`. Only the validator constructs these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Mutation {
    pub position: usize,
    #[serde(serialize_with = "serialize_code")]
    pub wt: AminoAcid,
    #[serde(rename = "mut", serialize_with = "serialize_code")]
    pub mutant: AminoAcid,
}

impl Mutation {
    pub(crate) fn new(position: usize, wt: AminoAcid, mutant: AminoAcid) -> Self {
        Self {
            position,
            wt,
            mutant,
        }
    }

    /// The identity used when joining mutation-specific features.
    pub fn key(&self) -> (usize, AminoAcid, AminoAcid) {
        (self.position, self.wt, self.mutant)
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.wt, self.position, self.mutant)
    }
}

fn serialize_code<S>(aa: &AminoAcid, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_char(aa.code())
}
