//! Candidate identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix of the key given to a candidate's sidebar mirror.
pub const MIRROR_PREFIX: &str = "mirror-";

/// Identifier of a candidate, taken from its selection control.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(String);

impl CandidateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key of the mirror node shown in the sidebar for this candidate.
    pub fn mirror_key(&self) -> MirrorKey {
        MirrorKey(format!("{}{}", MIRROR_PREFIX, self.0))
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CandidateId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CandidateId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Key of a mirror node (`"mirror-" + candidate id`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MirrorKey(String);

impl MirrorKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Recover the candidate a mirror key was derived from.
    pub fn candidate(&self) -> Option<CandidateId> {
        self.0.strip_prefix(MIRROR_PREFIX).map(CandidateId::new)
    }
}

impl fmt::Display for MirrorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
