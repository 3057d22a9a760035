//! User interaction events.

use crate::candidate::CandidateId;
use serde::{Deserialize, Serialize};

/// Events delivered to the widget by a surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BallotEvent {
    /// A selection control changed state.
    Toggled { id: CandidateId, checked: bool },
    /// The sidebar mirror of a candidate was clicked.
    MirrorActivated { id: CandidateId },
}

impl BallotEvent {
    /// Candidate the event refers to.
    pub fn candidate(&self) -> &CandidateId {
        match self {
            BallotEvent::Toggled { id, .. } | BallotEvent::MirrorActivated { id } => id,
        }
    }
}
