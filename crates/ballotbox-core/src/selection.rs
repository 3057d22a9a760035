//! Authoritative record of the selected candidates.

use crate::candidate::CandidateId;
use crate::config::VoteLimit;
use thiserror::Error;

/// Reasons a selection can be refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Selection limit of {limit} reached")]
    AtLimit { limit: VoteLimit },
}

/// Insertion-ordered set of selected candidates, never larger than the limit.
#[derive(Debug, Clone)]
pub struct SelectionStore {
    limit: VoteLimit,
    /// Selected ids, oldest first. Small enough that a linear scan wins.
    selected: Vec<CandidateId>,
}

impl SelectionStore {
    pub fn new(limit: VoteLimit) -> Self {
        Self {
            limit,
            selected: Vec::with_capacity(limit.get()),
        }
    }

    /// Add a candidate unless the limit is already reached.
    ///
    /// Selecting a candidate that is already selected succeeds and leaves the
    /// set unchanged.
    pub fn try_select(&mut self, id: &CandidateId) -> Result<(), SelectionError> {
        if self.contains(id) {
            return Ok(());
        }
        if self.is_at_limit() {
            return Err(SelectionError::AtLimit { limit: self.limit });
        }
        self.selected.push(id.clone());
        Ok(())
    }

    /// Remove a candidate. Returns whether it was selected.
    pub fn deselect(&mut self, id: &CandidateId) -> bool {
        match self.selected.iter().position(|s| s == id) {
            Some(index) => {
                self.selected.remove(index);
                true
            }
            None => false,
        }
    }

    /// Selected ids in the order they were selected.
    pub fn current_ids(&self) -> &[CandidateId] {
        &self.selected
    }

    pub fn contains(&self, id: &CandidateId) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn limit(&self) -> VoteLimit {
        self.limit
    }

    pub fn is_at_limit(&self) -> bool {
        self.selected.len() >= self.limit.get()
    }
}
