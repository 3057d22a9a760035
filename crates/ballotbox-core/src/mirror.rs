//! Sidebar mirror of the current selection.

use crate::candidate::{CandidateId, MirrorKey};
use crate::selection::SelectionStore;
use crate::surface::BallotSurface;

/// One mirrored thumbnail in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorEntry {
    pub candidate: CandidateId,
    pub key: MirrorKey,
}

/// Keeps one sidebar thumbnail per selected candidate, in selection order.
#[derive(Debug, Clone, Default)]
pub struct SidebarMirror {
    entries: Vec<MirrorEntry>,
}

impl SidebarMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a mirror for a newly accepted candidate. Does nothing if the
    /// candidate is already mirrored.
    pub fn mount(&mut self, surface: &mut impl BallotSurface, id: &CandidateId) {
        if self.contains(id) {
            return;
        }
        let key = id.mirror_key();
        surface.mount_mirror(id, &key);
        self.entries.push(MirrorEntry {
            candidate: id.clone(),
            key,
        });
    }

    /// Remove the mirror of a candidate. Returns whether one existed.
    pub fn unmount(&mut self, surface: &mut impl BallotSurface, id: &CandidateId) -> bool {
        let Some(index) = self.entries.iter().position(|e| &e.candidate == id) else {
            return false;
        };
        let entry = self.entries.remove(index);
        surface.unmount_mirror(&entry.key);
        true
    }

    pub fn contains(&self, id: &CandidateId) -> bool {
        self.entries.iter().any(|e| &e.candidate == id)
    }

    pub fn entries(&self) -> &[MirrorEntry] {
        &self.entries
    }

    pub fn keys(&self) -> impl Iterator<Item = &MirrorKey> {
        self.entries.iter().map(|e| &e.key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the mirrored candidates are exactly the selected ones, in order.
    pub fn matches(&self, store: &SelectionStore) -> bool {
        self.entries
            .iter()
            .map(|e| &e.candidate)
            .eq(store.current_ids().iter())
    }
}
