//! In-memory surface implementation.

use super::BallotSurface;
use crate::candidate::{CandidateId, MirrorKey};
use crate::widget::BallotEvent;

/// State of one control on a [`MemorySurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryControl {
    pub id: CandidateId,
    pub checked: bool,
    pub enabled: bool,
}

/// In-memory surface for testing and headless session replay.
///
/// Besides implementing [`BallotSurface`], it can simulate the user: toggling
/// a control or clicking a mirror yields the event a browser would deliver.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    /// Controls in document order.
    controls: Vec<MemoryControl>,
    /// Mirror nodes in the sidebar, left to right.
    mirrors: Vec<MirrorKey>,
    has_sidebar: bool,
    limit_marker: bool,
    status: String,
}

impl MemorySurface {
    /// Create a surface with unchecked, enabled controls.
    pub fn new<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<CandidateId>,
    {
        Self {
            controls: ids
                .into_iter()
                .map(|id| MemoryControl {
                    id: id.into(),
                    checked: false,
                    enabled: true,
                })
                .collect(),
            mirrors: Vec::new(),
            has_sidebar: true,
            limit_marker: false,
            status: String::new(),
        }
    }

    /// Mark controls as already checked, as after a soft refresh.
    pub fn with_preselected<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<CandidateId>,
    {
        for id in ids {
            let id = id.into();
            if let Some(control) = self.control_mut(&id) {
                control.checked = true;
            }
        }
        self
    }

    /// Drop the sidebar region, as on a page missing that element.
    pub fn without_sidebar(mut self) -> Self {
        self.has_sidebar = false;
        self
    }

    pub fn control(&self, id: &CandidateId) -> Option<&MemoryControl> {
        self.controls.iter().find(|c| &c.id == id)
    }

    fn control_mut(&mut self, id: &CandidateId) -> Option<&mut MemoryControl> {
        self.controls.iter_mut().find(|c| &c.id == id)
    }

    pub fn controls(&self) -> &[MemoryControl] {
        &self.controls
    }

    pub fn mirrors(&self) -> &[MirrorKey] {
        &self.mirrors
    }

    pub fn limit_marker(&self) -> bool {
        self.limit_marker
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Simulate a click on a control.
    ///
    /// Disabled or unknown controls ignore the click and yield no event.
    pub fn click(&mut self, id: &CandidateId) -> Option<BallotEvent> {
        let control = self.control_mut(id)?;
        if !control.enabled {
            return None;
        }
        control.checked = !control.checked;
        Some(BallotEvent::Toggled {
            id: control.id.clone(),
            checked: control.checked,
        })
    }

    /// Force a control into the checked state regardless of whether it is
    /// enabled, the way autofill or a restored page can.
    pub fn force_check(&mut self, id: &CandidateId) -> Option<BallotEvent> {
        let control = self.control_mut(id)?;
        control.checked = true;
        Some(BallotEvent::Toggled {
            id: control.id.clone(),
            checked: true,
        })
    }

    /// Simulate a click on a sidebar mirror.
    pub fn click_mirror(&self, key: &MirrorKey) -> Option<BallotEvent> {
        if !self.mirrors.contains(key) {
            return None;
        }
        key.candidate().map(|id| BallotEvent::MirrorActivated { id })
    }
}

impl BallotSurface for MemorySurface {
    fn candidates(&self) -> Vec<CandidateId> {
        self.controls.iter().map(|c| c.id.clone()).collect()
    }

    fn is_checked(&self, id: &CandidateId) -> bool {
        self.control(id).is_some_and(|c| c.checked)
    }

    fn set_checked(&mut self, id: &CandidateId, checked: bool) {
        if let Some(control) = self.control_mut(id) {
            control.checked = checked;
        }
    }

    fn is_enabled(&self, id: &CandidateId) -> bool {
        self.control(id).is_some_and(|c| c.enabled)
    }

    fn set_enabled(&mut self, id: &CandidateId, enabled: bool) {
        if let Some(control) = self.control_mut(id) {
            control.enabled = enabled;
        }
    }

    fn set_limit_marker(&mut self, at_limit: bool) {
        self.limit_marker = at_limit;
    }

    fn mount_mirror(&mut self, id: &CandidateId, key: &MirrorKey) {
        if !self.has_sidebar {
            log::warn!("No sidebar region, mirror for {} not shown", id);
            return;
        }
        if !self.mirrors.contains(key) {
            self.mirrors.push(key.clone());
        }
    }

    fn unmount_mirror(&mut self, key: &MirrorKey) {
        self.mirrors.retain(|k| k != key);
    }

    fn set_status(&mut self, text: &str) {
        self.status.clear();
        self.status.push_str(text);
    }
}
