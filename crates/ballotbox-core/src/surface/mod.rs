//! Rendering surface abstraction.
//!
//! The widget never touches markup directly. Everything visual goes through
//! [`BallotSurface`]: the browser shell implements it over the DOM, and
//! [`MemorySurface`] implements it in memory for tests and session replays.

mod memory;

pub use memory::{MemoryControl, MemorySurface};

use crate::candidate::{CandidateId, MirrorKey};

/// The selectable-element capability the widget drives.
///
/// Implementations must tolerate unknown ids and missing regions by doing
/// nothing; the widget does not treat those as errors.
pub trait BallotSurface {
    /// Every candidate control, in document order.
    fn candidates(&self) -> Vec<CandidateId>;

    /// Whether the control currently shows as selected.
    fn is_checked(&self, id: &CandidateId) -> bool;

    /// Set the selected visual state of a control.
    fn set_checked(&mut self, id: &CandidateId, checked: bool);

    /// Whether the control accepts user interaction.
    fn is_enabled(&self, id: &CandidateId) -> bool;

    /// Enable or disable a control.
    fn set_enabled(&mut self, id: &CandidateId, enabled: bool);

    /// Apply or clear the at-limit marker on the decorative elements.
    fn set_limit_marker(&mut self, at_limit: bool);

    /// Clone the candidate's thumbnail into the sidebar under `key`, with a
    /// removal affordance that reports `BallotEvent::MirrorActivated`.
    ///
    /// [`BallotEvent::MirrorActivated`]: crate::widget::BallotEvent::MirrorActivated
    fn mount_mirror(&mut self, id: &CandidateId, key: &MirrorKey);

    /// Remove the mirror node stored under `key`, if any.
    fn unmount_mirror(&mut self, key: &MirrorKey);

    /// Replace the status line text.
    fn set_status(&mut self, text: &str);
}
