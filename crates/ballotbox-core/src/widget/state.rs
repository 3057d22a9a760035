//! Widget lifecycle phases.

/// Initialization phase of a widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WidgetPhase {
    /// Constructed, controls not yet scanned.
    #[default]
    Idle,
    /// Replaying controls that were already checked on load.
    ReplayingPreselected,
    /// Accepting live interaction.
    Ready,
}

impl WidgetPhase {
    /// Check if live events are being handled.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}
