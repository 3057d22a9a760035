//! Enables or disables controls according to the selection count.

use crate::config::VoteLimit;
use crate::selection::SelectionStore;
use crate::surface::BallotSurface;

/// Snapshot of the selection count against the limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateStatus {
    pub count: usize,
    pub limit: VoteLimit,
}

impl GateStatus {
    pub fn of(store: &SelectionStore) -> Self {
        Self {
            count: store.len(),
            limit: store.limit(),
        }
    }

    pub fn at_limit(&self) -> bool {
        self.count == self.limit.get()
    }
}

/// Limit gate.
///
/// Every call recomputes the whole visual state from the store rather than
/// flipping what changed, so a surface left inconsistent by anything else is
/// corrected on the next mutation.
pub struct LimitGate;

impl LimitGate {
    /// Bring every control and the at-limit marker in line with the store.
    ///
    /// At the limit, unselected controls are disabled and selected ones stay
    /// enabled so they can still be unchecked. Below it, everything is enabled.
    pub fn apply(store: &SelectionStore, surface: &mut impl BallotSurface) -> GateStatus {
        let status = GateStatus::of(store);
        let at_limit = status.at_limit();
        for id in surface.candidates() {
            let enabled = !at_limit || store.contains(&id);
            surface.set_enabled(&id, enabled);
        }
        surface.set_limit_marker(at_limit);
        status
    }
}
