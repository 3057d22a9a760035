//! Widget composing selection, mirror, gate and status line.

use super::event::BallotEvent;
use super::state::WidgetPhase;
use crate::candidate::CandidateId;
use crate::config::{BallotConfig, ConfigError};
use crate::gate::{GateStatus, LimitGate};
use crate::mirror::SidebarMirror;
use crate::selection::SelectionStore;
use crate::status::StatusAnnouncer;
use crate::surface::BallotSurface;

/// A voting widget driving a [`BallotSurface`].
///
/// Owns the selection and the surface. Nothing happens until
/// [`initialize`](Self::initialize) has replayed the page's restored state;
/// afterwards each [`handle`](Self::handle) call is one complete interaction.
#[derive(Debug)]
pub struct BallotWidget<S: BallotSurface> {
    config: BallotConfig,
    store: SelectionStore,
    mirror: SidebarMirror,
    surface: S,
    phase: WidgetPhase,
}

impl<S: BallotSurface> BallotWidget<S> {
    /// Create a widget, resolving the selection limit from `config`.
    pub fn new(config: BallotConfig, surface: S) -> Result<Self, ConfigError> {
        let limit = config.vote_limit()?;
        Ok(Self {
            config,
            store: SelectionStore::new(limit),
            mirror: SidebarMirror::new(),
            surface,
            phase: WidgetPhase::Idle,
        })
    }

    /// Replay controls that were already checked when the page loaded, then
    /// compute the gate and status once.
    ///
    /// Checked controls are taken in document order; those past the limit are
    /// unchecked. Only the first call does anything.
    pub fn initialize(&mut self) -> GateStatus {
        if self.phase != WidgetPhase::Idle {
            log::warn!("Ballot widget already initialized");
            return GateStatus::of(&self.store);
        }

        self.phase = WidgetPhase::ReplayingPreselected;
        let preselected: Vec<CandidateId> = self
            .surface
            .candidates()
            .into_iter()
            .filter(|id| self.surface.is_checked(id))
            .collect();
        let restored = preselected.iter().filter(|id| self.select(id)).count();
        if !preselected.is_empty() {
            log::info!(
                "Restored {} of {} preselected candidates",
                restored,
                preselected.len()
            );
        }

        self.phase = WidgetPhase::Ready;
        self.refresh()
    }

    /// Handle one interaction event.
    ///
    /// Returns the resulting gate status, or `None` if the event was dropped
    /// (widget not ready, or unknown candidate).
    pub fn handle(&mut self, event: BallotEvent) -> Option<GateStatus> {
        if !self.phase.is_ready() {
            log::warn!("Dropping {:?} received before initialization", event);
            return None;
        }
        if !self.surface.candidates().contains(event.candidate()) {
            log::warn!("Dropping event for unknown candidate {}", event.candidate());
            return None;
        }

        match event {
            BallotEvent::Toggled { id, checked: true } => {
                self.select(&id);
            }
            BallotEvent::Toggled { id, checked: false } | BallotEvent::MirrorActivated { id } => {
                self.deselect(&id);
            }
        }
        Some(self.refresh())
    }

    /// Shared selection path for replay and live toggles.
    fn select(&mut self, id: &CandidateId) -> bool {
        match self.store.try_select(id) {
            Ok(()) => {
                self.mirror.mount(&mut self.surface, id);
                log::debug!("Selected {}", id);
                true
            }
            Err(err) => {
                // The control may have been forced checked; put it back.
                self.surface.set_checked(id, false);
                log::debug!("Rejected {}: {}", id, err);
                false
            }
        }
    }

    /// Shared removal path for unchecking a control and clicking its mirror.
    fn deselect(&mut self, id: &CandidateId) {
        if self.store.deselect(id) {
            log::debug!("Deselected {}", id);
        }
        self.mirror.unmount(&mut self.surface, id);
        self.surface.set_checked(id, false);
    }

    fn refresh(&mut self) -> GateStatus {
        debug_assert!(self.mirror.matches(&self.store));
        let status = LimitGate::apply(&self.store, &mut self.surface);
        StatusAnnouncer::announce(status, &mut self.surface);
        status
    }

    pub fn phase(&self) -> WidgetPhase {
        self.phase
    }

    pub fn config(&self) -> &BallotConfig {
        &self.config
    }

    /// Selected candidates in selection order.
    pub fn selection(&self) -> &[CandidateId] {
        self.store.current_ids()
    }

    pub fn store(&self) -> &SelectionStore {
        &self.store
    }

    pub fn mirror(&self) -> &SidebarMirror {
        &self.mirror
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn status(&self) -> GateStatus {
        GateStatus::of(&self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::AT_LIMIT_SUFFIX;
    use crate::surface::MemorySurface;

    fn widget(limit: usize, surface: MemorySurface) -> BallotWidget<MemorySurface> {
        let mut widget = BallotWidget::new(BallotConfig::with_limit(limit), surface).unwrap();
        widget.initialize();
        widget
    }

    fn click(widget: &mut BallotWidget<MemorySurface>, id: &str) -> Option<GateStatus> {
        let event = widget.surface_mut().click(&id.into())?;
        widget.handle(event)
    }

    fn ids(widget: &BallotWidget<MemorySurface>) -> Vec<&str> {
        widget.selection().iter().map(|id| id.as_str()).collect()
    }

    #[test]
    fn test_new_rejects_zero_limit() {
        let result = BallotWidget::new(BallotConfig::with_limit(0), MemorySurface::new(["a"]));
        assert!(matches!(result, Err(ConfigError::ZeroLimit)));
    }

    #[test]
    fn test_initial_status() {
        let widget = widget(2, MemorySurface::new(["a", "b"]));
        assert_eq!(widget.phase(), WidgetPhase::Ready);
        assert_eq!(widget.surface().status(), "0 of 2");
        assert!(!widget.surface().limit_marker());
    }

    #[test]
    fn test_limit_two_walkthrough() {
        let mut widget = widget(2, MemorySurface::new(["A", "B", "C", "D"]));

        click(&mut widget, "A");
        assert_eq!(widget.surface().status(), "1 of 2");

        click(&mut widget, "B");
        assert_eq!(
            widget.surface().status(),
            format!("2 of 2{}", AT_LIMIT_SUFFIX)
        );
        assert!(widget.surface().limit_marker());
        assert!(!widget.surface().is_enabled(&"C".into()));
        assert!(!widget.surface().is_enabled(&"D".into()));
        assert!(widget.surface().is_enabled(&"A".into()));

        // Disabled: the click never reaches the widget.
        assert_eq!(click(&mut widget, "C"), None);
        // Forced checked anyway: rejected and reverted.
        let forced = widget.surface_mut().force_check(&"C".into()).unwrap();
        let status = widget.handle(forced).unwrap();
        assert!(status.at_limit());
        assert!(!widget.surface().is_checked(&"C".into()));
        assert_eq!(ids(&widget), vec!["A", "B"]);
        assert_eq!(
            widget.surface().status(),
            format!("2 of 2{}", AT_LIMIT_SUFFIX)
        );

        let key = CandidateId::new("A").mirror_key();
        let event = widget.surface().click_mirror(&key).unwrap();
        widget.handle(event);
        assert_eq!(widget.surface().status(), "1 of 2");
        assert!(widget.surface().is_enabled(&"C".into()));
        assert!(widget.surface().is_enabled(&"D".into()));
        assert!(!widget.surface().limit_marker());
        assert!(!widget.surface().is_checked(&"A".into()));
        assert_eq!(widget.surface().mirrors(), &[CandidateId::new("B").mirror_key()]);
        assert_eq!(ids(&widget), vec!["B"]);
    }

    #[test]
    fn test_uncheck_control_matches_mirror_removal() {
        let surface = MemorySurface::new(["A", "B", "C"]);
        let mut via_control = widget(2, surface.clone());
        let mut via_mirror = widget(2, surface);

        for widget in [&mut via_control, &mut via_mirror] {
            click(widget, "A");
            click(widget, "B");
        }
        click(&mut via_control, "A");
        let event = via_mirror
            .surface()
            .click_mirror(&CandidateId::new("A").mirror_key())
            .unwrap();
        via_mirror.handle(event);

        assert_eq!(via_control.surface().controls(), via_mirror.surface().controls());
        assert_eq!(via_control.surface().mirrors(), via_mirror.surface().mirrors());
        assert_eq!(via_control.surface().status(), via_mirror.surface().status());
        assert_eq!(via_control.selection(), via_mirror.selection());
    }

    #[test]
    fn test_replay_preselected_over_limit() {
        let surface = MemorySurface::new(["A", "B", "C", "D"]).with_preselected(["C", "A", "B"]);
        let widget = widget(2, surface);

        // Document order wins, not the order they were marked.
        assert_eq!(ids(&widget), vec!["A", "B"]);
        assert!(!widget.surface().is_checked(&"C".into()));
        assert_eq!(
            widget.surface().mirrors(),
            &[
                CandidateId::new("A").mirror_key(),
                CandidateId::new("B").mirror_key()
            ]
        );
        assert_eq!(
            widget.surface().status(),
            format!("2 of 2{}", AT_LIMIT_SUFFIX)
        );
        assert!(!widget.surface().is_enabled(&"C".into()));
    }

    #[test]
    fn test_initialize_twice_is_noop() {
        let surface = MemorySurface::new(["A", "B"]).with_preselected(["A"]);
        let mut widget = widget(2, surface);
        widget.surface_mut().force_check(&"B".into());

        let status = widget.initialize();
        assert_eq!(status.count, 1);
        assert_eq!(ids(&widget), vec!["A"]);
    }

    #[test]
    fn test_events_before_ready_dropped() {
        let mut widget =
            BallotWidget::new(BallotConfig::with_limit(1), MemorySurface::new(["A"])).unwrap();
        let event = widget.surface_mut().click(&"A".into()).unwrap();
        assert_eq!(widget.handle(event), None);
        assert!(widget.selection().is_empty());
    }

    #[test]
    fn test_unknown_candidate_ignored() {
        let mut widget = widget(1, MemorySurface::new(["A"]));
        let event = BallotEvent::Toggled {
            id: "ghost".into(),
            checked: true,
        };
        assert_eq!(widget.handle(event), None);
        assert!(widget.selection().is_empty());
    }

    #[test]
    fn test_limit_one_reselect_after_deselect() {
        let mut widget = widget(1, MemorySurface::new(["A", "B"]));
        click(&mut widget, "A");
        click(&mut widget, "A");
        assert_eq!(widget.surface().status(), "0 of 1");
        assert!(widget.surface().is_enabled(&"B".into()));

        click(&mut widget, "B");
        assert_eq!(widget.surface().mirrors(), &[CandidateId::new("B").mirror_key()]);
        assert_eq!(ids(&widget), vec!["B"]);
    }

    #[test]
    fn test_deselect_unselected_is_noop() {
        let mut widget = widget(2, MemorySurface::new(["A", "B"]));
        click(&mut widget, "A");
        let before = widget.surface().clone();

        let status = widget
            .handle(BallotEvent::MirrorActivated { id: "B".into() })
            .unwrap();
        assert_eq!(status.count, 1);
        assert_eq!(widget.surface().controls(), before.controls());
        assert_eq!(widget.surface().mirrors(), before.mirrors());
        assert_eq!(widget.surface().status(), before.status());
    }

    #[test]
    fn test_missing_sidebar_still_tracks_selection() {
        let mut widget = widget(1, MemorySurface::new(["A", "B"]).without_sidebar());
        click(&mut widget, "A");
        assert_eq!(ids(&widget), vec!["A"]);
        assert_eq!(widget.mirror().len(), 1);
        assert!(widget.surface().mirrors().is_empty());
        assert!(!widget.surface().is_enabled(&"B".into()));
    }

    #[test]
    fn test_election_limit() {
        let config = BallotConfig::from_json(r#"{"n_choice": 3, "votes_cast": 2}"#).unwrap();
        let mut widget = BallotWidget::new(config, MemorySurface::new(["A", "B"])).unwrap();
        widget.initialize();
        assert_eq!(
            widget.config().vote_limit().unwrap(),
            widget.store().limit()
        );
        assert_eq!(widget.surface().status(), "0 of 1");
        click(&mut widget, "B");
        assert!(widget.status().at_limit());
    }
}
