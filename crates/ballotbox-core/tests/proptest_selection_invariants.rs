//! Property-based invariant tests for the ballot widget.
//!
//! Verifies, after every event of an arbitrary interaction sequence:
//! 1. The selection never exceeds the limit
//! 2. Sidebar mirrors equal the selection exactly, in order, without duplicates
//! 3. Checked controls are exactly the selected ones
//! 4. Controls are disabled iff at the limit and unselected
//! 5. The status line matches the selection count
//! 6. Replay of an arbitrary restored page keeps the first `limit` checked
//!    controls in document order

use ballotbox_core::{
    AT_LIMIT_SUFFIX, BallotConfig, BallotEvent, BallotSurface, BallotWidget, CandidateId,
    MemorySurface,
};
use proptest::prelude::*;

const CANDIDATES: [&str; 6] = ["a", "b", "c", "d", "e", "f"];

#[derive(Debug, Clone)]
enum Action {
    Click(usize),
    ForceCheck(usize),
    ClickMirror(usize),
}

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_action() -> impl Strategy<Value = Action> {
    let index = 0..CANDIDATES.len();
    prop_oneof![
        index.clone().prop_map(Action::Click),
        index.clone().prop_map(Action::ForceCheck),
        index.prop_map(Action::ClickMirror),
    ]
}

fn arb_preselected() -> impl Strategy<Value = Vec<bool>> {
    proptest::collection::vec(any::<bool>(), CANDIDATES.len())
}

fn build(limit: usize, preselected: &[bool]) -> BallotWidget<MemorySurface> {
    let checked = CANDIDATES
        .iter()
        .zip(preselected)
        .filter(|(_, checked)| **checked)
        .map(|(id, _)| *id);
    let surface = MemorySurface::new(CANDIDATES).with_preselected(checked);
    let mut widget = BallotWidget::new(BallotConfig::with_limit(limit), surface).unwrap();
    widget.initialize();
    widget
}

fn perform(widget: &mut BallotWidget<MemorySurface>, action: &Action) {
    let event = match *action {
        Action::Click(i) => widget.surface_mut().click(&CANDIDATES[i].into()),
        Action::ForceCheck(i) => widget.surface_mut().force_check(&CANDIDATES[i].into()),
        Action::ClickMirror(i) => {
            let key = CandidateId::new(CANDIDATES[i]).mirror_key();
            widget.surface().click_mirror(&key)
        }
    };
    if let Some(event) = event {
        widget.handle(event);
    }
}

fn assert_consistent(widget: &BallotWidget<MemorySurface>) -> Result<(), TestCaseError> {
    let limit = widget.store().limit().get();
    let selection = widget.selection();
    let surface = widget.surface();

    prop_assert!(selection.len() <= limit);

    let expected_keys: Vec<_> = selection.iter().map(|id| id.mirror_key()).collect();
    prop_assert_eq!(surface.mirrors(), expected_keys.as_slice());
    prop_assert!(widget.mirror().matches(widget.store()));
    let tracked: Vec<_> = widget.mirror().keys().cloned().collect();
    prop_assert_eq!(tracked, expected_keys);

    let at_limit = selection.len() == limit;
    for control in surface.controls() {
        let selected = selection.contains(&control.id);
        prop_assert_eq!(control.checked, selected, "checked state of {}", control.id);
        prop_assert_eq!(control.enabled, !at_limit || selected, "enabled state of {}", control.id);
    }
    prop_assert_eq!(surface.limit_marker(), at_limit);

    let mut status = format!("{} of {}", selection.len(), limit);
    if at_limit {
        status.push_str(AT_LIMIT_SUFFIX);
    }
    prop_assert_eq!(surface.status(), status.as_str());
    Ok(())
}

proptest! {
    #[test]
    fn invariants_hold_after_every_event(
        limit in 1usize..=4,
        preselected in arb_preselected(),
        actions in proptest::collection::vec(arb_action(), 0..40),
    ) {
        let mut widget = build(limit, &preselected);
        assert_consistent(&widget)?;
        for action in &actions {
            perform(&mut widget, action);
            assert_consistent(&widget)?;
        }
    }

    #[test]
    fn replay_keeps_first_checked_in_document_order(
        limit in 1usize..=4,
        preselected in arb_preselected(),
    ) {
        let widget = build(limit, &preselected);
        let expected: Vec<CandidateId> = CANDIDATES
            .iter()
            .zip(&preselected)
            .filter(|(_, checked)| **checked)
            .map(|(id, _)| CandidateId::new(*id))
            .take(limit)
            .collect();
        prop_assert_eq!(widget.selection(), expected.as_slice());
        assert_consistent(&widget)?;
    }

    #[test]
    fn mirror_removal_of_unselected_is_noop(
        limit in 1usize..=4,
        preselected in arb_preselected(),
        target in 0..CANDIDATES.len(),
    ) {
        let mut widget = build(limit, &preselected);
        let id = CandidateId::new(CANDIDATES[target]);
        prop_assume!(!widget.selection().contains(&id));

        let before = widget.surface().clone();
        widget.handle(BallotEvent::MirrorActivated { id: id.clone() });
        prop_assert_eq!(widget.surface().controls(), before.controls());
        prop_assert_eq!(widget.surface().mirrors(), before.mirrors());
        prop_assert_eq!(widget.surface().status(), before.status());
        prop_assert!(!widget.surface().is_checked(&id));
    }
}
