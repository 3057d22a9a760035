//! Headless replay of recorded ballot sessions.
//!
//! A session describes a page (configuration, candidates and which of them
//! were restored checked) and the user actions taken on it. Replaying it
//! against a [`MemorySurface`] yields the status line after every step.

use crate::error::AppError;
use ballotbox_core::{
    BallotConfig, BallotWidget, CandidateId, GateStatus, MemorySurface, StatusAnnouncer,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// A candidate on the recorded page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCandidate {
    pub id: CandidateId,
    /// Control was already checked when the page loaded.
    #[serde(default)]
    pub preselected: bool,
}

/// A user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SessionAction {
    /// Click a selection control.
    Click { id: CandidateId },
    /// Force a control checked, bypassing its disabled state.
    ForceCheck { id: CandidateId },
    /// Click the sidebar mirror of a candidate.
    ClickMirror { id: CandidateId },
}

impl fmt::Display for SessionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionAction::Click { id } => write!(f, "click {}", id),
            SessionAction::ForceCheck { id } => write!(f, "force-check {}", id),
            SessionAction::ClickMirror { id } => write!(f, "click mirror of {}", id),
        }
    }
}

/// A recorded session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub config: BallotConfig,
    pub candidates: Vec<SessionCandidate>,
    #[serde(default)]
    pub actions: Vec<SessionAction>,
}

/// What became of one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The widget handled the resulting event.
    Handled(GateStatus),
    /// No event reached the widget (disabled control, missing mirror).
    Ignored,
}

/// One replayed action and the status line after it.
#[derive(Debug, Clone)]
pub struct Step {
    pub action: SessionAction,
    pub outcome: Outcome,
    pub status: String,
    pub selection: Vec<CandidateId>,
}

/// Result of replaying a session.
#[derive(Debug, Clone)]
pub struct Transcript {
    /// Status line right after initialization.
    pub initial_status: String,
    /// Selection restored by the initialization replay.
    pub restored: Vec<CandidateId>,
    pub steps: Vec<Step>,
}

impl Transcript {
    pub fn final_status(&self) -> &str {
        self.steps
            .last()
            .map(|s| s.status.as_str())
            .unwrap_or(&self.initial_status)
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "load: {}", self.initial_status)?;
        for step in &self.steps {
            match step.outcome {
                Outcome::Handled(_) => writeln!(f, "{}: {}", step.action, step.status)?,
                Outcome::Ignored => writeln!(f, "{}: ignored", step.action)?,
            }
        }
        Ok(())
    }
}

impl Session {
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Replay the session on a fresh in-memory page.
    pub fn run(&self) -> Result<Transcript, AppError> {
        let surface = MemorySurface::new(self.candidates.iter().map(|c| c.id.clone()))
            .with_preselected(
                self.candidates
                    .iter()
                    .filter(|c| c.preselected)
                    .map(|c| c.id.clone()),
            );
        let mut widget = BallotWidget::new(self.config.clone(), surface)?;

        let initial_status = StatusAnnouncer::message(widget.initialize());
        let restored = widget.selection().to_vec();
        log::info!(
            "Replaying {} actions over {} candidates",
            self.actions.len(),
            self.candidates.len()
        );

        let steps = self
            .actions
            .iter()
            .map(|action| {
                let outcome = match perform(&mut widget, action) {
                    Some(status) => Outcome::Handled(status),
                    None => Outcome::Ignored,
                };
                Step {
                    action: action.clone(),
                    outcome,
                    status: widget.surface().status().to_string(),
                    selection: widget.selection().to_vec(),
                }
            })
            .collect();

        Ok(Transcript {
            initial_status,
            restored,
            steps,
        })
    }
}

fn perform(widget: &mut BallotWidget<MemorySurface>, action: &SessionAction) -> Option<GateStatus> {
    let event = match action {
        SessionAction::Click { id } => widget.surface_mut().click(id),
        SessionAction::ForceCheck { id } => widget.surface_mut().force_check(id),
        SessionAction::ClickMirror { id } => widget.surface().click_mirror(&id.mirror_key()),
    }?;
    widget.handle(event)
}
