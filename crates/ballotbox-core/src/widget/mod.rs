//! The composed voting widget.
//!
//! This module wires the selection store, sidebar mirror, limit gate and
//! status line into a single event-driven widget:
//! - A one-time replay of controls already checked when the page loads
//! - Live handling of control toggles and mirror clicks
//!
//! Every handler runs to completion and leaves the mirror equal to the
//! selection before returning.

mod event;
mod manager;
mod state;

pub use event::BallotEvent;
pub use manager::BallotWidget;
pub use state::WidgetPhase;
