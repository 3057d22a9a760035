//! Ballotbox Application
//!
//! Shell around the core widget: the browser entry point binding it to the
//! page, and a headless runner replaying recorded sessions.

mod error;
pub mod page;
mod session;

pub use error::AppError;
pub use session::{Outcome, Session, SessionAction, SessionCandidate, Step, Transcript};

#[cfg(target_arch = "wasm32")]
mod dom;

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{current_selection, run_wasm};
