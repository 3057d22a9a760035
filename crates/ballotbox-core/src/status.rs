//! Status line announcing the selection count.

use crate::gate::GateStatus;
use crate::surface::BallotSurface;

/// Appended to the status line once the limit is reached.
pub const AT_LIMIT_SUFFIX: &str = " -- You have reached the maximum number of votes you can cast.";

pub struct StatusAnnouncer;

impl StatusAnnouncer {
    /// Format the status line, e.g. `"1 of 2"`.
    pub fn message(status: GateStatus) -> String {
        let mut text = format!("{} of {}", status.count, status.limit);
        if status.at_limit() {
            text.push_str(AT_LIMIT_SUFFIX);
        }
        text
    }

    /// Write the status line to the surface.
    pub fn announce(status: GateStatus, surface: &mut impl BallotSurface) {
        surface.set_status(&Self::message(status));
    }
}
