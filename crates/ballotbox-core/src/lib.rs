//! Ballotbox Core Library
//!
//! Platform-agnostic selection logic for the ballotbox voting widget: the
//! selection set and its limit, the sidebar mirror, the limit gate and the
//! status line. Rendering surfaces plug in through [`BallotSurface`].

pub mod candidate;
pub mod config;
pub mod gate;
pub mod mirror;
pub mod selection;
pub mod status;
pub mod surface;
pub mod widget;

pub use candidate::{CandidateId, MirrorKey};
pub use config::{BallotConfig, ConfigError, LimitSource, MarkupConfig, VoteLimit};
pub use gate::{GateStatus, LimitGate};
pub use mirror::{MirrorEntry, SidebarMirror};
pub use selection::{SelectionError, SelectionStore};
pub use status::{AT_LIMIT_SUFFIX, StatusAnnouncer};
pub use surface::{BallotSurface, MemorySurface};
pub use widget::{BallotEvent, BallotWidget, WidgetPhase};
