//! Widget configuration: the selection limit and the markup contract.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid ballot configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Selection limit must be positive")]
    ZeroLimit,
    #[error("No votes remaining: {votes_cast} of {n_choice} already cast")]
    NoVotesRemaining { n_choice: usize, votes_cast: usize },
}

/// Maximum number of simultaneously selected candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoteLimit(NonZeroUsize);

impl VoteLimit {
    /// Create a limit, rejecting zero.
    pub fn new(limit: usize) -> Result<Self, ConfigError> {
        NonZeroUsize::new(limit)
            .map(Self)
            .ok_or(ConfigError::ZeroLimit)
    }

    /// Votes still available in an election allowing `n_choice` choices when
    /// `votes_cast` of them were already recorded for this voter.
    pub fn remaining(n_choice: usize, votes_cast: usize) -> Result<Self, ConfigError> {
        n_choice
            .checked_sub(votes_cast)
            .and_then(NonZeroUsize::new)
            .map(Self)
            .ok_or(ConfigError::NoVotesRemaining {
                n_choice,
                votes_cast,
            })
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl fmt::Display for VoteLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where the selection limit comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LimitSource {
    /// A limit given directly by the page.
    Fixed { limit: usize },
    /// The election's number of choices, less the votes already cast.
    Election {
        n_choice: usize,
        #[serde(default)]
        votes_cast: usize,
    },
}

impl LimitSource {
    pub fn resolve(&self) -> Result<VoteLimit, ConfigError> {
        match *self {
            LimitSource::Fixed { limit } => VoteLimit::new(limit),
            LimitSource::Election {
                n_choice,
                votes_cast,
            } => VoteLimit::remaining(n_choice, votes_cast),
        }
    }
}

/// Selectors and class names the page markup is rendered with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupConfig {
    /// CSS selector matching every selection control.
    pub control_selector: String,
    /// Element id of the sidebar region receiving mirrors.
    pub sidebar_id: String,
    /// Element id of the status line.
    pub status_id: String,
    /// Class of the thumbnail inside a control's label.
    pub thumbnail_class: String,
    /// Classes of decorative elements that get the at-limit marker.
    pub decorative_classes: Vec<String>,
    /// Marker class applied while at the limit.
    pub limit_class: String,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            control_selector: "input[type=checkbox]".to_string(),
            sidebar_id: "sideimages".to_string(),
            status_id: "fix_info".to_string(),
            thumbnail_class: "smallthumb".to_string(),
            decorative_classes: vec!["hoveroverlay".to_string(), "resizelink".to_string()],
            limit_class: "limit".to_string(),
        }
    }
}

/// Full widget configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotConfig {
    #[serde(flatten)]
    pub limit: LimitSource,
    #[serde(default)]
    pub markup: MarkupConfig,
}

impl BallotConfig {
    /// Configuration with a fixed limit and the default markup.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: LimitSource::Fixed { limit },
            markup: MarkupConfig::default(),
        }
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.vote_limit()?;
        Ok(config)
    }

    /// The effective selection limit.
    pub fn vote_limit(&self) -> Result<VoteLimit, ConfigError> {
        self.limit.resolve()
    }
}
