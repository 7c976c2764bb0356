//! Errors reported by the reel crates.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReelError {
    #[error("no scroll surface attached; the reel stays inert")]
    MissingSurface,

    #[error("reel can't scroll in both directions, choose horizontal or vertical")]
    BothAxes,

    #[error("reel has no scroll direction, enable horizontal or vertical")]
    NoAxis,

    #[error("invalid reel config: {0}")]
    InvalidConfig(String),

    #[error("reel config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("stop sequence superseded by a restart")]
    StopSuperseded,

    #[error("unknown state: {0}")]
    UnknownState(String),
}

impl ReelError {
    /// Expected during rapid stop/start toggling; callers suppress it.
    pub fn is_superseded(&self) -> bool {
        matches!(self, ReelError::StopSuperseded)
    }
}
