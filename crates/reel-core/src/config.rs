//! Reel tuning, loaded from JSON or built in code.

use serde::{Deserialize, Serialize};

use crate::ReelError;

/// Timings are in seconds, speeds in surface units per second.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReelConfig {
    /// Ramp from rest to `target_speed`.
    pub acceleration_time: f32,
    /// Signed; positive scrolls content towards -x / -y.
    pub target_speed: f32,
    /// Ramp from the current speed down to rest.
    pub stop_time: f32,
    /// Exponential smoothing rate of the snap.
    pub snap_speed: f32,
    /// Snap waits while the surface velocity magnitude is above this.
    pub snap_velocity_threshold: f32,
    /// Distance past the viewport edge before an item wraps. Half the
    /// viewport extent along the active axis when absent.
    #[serde(default)]
    pub wrap_threshold: Option<f32>,
    /// Delay after starting before a stop is accepted.
    pub warmup_delay: f32,
    /// Delay between the end of deceleration and the snap.
    pub snap_grace_delay: f32,
}

impl ReelConfig {
    /// Reference tuning of the slot machine screen.
    pub fn slot_machine() -> Self {
        Self {
            acceleration_time: 3.0,
            target_speed: 3000.0,
            stop_time: 2.0,
            snap_speed: 3.0,
            snap_velocity_threshold: 60.0,
            wrap_threshold: None,
            warmup_delay: 3.0,
            snap_grace_delay: 0.1,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ReelError> {
        let cfg: ReelConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ReelError> {
        let fields = [
            ("acceleration_time", self.acceleration_time),
            ("target_speed", self.target_speed),
            ("stop_time", self.stop_time),
            ("snap_speed", self.snap_speed),
            ("snap_velocity_threshold", self.snap_velocity_threshold),
            ("warmup_delay", self.warmup_delay),
            ("snap_grace_delay", self.snap_grace_delay),
        ];
        for (name, v) in fields {
            if !v.is_finite() {
                return Err(ReelError::InvalidConfig(format!("{name} must be finite")));
            }
        }
        if self.snap_speed <= 0.0 {
            return Err(ReelError::InvalidConfig(
                "snap_speed must be positive".into(),
            ));
        }
        if self.snap_velocity_threshold < 0.0 {
            return Err(ReelError::InvalidConfig(
                "snap_velocity_threshold must not be negative".into(),
            ));
        }
        if self.warmup_delay < 0.0 || self.snap_grace_delay < 0.0 {
            return Err(ReelError::InvalidConfig(
                "delays must not be negative".into(),
            ));
        }
        if let Some(t) = self.wrap_threshold
            && !(t.is_finite() && t >= 0.0)
        {
            return Err(ReelError::InvalidConfig(
                "wrap_threshold must be a non-negative number".into(),
            ));
        }
        Ok(())
    }
}
