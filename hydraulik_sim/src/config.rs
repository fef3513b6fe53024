// Data-driven simulation configuration.
//
// Tunable timing parameters live in `SimConfig`, loaded from JSON by the
// host. Missing fields fall back to `Default`, so a config file only needs
// to name what it overrides.
//
// See also: `tick.rs`, which validates and consumes this config in
// `TickScheduler::with_config`.
//
// **Critical constraint: determinism.** The step duration fixes the
// simulation rate. Hosts that must agree on tick numbers must share it.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Default length of one tick in milliseconds (20 ticks per second).
pub const DEFAULT_STEP_DURATION_MS: f64 = 50.0;

/// Default cap on ticks emitted by a single `advance` call.
pub const DEFAULT_MAX_CATCH_UP_TICKS: u32 = 8;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Wall-clock milliseconds per simulation tick.
    pub step_duration_ms: f64,

    /// Maximum ticks one `advance` call may emit. Backlog beyond this is
    /// discarded rather than replayed.
    pub max_catch_up_ticks: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            step_duration_ms: DEFAULT_STEP_DURATION_MS,
            max_catch_up_ticks: DEFAULT_MAX_CATCH_UP_TICKS,
        }
    }
}

impl SimConfig {
    /// Parse a config from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the scheduler misbehave.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.step_duration_ms.is_finite() || self.step_duration_ms <= 0.0 {
            return Err(ConfigError::InvalidStepDuration(self.step_duration_ms));
        }
        if self.max_catch_up_ticks == 0 {
            return Err(ConfigError::ZeroCatchUp);
        }
        Ok(())
    }
}
