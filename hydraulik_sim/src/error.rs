// Error types for the simulation crate.
//
// Only configuration can fail. Geometry is total and pathfinding reports an
// unreachable goal as an empty path, so neither has an error type.

/// A configuration value that cannot drive a `TickScheduler`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Step duration must be finite and strictly positive.
    #[error("invalid step duration: {0} ms (must be finite and > 0)")]
    InvalidStepDuration(f64),

    /// A catch-up cap of zero would never emit a tick.
    #[error("max_catch_up_ticks must be at least 1")]
    ZeroCatchUp,

    /// The config file is not valid JSON for `SimConfig`.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
