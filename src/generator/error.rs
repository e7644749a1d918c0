//! Error types for track generation.

use thiserror::Error;

/// Why one generation attempt produced no track.
///
/// These are expected outcomes: the caller draws new random numbers and tries again.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    /// The path walker used its whole step budget without finishing its laps.
    #[error("path walk did not close within {steps} steps")]
    WalkExhausted { steps: usize },
    /// The walk crossed the start line fewer than two times.
    #[error("closure window not found: fewer than two start-line crossings")]
    ClosureNotFound,
    /// Head and tail of the extracted lap do not meet.
    #[error("loop head and tail are {gap:.3} apart, limit is {limit:.3}")]
    ClosureGap { gap: f64, limit: f64 },
}

/// Invalid generator configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("num_tracks must be 1 or 2, got {0}")]
    NumTracks(usize),
    #[error("num_lanes must be 1 or 2, got {0}")]
    NumLanes(usize),
    #[error("prob_obstacle must lie in [0, 1], got {0}")]
    ProbObstacle(f64),
    #[error("at least 3 checkpoints are required, got {0}")]
    Checkpoints(usize),
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("{name} must be non-zero")]
    Zero { name: &'static str },
    #[error("spawn_margin {margin} must be below half the track width {half_width}")]
    SpawnMargin { margin: f64, half_width: f64 },
}

/// The retry cap was reached without a valid layout.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("track generation failed after {attempts} attempts")]
pub struct RetryExhausted {
    pub attempts: usize,
    #[source]
    pub last: GenerationError,
}
