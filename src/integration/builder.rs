//! Builder for [`GeneratorConfig`].

use crate::generator::{ConfigError, GeneratorConfig};

/// Fluent builder for a validated `GeneratorConfig`.
#[derive(Debug, Clone, Default)]
pub struct GeneratorConfigBuilder {
    config: GeneratorConfig,
}

impl GeneratorConfigBuilder {
    /// Start from the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of independent loops, 1 (simple) or 2 (complex).
    pub fn num_tracks(mut self, num_tracks: usize) -> Self {
        self.config.num_tracks = num_tracks;
        self
    }

    /// Number of lanes, 1 or 2.
    pub fn num_lanes(mut self, num_lanes: usize) -> Self {
        self.config.num_lanes = num_lanes;
        self
    }

    /// Points where the road switches between one and two lanes.
    pub fn num_lane_changes(mut self, num_lane_changes: usize) -> Self {
        self.config.num_lane_changes = num_lane_changes;
        self
    }

    /// Per-segment obstacle probability in `[0, 1]`.
    pub fn prob_obstacle(mut self, prob_obstacle: f64) -> Self {
        self.config.prob_obstacle = prob_obstacle;
        self
    }

    /// Nominal loop radius.
    pub fn track_radius(mut self, track_radius: f64) -> Self {
        self.config.track_radius = track_radius;
        self
    }

    /// Lane width. The spawn margin follows it.
    pub fn track_width(mut self, track_width: f64) -> Self {
        self.config.track_width = track_width;
        self.config.spawn_margin = track_width / 3.5;
        self
    }

    /// Walk iteration budget.
    pub fn max_walk_steps(mut self, max_walk_steps: usize) -> Self {
        self.config.max_walk_steps = max_walk_steps;
        self
    }

    /// Build and validate the final `GeneratorConfig`.
    pub fn build(self) -> Result<GeneratorConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
