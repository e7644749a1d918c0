//! Main track generation pipeline: checkpoints, walk, lap extraction,
//! intersection resolution and per-segment annotation.

use nalgebra::Point2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::generator::annotator::{annotate, toggle_lanes};
use crate::generator::checkpoint::sample_checkpoints;
use crate::generator::error::{ConfigError, GenerationError};
use crate::generator::geometry::{Track, TrackSet};
use crate::generator::intersection::IntersectionResolver;
use crate::generator::layout::TrackLayout;
use crate::generator::lane::MAX_LANES;
use crate::generator::loop_extractor::extract_loop;
use crate::generator::obstacle::place_obstacles;
use crate::generator::walker::{WalkParams, walk};

/// Pixel units per world unit.
pub const SCALE: f64 = 6.0;

/// Configuration for the track generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Independent loops to generate, 1 (simple) or 2 (complex).
    pub num_tracks: usize,
    /// Parallel lanes, 1 or 2.
    pub num_lanes: usize,
    /// Points where the road switches between one and two lanes.
    pub num_lane_changes: usize,
    /// Per-segment obstacle probability.
    pub prob_obstacle: f64,
    /// Checkpoints per loop.
    pub checkpoints: usize,
    /// Nominal loop radius.
    pub track_radius: f64,
    /// Width of one lane.
    pub track_width: f64,
    /// Thickness of the red/white border strips.
    pub border_width: f64,
    /// Consecutive sharp-turn segments needed before a border is drawn.
    pub border_min_count: usize,
    /// Walk step length.
    pub detail_step: f64,
    /// Maximum heading change per walk step (radians).
    pub turn_rate: f64,
    /// World scale applied to the walker's steering projection.
    pub scale: f64,
    /// Walk iteration budget.
    pub max_walk_steps: usize,
    /// Laps the walker completes before stopping.
    pub max_laps: u32,
    /// Half side of the square game-over boundary.
    pub playfield: f64,
    /// Lateral clearance kept from the road edge when spawning a vehicle.
    pub spawn_margin: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let track_width = 40.0 / SCALE;
        Self {
            num_tracks: 2,
            num_lanes: 2,
            num_lane_changes: 2,
            prob_obstacle: 0.1,
            checkpoints: 12,
            track_radius: 900.0 / SCALE,
            track_width,
            border_width: 8.0 / SCALE,
            border_min_count: 4,
            detail_step: 21.0 / SCALE,
            turn_rate: 0.31,
            scale: SCALE,
            max_walk_steps: 2500,
            max_laps: 4,
            playfield: 2000.0 / SCALE,
            spawn_margin: track_width / 3.5,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=2).contains(&self.num_tracks) {
            return Err(ConfigError::NumTracks(self.num_tracks));
        }
        if !(1..=MAX_LANES).contains(&self.num_lanes) {
            return Err(ConfigError::NumLanes(self.num_lanes));
        }
        if !(0.0..=1.0).contains(&self.prob_obstacle) {
            return Err(ConfigError::ProbObstacle(self.prob_obstacle));
        }
        if self.checkpoints < 3 {
            return Err(ConfigError::Checkpoints(self.checkpoints));
        }
        for (name, value) in [
            ("track_radius", self.track_radius),
            ("track_width", self.track_width),
            ("border_width", self.border_width),
            ("detail_step", self.detail_step),
            ("turn_rate", self.turn_rate),
            ("scale", self.scale),
            ("playfield", self.playfield),
        ] {
            // Written so that NaN is rejected too.
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        if self.border_min_count == 0 {
            return Err(ConfigError::Zero {
                name: "border_min_count",
            });
        }
        if self.max_walk_steps == 0 {
            return Err(ConfigError::Zero {
                name: "max_walk_steps",
            });
        }
        let half_width = self.track_width / 2.0;
        if !(0.0..half_width).contains(&self.spawn_margin) {
            return Err(ConfigError::SpawnMargin {
                margin: self.spawn_margin,
                half_width,
            });
        }
        Ok(())
    }

    /// Whether `point` lies inside the game-over boundary.
    pub fn in_playfield(&self, point: &Point2<f64>) -> bool {
        point.x.abs() <= self.playfield && point.y.abs() <= self.playfield
    }

    pub fn walk_params(&self) -> WalkParams {
        WalkParams {
            turn_rate: self.turn_rate,
            step: self.detail_step,
            scale: self.scale,
            max_steps: self.max_walk_steps,
            max_laps: self.max_laps,
        }
    }
}

/// Generates track layouts from a validated configuration.
///
/// Generation is synchronous and never retries: a failed attempt returns a
/// [`GenerationError`] and the caller decides whether to draw again.
#[derive(Debug, Clone)]
pub struct TrackBuilder {
    config: GeneratorConfig,
}

impl TrackBuilder {
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate one closed loop.
    pub fn build_track<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Track, GenerationError> {
        let ring = sample_checkpoints(rng, self.config.checkpoints, self.config.track_radius);
        let points = walk(&ring, &self.config.walk_params())?;
        extract_loop(&points, ring.start_alpha, self.config.detail_step)
    }

    /// Generate `num_tracks` independent loops. Any failure aborts the whole set.
    pub fn build_tracks<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<TrackSet, GenerationError> {
        let tracks = (0..self.config.num_tracks)
            .map(|_| self.build_track(rng))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TrackSet::new(tracks))
    }

    /// Run the full pipeline and return an annotated layout.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<TrackLayout, GenerationError> {
        let mut tracks = self.build_tracks(rng)?;

        IntersectionResolver::new(self.config.track_width).resolve(&mut tracks);

        let mut info = annotate(&tracks, self.config.num_lanes);
        toggle_lanes(
            &mut info,
            self.config.num_lanes,
            self.config.num_lane_changes,
            rng,
        );
        place_obstacles(&mut info, self.config.prob_obstacle, rng);

        Ok(TrackLayout::new(tracks, info))
    }
}
