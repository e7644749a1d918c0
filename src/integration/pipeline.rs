//! TrackPipeline for combining generation with scene loading.

use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::generator::{ConfigError, GeneratorConfig, RetryExhausted, TrackBuilder, TrackLayout};

use super::{DebugOverlay, SpawnPoint, TileSink, TrackScene, build_scene, random_point_on_track};

/// Attempts made by [`TrackPipeline::reset`] before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 100;

/// A seeded generator that keeps the current layout for an episode.
///
/// This struct owns the random source, retries failed generation attempts
/// and hands finished layouts to a [`TileSink`].
pub struct TrackPipeline {
    builder: TrackBuilder,
    rng: StdRng,
    max_attempts: usize,
    overlay: DebugOverlay,
    layout: Option<TrackLayout>,
}

impl TrackPipeline {
    /// Create a pipeline. Without a seed the random source is seeded from the OS.
    pub fn new(config: GeneratorConfig, seed: Option<u64>) -> Result<Self, ConfigError> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self {
            builder: TrackBuilder::new(config)?,
            rng,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            overlay: DebugOverlay::default(),
            layout: None,
        })
    }

    /// Create a pipeline with the default configuration.
    pub fn with_default_config(seed: Option<u64>) -> Result<Self, ConfigError> {
        Self::new(GeneratorConfig::default(), seed)
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_overlay(mut self, overlay: DebugOverlay) -> Self {
        self.overlay = overlay;
        self
    }

    /// Re-seed the random source.
    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Generate a fresh layout, retrying failed attempts.
    ///
    /// # Returns
    /// The new layout, or [`RetryExhausted`] carrying the last failure.
    pub fn reset(&mut self) -> Result<&TrackLayout, RetryExhausted> {
        let mut attempt = 0;
        let layout = loop {
            attempt += 1;
            match self.builder.generate(&mut self.rng) {
                Ok(layout) => break layout,
                Err(err) if attempt < self.max_attempts => {
                    warn!("track generation attempt {attempt} failed: {err}");
                }
                Err(last) => {
                    warn!("track generation gave up after {attempt} attempts");
                    return Err(RetryExhausted {
                        attempts: attempt,
                        last,
                    });
                }
            }
        };

        info!(
            "generated {} tracks with {} segments after {attempt} attempts",
            layout.tracks().num_tracks(),
            layout.len()
        );
        Ok(self.layout.insert(layout))
    }

    /// The layout produced by the last successful [`reset`](Self::reset).
    pub fn layout(&self) -> Option<&TrackLayout> {
        self.layout.as_ref()
    }

    pub fn config(&self) -> &GeneratorConfig {
        self.builder.config()
    }

    /// Build tiles and render polygons for the current layout.
    pub fn scene(&self) -> Option<TrackScene> {
        self.layout
            .as_ref()
            .map(|layout| build_scene(layout, self.builder.config(), &self.overlay))
    }

    /// Insert every road tile of the current layout into `sink`.
    ///
    /// Returns the number of tiles inserted; zero when no layout exists yet.
    pub fn load_into<S: TileSink>(&self, sink: &mut S) -> Result<usize, S::Error> {
        let Some(scene) = self.scene() else {
            return Ok(0);
        };
        for tile in &scene.tiles {
            sink.insert_tile(tile)?;
        }
        Ok(scene.tiles.len())
    }

    /// Pick a random vehicle placement on the current layout.
    pub fn spawn_point(&mut self, fit: bool) -> Option<SpawnPoint> {
        let config = self.builder.config();
        let layout = self.layout.as_ref()?;
        Some(random_point_on_track(
            layout,
            config.track_width,
            config.spawn_margin,
            fit,
            &mut self.rng,
        ))
    }
}
