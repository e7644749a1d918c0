//! Integration module for connecting generated layouts with physics and rendering.
//!
//! This module provides the seeded retry pipeline, scene construction and the
//! [`TileSink`] trait that physics backends implement to receive road tiles.

mod builder;
mod pipeline;
mod scene;
mod sink;
mod spawn;

pub use builder::GeneratorConfigBuilder;
pub use pipeline::{DEFAULT_MAX_ATTEMPTS, TrackPipeline};
pub use scene::{
    DebugOverlay, GRASS_CHECKER_COLOR, GRASS_COLOR, ROAD_COLOR, RoadTile, TrackScene, build_scene,
};
pub use sink::TileSink;
pub use spawn::{SpawnPoint, random_point_on_track};
