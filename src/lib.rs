//! Procedural generation of closed-loop racetracks.
//!
//! A layout is built from random checkpoints on a ring, a steering walk
//! through them, one extracted lap per track, overlap resolution between
//! tracks, and per-segment lane, border and obstacle annotation.

pub mod generator;
pub mod integration;

pub use generator::{
    ConfigError, GenerationError, GeneratorConfig, RetryExhausted, Segment, SegmentInfo, Track,
    TrackBuilder, TrackLayout, TrackPoint, TrackSet,
};
pub use integration::{
    DebugOverlay, GeneratorConfigBuilder, RoadTile, SpawnPoint, TileSink, TrackPipeline,
    TrackScene,
};
