mod annotator;
mod border;
mod checkpoint;
mod error;
mod geometry;
mod intersection;
mod lane;
mod layout;
mod loop_extractor;
mod obstacle;
mod track_builder;
mod walker;

pub use annotator::{annotate, toggle_lanes};
pub use border::{BORDER_DARK, BORDER_LIGHT, border_flags, border_polygons, sharp_turns};
pub use checkpoint::{Checkpoint, CheckpointRing, sample_checkpoints};
pub use error::{ConfigError, GenerationError, RetryExhausted};
pub use geometry::{Polygon, Quad, Rgb, Segment, Track, TrackPoint, TrackSet, distance_matrix};
pub use intersection::IntersectionResolver;
pub use lane::{LaneSet, MAX_LANES};
pub use layout::{SegmentInfo, TrackLayout};
pub use loop_extractor::{closure_gap, extract_loop};
pub use obstacle::{OBSTACLE_COLOR, obstacle_polygons, place_obstacles};
pub use track_builder::{GeneratorConfig, SCALE, TrackBuilder};
pub use walker::{WalkParams, walk};
