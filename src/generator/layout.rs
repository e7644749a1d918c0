//! The finished product of one generation: geometry plus per-segment metadata.

use std::ops::Range;

use crate::generator::geometry::{Segment, TrackSet};
use crate::generator::lane::LaneSet;

/// Metadata for one segment, keyed by its global index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentInfo {
    /// Track the segment came from.
    pub track_id: usize,
    /// The segment does not start where its predecessor ends.
    pub is_loop_start: bool,
    /// The segment does not end where its successor starts.
    pub is_loop_end: bool,
    /// Nearest primary-track segment to a secondary loop boundary.
    pub near_intersection: bool,
    pub lanes: LaneSet,
    pub has_obstacle: bool,
}

impl SegmentInfo {
    pub fn new(track_id: usize, num_lanes: usize) -> Self {
        Self {
            track_id,
            is_loop_start: false,
            is_loop_end: false,
            near_intersection: false,
            lanes: LaneSet::new(num_lanes),
            has_obstacle: false,
        }
    }

    #[inline]
    pub fn is_loop_boundary(&self) -> bool {
        self.is_loop_start || self.is_loop_end
    }
}

/// Track geometry and the parallel [`SegmentInfo`] array.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackLayout {
    tracks: TrackSet,
    info: Vec<SegmentInfo>,
}

impl TrackLayout {
    pub fn new(tracks: TrackSet, info: Vec<SegmentInfo>) -> Self {
        debug_assert_eq!(tracks.num_segments(), info.len());
        Self { tracks, info }
    }

    #[inline]
    pub fn tracks(&self) -> &TrackSet {
        &self.tracks
    }

    #[inline]
    pub fn info(&self) -> &[SegmentInfo] {
        &self.info
    }

    /// Total number of segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.info.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.info.is_empty()
    }

    /// Segment at global `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn segment(&self, index: usize) -> &Segment {
        let (track_id, local) = self
            .tracks
            .locate(index)
            .unwrap_or_else(|| panic!("segment {index} out of {}", self.len()));
        &self.tracks.tracks()[track_id][local]
    }

    pub fn track_range(&self, track_id: usize) -> Range<usize> {
        self.tracks.track_range(track_id)
    }

    /// Global index of the segment `offset` places away from `index`,
    /// wrapping inside the segment's own track.
    pub fn track_neighbor(&self, index: usize, offset: isize) -> usize {
        let range = self.track_range(self.info[index].track_id);
        let len = range.len() as isize;
        let local = (index - range.start) as isize;
        range.start + (local + offset).rem_euclid(len) as usize
    }
}
