//! Track geometry primitives: sampled points, segments and closed loops.
//!
//! Geometry is stored in flat, index-addressed arrays. A [`TrackSet`] is the
//! concatenation of its tracks, and a global segment index addresses the same
//! slot in every per-segment array built on top of it.

use std::collections::BTreeSet;
use std::ops::Range;

use nalgebra::{Point2, Vector2};
use ndarray::Array2;

/// Four vertices of a road tile, border strip or marker, in drawing order.
pub type Quad = [Point2<f64>; 4];

/// RGB colour with components in `[0, 1]`.
pub type Rgb = [f32; 3];

/// A coloured quadrilateral handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polygon {
    pub vertices: Quad,
    pub color: Rgb,
}

impl Polygon {
    #[inline]
    pub fn new(vertices: Quad, color: Rgb) -> Self {
        Self { vertices, color }
    }

    /// Axis-aligned square centred on `center`.
    pub fn square(center: Point2<f64>, half_size: f64, color: Rgb) -> Self {
        let (x, y) = (center.x, center.y);
        Self::new(
            [
                Point2::new(x + half_size, y + half_size),
                Point2::new(x - half_size, y + half_size),
                Point2::new(x - half_size, y - half_size),
                Point2::new(x + half_size, y - half_size),
            ],
            color,
        )
    }
}

/// One sample of the generated path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPoint {
    /// Polar angle of the position around the world origin, as seen by the walker.
    pub alpha: f64,
    /// Smoothed heading at this point.
    pub beta: f64,
    /// World position.
    pub position: Point2<f64>,
}

impl TrackPoint {
    #[inline]
    pub fn new(alpha: f64, beta: f64, x: f64, y: f64) -> Self {
        Self {
            alpha,
            beta,
            position: Point2::new(x, y),
        }
    }

    /// Unit vector across the road. Lane offsets are measured along this axis.
    #[inline]
    pub fn lateral(&self) -> Vector2<f64> {
        Vector2::new(self.beta.cos(), self.beta.sin())
    }

    /// Point displaced `distance` along the lateral axis.
    #[inline]
    pub fn offset(&self, distance: f64) -> Point2<f64> {
        self.position + self.lateral() * distance
    }
}

/// The atomic unit of track geometry: two consecutive track points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: TrackPoint,
    pub end: TrackPoint,
}

impl Segment {
    #[inline]
    pub fn new(start: TrackPoint, end: TrackPoint) -> Self {
        Self { start, end }
    }

    /// Heading change from start to end. Positive values turn left.
    #[inline]
    pub fn heading_change(&self) -> f64 {
        self.end.beta - self.start.beta
    }

    #[inline]
    pub fn midpoint(&self) -> Point2<f64> {
        nalgebra::center(&self.start.position, &self.end.position)
    }

    /// Whether this segment starts exactly where `prev` ends.
    #[inline]
    pub fn follows(&self, prev: &Segment) -> bool {
        prev.end == self.start
    }
}

/// One loop of segments, wrapping from the last segment back to the first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    segments: Vec<Segment>,
}

impl Track {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Build a closed loop from a point sequence: segment `i` joins point
    /// `i - 1` to point `i`, so segment 0 joins the last point to the first.
    pub fn from_points(points: &[TrackPoint]) -> Self {
        let n = points.len();
        let segments = (0..n)
            .map(|i| Segment::new(points[(i + n - 1) % n], points[i]))
            .collect();
        Self { segments }
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segment at a signed offset from `index`, wrapping around the loop.
    pub fn wrapped(&self, index: usize, offset: isize) -> &Segment {
        let n = self.segments.len() as isize;
        &self.segments[(index as isize + offset).rem_euclid(n) as usize]
    }

    /// End points of every segment, in order.
    pub fn end_points(&self) -> Vec<Point2<f64>> {
        self.segments.iter().map(|s| s.end.position).collect()
    }

    /// Whether every segment starts exactly where its predecessor ends,
    /// including the wrap from the last segment to the first.
    pub fn is_closed(&self) -> bool {
        !self.segments.is_empty()
            && (0..self.segments.len()).all(|i| self.segments[i].follows(self.wrapped(i, -1)))
    }

    /// Index of the segment whose end point is nearest to `point`.
    pub fn nearest_segment(&self, point: &Point2<f64>) -> Option<usize> {
        self.segments
            .iter()
            .enumerate()
            .map(|(i, s)| (i, nalgebra::distance_squared(&s.end.position, point)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    /// Drop the segments at `indices`, keeping the rest in order.
    pub fn remove_segments(&mut self, indices: &BTreeSet<usize>) {
        let mut idx = 0;
        self.segments.retain(|_| {
            let keep = !indices.contains(&idx);
            idx += 1;
            keep
        });
    }
}

impl std::ops::Index<usize> for Track {
    type Output = Segment;

    fn index(&self, index: usize) -> &Segment {
        &self.segments[index]
    }
}

/// Ordered tracks. Track 0 is the primary loop.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackSet {
    tracks: Vec<Track>,
}

impl TrackSet {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    #[inline]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    #[inline]
    pub(crate) fn tracks_mut(&mut self) -> &mut Vec<Track> {
        &mut self.tracks
    }

    #[inline]
    pub fn num_tracks(&self) -> usize {
        self.tracks.len()
    }

    /// Total number of segments over all tracks.
    pub fn num_segments(&self) -> usize {
        self.tracks.iter().map(Track::len).sum()
    }

    pub fn primary(&self) -> Option<&Track> {
        self.tracks.first()
    }

    /// Global index range covered by `track_id`.
    pub fn track_range(&self, track_id: usize) -> Range<usize> {
        let start: usize = self.tracks[..track_id].iter().map(Track::len).sum();
        start..start + self.tracks[track_id].len()
    }

    /// Resolve a global segment index into `(track_id, local_index)`.
    pub fn locate(&self, index: usize) -> Option<(usize, usize)> {
        let mut offset = 0;
        for (track_id, track) in self.tracks.iter().enumerate() {
            if index < offset + track.len() {
                return Some((track_id, index - offset));
            }
            offset += track.len();
        }
        None
    }

    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.locate(index).map(|(t, i)| &self.tracks[t][i])
    }

    /// All segments in global index order, tagged with their track id.
    pub fn segments(&self) -> impl Iterator<Item = (usize, &Segment)> {
        self.tracks
            .iter()
            .enumerate()
            .flat_map(|(t, track)| track.segments().iter().map(move |s| (t, s)))
    }
}

/// Pairwise euclidean distances between two point sets.
///
/// Returns a matrix of shape (M, N) where M is the length of `a`
/// and N is the length of `b`.
pub fn distance_matrix(a: &[Point2<f64>], b: &[Point2<f64>]) -> Array2<f64> {
    let mut dists = Array2::zeros((a.len(), b.len()));
    for (i, p) in a.iter().enumerate() {
        for (j, q) in b.iter().enumerate() {
            dists[[i, j]] = nalgebra::distance(p, q);
        }
    }
    dists
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square_points() -> Vec<TrackPoint> {
        vec![
            TrackPoint::new(0.0, 0.0, 1.0, 0.0),
            TrackPoint::new(0.0, 0.0, 1.0, 1.0),
            TrackPoint::new(0.0, 0.0, 0.0, 1.0),
            TrackPoint::new(0.0, 0.0, 0.0, 0.0),
        ]
    }

    #[test]
    fn test_from_points_wraps_first_segment() {
        let points = square_points();
        let track = Track::from_points(&points);
        assert_eq!(track.len(), 4);
        assert_eq!(track[0].start, points[3]);
        assert_eq!(track[0].end, points[0]);
        assert!(track.is_closed());
    }

    #[test]
    fn test_remove_segments_opens_loop() {
        let mut track = Track::from_points(&square_points());
        track.remove_segments(&BTreeSet::from([1]));
        assert_eq!(track.len(), 3);
        assert!(!track.is_closed());
    }

    #[test]
    fn test_locate_and_ranges() {
        let a = Track::from_points(&square_points());
        let b = Track::from_points(&square_points()[..3]);
        let set = TrackSet::new(vec![a, b]);
        assert_eq!(set.num_segments(), 7);
        assert_eq!(set.track_range(1), 4..7);
        assert_eq!(set.locate(5), Some((1, 1)));
        assert_eq!(set.locate(7), None);
        assert_eq!(set.segments().filter(|(t, _)| *t == 1).count(), 3);
    }

    #[test]
    fn test_offset_and_nearest() {
        let p = TrackPoint::new(0.0, std::f64::consts::FRAC_PI_2, 2.0, 3.0);
        let q = p.offset(2.0);
        assert_relative_eq!(q.x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(q.y, 5.0, epsilon = 1e-12);

        let track = Track::from_points(&square_points());
        assert_eq!(track.nearest_segment(&Point2::new(0.1, 0.9)), Some(2));
    }

    #[test]
    fn test_distance_matrix() {
        let a = [Point2::new(0.0, 0.0), Point2::new(3.0, 0.0)];
        let b = [Point2::new(0.0, 4.0)];
        let d = distance_matrix(&a, &b);
        assert_eq!(d.dim(), (2, 1));
        assert_relative_eq!(d[[0, 0]], 4.0);
        assert_relative_eq!(d[[1, 0]], 5.0);
    }
}
