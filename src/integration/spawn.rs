//! Random vehicle placement on a generated layout.

use nalgebra::Point2;
use rand::Rng;

use crate::generator::TrackLayout;

/// Where to place a vehicle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint {
    /// Global index of the chosen segment.
    pub segment: usize,
    /// Heading of the segment's end point.
    pub heading: f64,
    /// Signed offset from the centre line along the lateral axis.
    pub lateral_offset: f64,
    pub position: Point2<f64>,
}

/// Pick a uniformly random segment and a lateral position on its road.
///
/// The offset is drawn from `[-w * left + m, w * right - m)`, where `left`
/// and `right` are the lane widths present on either side of the centre line
/// and `m` is `margin` when `fit` is set (so the vehicle fits inside the
/// road), zero otherwise.
pub fn random_point_on_track<R: Rng + ?Sized>(
    layout: &TrackLayout,
    track_width: f64,
    margin: f64,
    fit: bool,
    rng: &mut R,
) -> SpawnPoint {
    debug_assert!(!layout.is_empty());
    let segment = rng.random_range(0..layout.len());
    let end = layout.segment(segment).end;

    let (left, right) = layout.info()[segment].lanes.side_coverage();
    let m = if fit { margin } else { 0.0 };
    let lateral_offset = rng.random_range(-track_width * left + m..track_width * right - m);

    SpawnPoint {
        segment,
        heading: end.beta,
        lateral_offset,
        position: end.offset(lateral_offset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{SegmentInfo, Track, TrackPoint, TrackSet};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn layout(lanes_missing: &[(usize, usize)]) -> TrackLayout {
        let points: Vec<_> = (0..12)
            .map(|k| TrackPoint::new(0.0, 0.3, k as f64, 2.0 * k as f64))
            .collect();
        let tracks = TrackSet::new(vec![Track::from_points(&points)]);
        let mut info: Vec<_> = (0..12).map(|_| SegmentInfo::new(0, 2)).collect();
        for &(seg, lane) in lanes_missing {
            info[seg].lanes.remove(lane);
        }
        TrackLayout::new(tracks, info)
    }

    #[test]
    fn test_offset_respects_present_lanes() {
        let missing: Vec<_> = (0..6).map(|s| (s, 0)).chain((6..9).map(|s| (s, 1))).collect();
        let layout = layout(&missing);
        let mut rng = StdRng::seed_from_u64(21);
        let w = 40.0 / 6.0;
        for _ in 0..500 {
            let p = random_point_on_track(&layout, w, w / 3.5, true, &mut rng);
            let (left, right) = layout.info()[p.segment].lanes.side_coverage();
            assert!(p.lateral_offset > -w * left && p.lateral_offset < w * right);
            let back = p.position - layout.segment(p.segment).end.position;
            assert!((back.norm() - p.lateral_offset.abs()).abs() < 1e-9);
            assert_eq!(p.heading, 0.3);
        }
    }

    #[test]
    fn test_spawn_is_deterministic() {
        let layout = layout(&[]);
        let a = random_point_on_track(&layout, 6.0, 1.0, false, &mut StdRng::seed_from_u64(8));
        let b = random_point_on_track(&layout, 6.0, 1.0, false, &mut StdRng::seed_from_u64(8));
        assert_eq!(a, b);
    }
}
