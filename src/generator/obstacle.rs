//! Stochastic static obstacles.

use nalgebra::Point2;
use rand::Rng;

use crate::generator::geometry::{Polygon, Rgb, Segment};
use crate::generator::layout::SegmentInfo;

pub const OBSTACLE_COLOR: Rgb = [1.0, 0.5, 0.3];

/// One Bernoulli trial per segment with probability `prob`.
pub fn place_obstacles<R: Rng + ?Sized>(info: &mut [SegmentInfo], prob: f64, rng: &mut R) {
    debug_assert!((0.0..=1.0).contains(&prob));
    for si in info.iter_mut() {
        si.has_obstacle = rng.random_bool(prob);
    }
}

/// The two marker shapes drawn for an obstacle on `segment`: a tapered
/// body and a flat base, placed near the segment midpoint.
pub fn obstacle_polygons(segment: &Segment, track_width: f64) -> [Polygon; 2] {
    let mid = segment.midpoint();
    let x = mid.x;
    let y = mid.y + track_width * segment.end.beta.sin() / 2.0;
    [
        Polygon::new(
            [
                Point2::new(x + 0.1, y + 0.4),
                Point2::new(x - 0.1, y + 0.4),
                Point2::new(x - 0.4, y - 0.4),
                Point2::new(x + 0.4, y - 0.4),
            ],
            OBSTACLE_COLOR,
        ),
        Polygon::new(
            [
                Point2::new(x + 0.5, y - 0.4),
                Point2::new(x - 0.5, y - 0.4),
                Point2::new(x - 0.5, y - 0.6),
                Point2::new(x + 0.5, y - 0.6),
            ],
            OBSTACLE_COLOR,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::geometry::TrackPoint;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_probability_bounds() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut info: Vec<_> = (0..100).map(|_| SegmentInfo::new(0, 2)).collect();

        place_obstacles(&mut info, 0.0, &mut rng);
        assert!(info.iter().all(|si| !si.has_obstacle));

        place_obstacles(&mut info, 1.0, &mut rng);
        assert!(info.iter().all(|si| si.has_obstacle));
    }

    #[test]
    fn test_obstacle_shape_near_midpoint() {
        let seg = Segment::new(
            TrackPoint::new(0.0, 0.0, 0.0, 0.0),
            TrackPoint::new(0.0, 0.0, 2.0, 0.0),
        );
        let [body, base] = obstacle_polygons(&seg, 6.0);
        assert_relative_eq!(body.vertices[0].x, 1.1);
        assert_relative_eq!(body.vertices[0].y, 0.4);
        assert_relative_eq!(base.vertices[3].y, -0.6);
        assert_eq!(base.color, OBSTACLE_COLOR);
    }
}
