//! Random checkpoint ring that steers the path walker around one loop.

use std::f64::consts::{PI, TAU};

use rand::Rng;

/// Anchor point on a rough circle of randomized radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Checkpoint {
    pub angle: f64,
    pub x: f64,
    pub y: f64,
}

impl Checkpoint {
    fn polar(angle: f64, radius: f64) -> Self {
        Self {
            angle,
            x: radius * angle.cos(),
            y: radius * angle.sin(),
        }
    }
}

/// Angularly sorted checkpoints plus the start-line angle used for closure detection.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckpointRing {
    pub checkpoints: Vec<Checkpoint>,
    pub start_alpha: f64,
}

/// Sample `count` checkpoints around a circle of nominal `radius`.
///
/// Checkpoint `i` sits at `2πi/count` plus a jitter in `[0, 2π/count)`, at a
/// radius in `[radius/3, radius)`. The first and last checkpoints are pinned
/// to `1.5 * radius` at angles `0` and `2π(count-1)/count`, anchoring the
/// start line and the closing stretch.
pub fn sample_checkpoints<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    radius: f64,
) -> CheckpointRing {
    debug_assert!(count > 0);
    let sector = TAU / count as f64;
    let anchor = 1.5 * radius;

    let checkpoints = (0..count)
        .map(|c| {
            let base = sector * c as f64;
            let jittered = base + rng.random_range(0.0..sector);
            let rad = rng.random_range(radius / 3.0..radius);
            if c == 0 {
                Checkpoint::polar(0.0, anchor)
            } else if c == count - 1 {
                Checkpoint::polar(base, anchor)
            } else {
                Checkpoint::polar(jittered, rad)
            }
        })
        .collect();

    CheckpointRing {
        checkpoints,
        start_alpha: -PI / count as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_ring_is_sorted_and_pinned() {
        let mut rng = StdRng::seed_from_u64(3);
        let ring = sample_checkpoints(&mut rng, 12, 150.0);
        assert_eq!(ring.checkpoints.len(), 12);
        assert!(
            ring.checkpoints
                .windows(2)
                .all(|w| w[0].angle < w[1].angle)
        );

        let first = ring.checkpoints[0];
        assert_eq!(first.angle, 0.0);
        assert_relative_eq!(first.x, 225.0);

        let last = ring.checkpoints[11];
        assert_relative_eq!(last.angle, TAU * 11.0 / 12.0);
        assert_relative_eq!(last.x.hypot(last.y), 225.0, epsilon = 1e-9);
        assert_relative_eq!(ring.start_alpha, -PI / 12.0);
    }

    #[test]
    fn test_free_checkpoints_stay_in_band() {
        let mut rng = StdRng::seed_from_u64(11);
        let ring = sample_checkpoints(&mut rng, 12, 90.0);
        for (i, cp) in ring.checkpoints.iter().enumerate().skip(1).take(10) {
            let r = cp.x.hypot(cp.y);
            assert!((30.0 - 1e-9..90.0).contains(&r), "checkpoint {i} radius {r}");
            let base = TAU * i as f64 / 12.0;
            assert!(cp.angle >= base && cp.angle < base + TAU / 12.0);
        }
    }
}
