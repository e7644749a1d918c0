//! Turn-rate-limited path integration through a checkpoint ring.

use std::f64::consts::{PI, TAU};

use nalgebra::{Point2, Vector2};

use crate::generator::checkpoint::{Checkpoint, CheckpointRing};
use crate::generator::error::GenerationError;
use crate::generator::geometry::TrackPoint;

/// Scaled projections below this magnitude leave the heading unchanged.
const STEER_DEADBAND: f64 = 0.3;
/// Heading change per unit of scaled projection, before the turn-rate cap.
const STEER_GAIN: f64 = 0.001;

/// Parameters of one walk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkParams {
    /// Maximum heading change per step (radians).
    pub turn_rate: f64,
    /// Distance covered per step.
    pub step: f64,
    /// World scale applied to the steering projection.
    pub scale: f64,
    /// Hard iteration cap.
    pub max_steps: usize,
    /// The walk stops once the lap counter exceeds this value.
    pub max_laps: u32,
}

/// Walk from the first checkpoint around the ring until enough laps are done.
///
/// The walker starts on checkpoint 0 heading along +y. Each step it steers
/// toward the next checkpoint ahead of its current polar angle, moves one
/// `step` and emits a point whose heading is the mean of the pre- and
/// post-step headings.
pub fn walk(ring: &CheckpointRing, params: &WalkParams) -> Result<Vec<TrackPoint>, GenerationError> {
    let checkpoints = &ring.checkpoints;
    debug_assert!(!checkpoints.is_empty());

    let origin = checkpoints[0];
    let mut position = Point2::new(origin.x, origin.y);
    let mut beta = 0.0_f64;
    let mut dest_i = 0usize;
    let mut laps = 0u32;
    let mut visited_other_side = false;
    let mut points = Vec::with_capacity(params.max_steps);

    for _ in 0..params.max_steps {
        let mut alpha = position.y.atan2(position.x);
        if visited_other_side && alpha > 0.0 {
            laps += 1;
            visited_other_side = false;
        }
        if alpha < 0.0 {
            visited_other_side = true;
            alpha += TAU;
        }

        let dest = loop {
            if let Some(cp) = next_destination(checkpoints, &mut dest_i, alpha) {
                break cp;
            }
            alpha -= TAU;
        };

        let heading = Vector2::new(beta.cos(), beta.sin());
        let forward = Vector2::new(-heading.y, heading.x);
        let to_dest = Vector2::new(dest.x, dest.y) - position.coords;
        let proj = heading.dot(&to_dest) * params.scale;

        while beta - alpha > 1.5 * PI {
            beta -= TAU;
        }
        while beta - alpha < -1.5 * PI {
            beta += TAU;
        }
        let prev_beta = beta;

        let turn = params.turn_rate.min((STEER_GAIN * proj).abs());
        if proj > STEER_DEADBAND {
            beta -= turn;
        }
        if proj < -STEER_DEADBAND {
            beta += turn;
        }

        position += forward * params.step;
        points.push(TrackPoint::new(
            alpha,
            0.5 * prev_beta + 0.5 * beta,
            position.x,
            position.y,
        ));

        if laps > params.max_laps {
            return Ok(points);
        }
    }

    Err(GenerationError::WalkExhausted {
        steps: params.max_steps,
    })
}

/// Advance the destination cursor to the first checkpoint at or ahead of `alpha`.
///
/// The cursor only moves forward. Returns `None` when it wraps past the last
/// checkpoint, in which case the caller shifts `alpha` down by a full turn.
fn next_destination(checkpoints: &[Checkpoint], dest_i: &mut usize, alpha: f64) -> Option<Checkpoint> {
    let n = checkpoints.len();
    loop {
        let cp = checkpoints[*dest_i % n];
        if alpha <= cp.angle {
            return Some(cp);
        }
        *dest_i += 1;
        if *dest_i % n == 0 {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::checkpoint::sample_checkpoints;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn params() -> WalkParams {
        WalkParams {
            turn_rate: 0.31,
            step: 3.5,
            scale: 6.0,
            max_steps: 2500,
            max_laps: 4,
        }
    }

    /// Twelve checkpoints evenly spaced on a circle of radius 150.
    fn regular_ring() -> CheckpointRing {
        let checkpoints = (0..12)
            .map(|c| {
                let angle = TAU * c as f64 / 12.0;
                Checkpoint {
                    angle,
                    x: 150.0 * angle.cos(),
                    y: 150.0 * angle.sin(),
                }
            })
            .collect();
        CheckpointRing {
            checkpoints,
            start_alpha: -PI / 12.0,
        }
    }

    #[test]
    fn test_steps_have_constant_length() {
        let points = walk(&regular_ring(), &params()).unwrap();
        assert!(points.len() < params().max_steps);
        for w in points.windows(2) {
            let d = nalgebra::distance(&w[0].position, &w[1].position);
            assert!((d - 3.5).abs() < 1e-9);
        }
    }

    #[test]
    fn test_walk_stops_after_max_laps() {
        let points = walk(&regular_ring(), &params()).unwrap();
        // The lap that ends the walk is counted from the pre-step position
        // of the final step.
        let laps = points[..points.len() - 1]
            .windows(2)
            .filter(|w| w[0].position.y < 0.0 && w[1].position.y > 0.0)
            .count();
        assert_eq!(laps, params().max_laps as usize + 1);
    }

    #[test]
    fn test_budget_exhaustion_fails() {
        let mut rng = StdRng::seed_from_u64(2);
        let ring = sample_checkpoints(&mut rng, 12, 150.0);
        let short = WalkParams {
            max_steps: 10,
            ..params()
        };
        assert_eq!(
            walk(&ring, &short),
            Err(GenerationError::WalkExhausted { steps: 10 })
        );
    }

    #[test]
    fn test_destination_cursor_wraps() {
        let cps = [
            Checkpoint { angle: 0.0, x: 1.0, y: 0.0 },
            Checkpoint { angle: 1.0, x: 0.0, y: 1.0 },
        ];
        let mut i = 0;
        assert_eq!(next_destination(&cps, &mut i, 0.5), Some(cps[1]));
        assert_eq!(i, 1);
        assert_eq!(next_destination(&cps, &mut i, 2.0), None);
        assert_eq!(i, 2);
        assert_eq!(next_destination(&cps, &mut i, 2.0 - TAU), Some(cps[0]));
    }
}
