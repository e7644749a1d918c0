//! Cuts one clean closed lap out of a raw multi-lap walk.

use log::debug;

use crate::generator::error::GenerationError;
use crate::generator::geometry::{Track, TrackPoint};

/// Fewest points an extracted lap may have.
const MIN_LAP_POINTS: usize = 3;

/// Extract the last complete lap of `points` as a closed [`Track`].
///
/// The lap runs between the two most recent upward crossings of
/// `start_alpha`. It is rejected when its head and tail are more than one
/// `step` apart across the road.
pub fn extract_loop(
    points: &[TrackPoint],
    start_alpha: f64,
    step: f64,
) -> Result<Track, GenerationError> {
    let (i1, i2) =
        find_closure_window(points, start_alpha).ok_or(GenerationError::ClosureNotFound)?;
    if i2 < i1 + 1 + MIN_LAP_POINTS {
        return Err(GenerationError::ClosureNotFound);
    }

    let lap = &points[i1..i2 - 1];
    let gap = head_tail_gap(&lap[0], &lap[lap.len() - 1]);
    if gap > step {
        return Err(GenerationError::ClosureGap { gap, limit: step });
    }

    debug!(
        "Track generation: {}..{} -> {}-tiles track",
        i1,
        i2,
        i2 - i1
    );
    Ok(Track::from_points(lap))
}

/// Indices `(i1, i2)` of the two most recent points where `alpha` rises
/// through `start_alpha`, with `i1 < i2`.
fn find_closure_window(points: &[TrackPoint], start_alpha: f64) -> Option<(usize, usize)> {
    let mut crossings = (1..points.len())
        .rev()
        .filter(|&i| points[i].alpha > start_alpha && points[i - 1].alpha <= start_alpha);
    let i2 = crossings.next()?;
    let i1 = crossings.next()?;
    Some((i1, i2))
}

/// Displacement between `head` and `tail`, weighted per axis by the head's
/// lateral direction.
fn head_tail_gap(head: &TrackPoint, tail: &TrackPoint) -> f64 {
    let lateral = head.lateral();
    let d = head.position - tail.position;
    (lateral.x * d.x).hypot(lateral.y * d.y)
}

/// Head/tail gap of an extracted track: segment 0 runs from the lap's last
/// point to its first.
pub fn closure_gap(track: &Track) -> f64 {
    debug_assert!(!track.is_empty());
    let seam = &track[0];
    head_tail_gap(&seam.end, &seam.start)
}
