//! Red/white safety borders along sustained sharp turns.

use crate::generator::geometry::{Polygon, Rgb, Track};
use crate::generator::layout::SegmentInfo;

pub const BORDER_LIGHT: Rgb = [1.0, 1.0, 1.0];
pub const BORDER_DARK: Rgb = [1.0, 0.0, 0.0];

/// Segments that end a run of `min_count` sharp turns in the same direction.
///
/// A turn is sharp when its heading change exceeds `0.2 * turn_rate`. The
/// window wraps around the loop; segment 0 is never flagged.
pub fn sharp_turns(track: &Track, turn_rate: f64, min_count: usize) -> Vec<bool> {
    let threshold = 0.2 * turn_rate;
    let mut flags = vec![false; track.len()];
    for (i, flag) in flags.iter_mut().enumerate().skip(1) {
        let changes: Vec<f64> = (0..min_count)
            .map(|back| track.wrapped(i, -(back as isize)).heading_change())
            .collect();
        let sharp = changes.iter().all(|d| d.abs() > threshold);
        let one_side = changes.iter().all(|&d| d > 0.0) || changes.iter().all(|&d| d < 0.0);
        *flag = sharp && one_side;
    }
    flags
}

/// Sharp-turn flags extended backward over the whole window, so the border
/// covers the entire turn rather than its last sample.
pub fn border_flags(track: &Track, turn_rate: f64, min_count: usize) -> Vec<bool> {
    let raw = sharp_turns(track, turn_rate, min_count);
    let n = raw.len();
    let mut flags = raw.clone();
    for i in (0..n).filter(|&i| raw[i]) {
        for back in 1..min_count {
            flags[(i + n * min_count - back) % n] = true;
        }
    }
    flags
}

/// Border strips for one track, on the outside edge of each flagged turn.
///
/// `info` is the track's own slice of the segment metadata. When the lane
/// on the border's side is missing, the strip hugs the centre line. Strips
/// alternate colour with segment parity.
pub fn border_polygons(
    track: &Track,
    flags: &[bool],
    info: &[SegmentInfo],
    track_width: f64,
    border_width: f64,
) -> Vec<Polygon> {
    debug_assert_eq!(track.len(), info.len());
    let mut polygons = Vec::new();
    for (i, seg) in track.segments().iter().enumerate() {
        if !flags[i] {
            continue;
        }
        let change = seg.heading_change();
        if change == 0.0 {
            continue;
        }
        let side = -change.signum();

        let lanes = &info[i].lanes;
        let inner = if lanes.count() > 1
            && ((side < 0.0 && !lanes.is_present(0)) || (side > 0.0 && !lanes.is_present(1)))
        {
            0.0
        } else {
            track_width
        };
        let outer = inner + border_width;

        let color = if i % 2 == 0 { BORDER_LIGHT } else { BORDER_DARK };
        polygons.push(Polygon::new(
            [
                seg.end.offset(side * inner),
                seg.end.offset(side * outer),
                seg.start.offset(side * outer),
                seg.start.offset(side * inner),
            ],
            color,
        ));
    }
    polygons
}
