//! Per-segment metadata: track membership, loop boundaries, proximity to
//! intersections and lane presence.

use std::collections::BTreeSet;

use rand::Rng;

use crate::generator::geometry::TrackSet;
use crate::generator::lane::MAX_LANES;
use crate::generator::layout::SegmentInfo;

/// Build one [`SegmentInfo`] per segment of the concatenated set.
///
/// Loop boundaries are segments whose end points no longer meet their
/// neighbours, which only happens after the resolver deleted segments. The
/// primary segment nearest to each boundary is flagged `near_intersection`.
pub fn annotate(tracks: &TrackSet, num_lanes: usize) -> Vec<SegmentInfo> {
    let mut info = Vec::with_capacity(tracks.num_segments());
    for (track_id, track) in tracks.tracks().iter().enumerate() {
        debug_assert!(!track.is_empty(), "track {track_id} has no segments");
        for (j, seg) in track.segments().iter().enumerate() {
            let mut si = SegmentInfo::new(track_id, num_lanes);
            si.is_loop_end = !track.wrapped(j, 1).follows(seg);
            si.is_loop_start = !seg.follows(track.wrapped(j, -1));
            info.push(si);
        }
    }

    if let Some(primary) = tracks.primary() {
        let near: BTreeSet<usize> = tracks
            .segments()
            .zip(&info)
            .filter(|(_, si)| si.is_loop_boundary())
            .filter_map(|((_, seg), _)| primary.nearest_segment(&seg.end.position))
            .collect();
        // The primary track occupies the first global indices.
        for idx in near {
            info[idx].near_intersection = true;
        }
    }

    info
}

/// Randomly drop one of two lanes over stretches of the road.
///
/// `num_lane_changes` toggle points are drawn uniformly over all segments.
/// Each toggle flips lane removal on or off; turning it on picks which lane
/// goes. Removal is switched off at loop boundaries and at the end of every
/// track.
pub fn toggle_lanes<R: Rng + ?Sized>(
    info: &mut [SegmentInfo],
    num_lanes: usize,
    num_lane_changes: usize,
    rng: &mut R,
) {
    if num_lanes < 2 || num_lane_changes == 0 || info.is_empty() {
        return;
    }
    let len = info.len();
    let toggles: BTreeSet<usize> = (0..num_lane_changes)
        .map(|_| rng.random_range(0..len))
        .collect();
    apply_lane_toggles(info, &toggles, || rng.random_range(0..MAX_LANES));
}

fn apply_lane_toggles(
    info: &mut [SegmentInfo],
    toggles: &BTreeSet<usize>,
    mut pick_lane: impl FnMut() -> usize,
) {
    let mut removing = false;
    let mut lane = 0;
    for i in 0..info.len() {
        if toggles.contains(&i) {
            removing = !removing;
            if removing {
                lane = pick_lane();
            }
        }
        if removing {
            info[i].lanes.remove(lane);
        }
        let track_ends = info
            .get(i + 1)
            .is_none_or(|next| next.track_id != info[i].track_id);
        if info[i].is_loop_boundary() || track_ends {
            removing = false;
        }
    }
}
