//! Merges secondary loops into the primary one where they overlap.
//!
//! Where a secondary loop runs on top of the primary, the secondary's
//! segments are deleted so the two loops share one road surface. The
//! resolver works in four passes per secondary track:
//!
//! 1. candidates: secondary segments ending close to a primary end point,
//! 2. crossings: candidates whose neighbouring candidates are not contiguous,
//! 3. sections: the arcs of both loops from the end of one crossing to the
//!    start of the next,
//! 4. overlap: a section pair whose worst-case distance is small is deleted
//!    from the secondary.
//!
//! Passes repeat until nothing more is marked, so resolving an already
//! resolved set is a no-op.

use std::collections::BTreeSet;

use log::debug;
use nalgebra::Point2;
use ndarray::{Array2, Axis};

use crate::generator::geometry::{Track, TrackSet, distance_matrix};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionResolver {
    /// Secondary end points closer than this to the primary are candidates.
    candidate_radius: f64,
    /// Tolerance used to locate section bounds on a track.
    section_radius: f64,
    /// Sections whose worst-case distance is below this overlap.
    overlap_threshold: f64,
}

impl IntersectionResolver {
    pub fn new(track_width: f64) -> Self {
        Self {
            candidate_radius: track_width / 3.5,
            section_radius: track_width / 2.0,
            overlap_threshold: 2.0 * (2.0 * track_width),
        }
    }

    /// Delete overlapping secondary segments in place and drop secondary
    /// tracks that vanish entirely. Returns the number of deleted segments.
    pub fn resolve(&self, tracks: &mut TrackSet) -> usize {
        if tracks.num_tracks() < 2 {
            return 0;
        }

        let list = tracks.tracks_mut();
        let (primary, secondaries) = list.split_at_mut(1);
        let primary = &primary[0];
        debug_assert!(!primary.is_empty());

        let mut removed = 0;
        for (offset, secondary) in secondaries.iter_mut().enumerate() {
            let before = secondary.len();
            while !secondary.is_empty() {
                let marked = self.mark_overlaps(primary, secondary);
                if marked.is_empty() {
                    break;
                }
                secondary.remove_segments(&marked);
            }
            let deleted = before - secondary.len();
            if deleted > 0 {
                debug!(
                    "Track {}: removed {} of {} segments overlapping the primary",
                    offset + 1,
                    deleted,
                    before
                );
            }
            removed += deleted;
        }

        list.retain(|t| !t.is_empty());
        removed
    }

    /// Indices of `secondary` segments that overlap `primary`.
    pub fn mark_overlaps(&self, primary: &Track, secondary: &Track) -> BTreeSet<usize> {
        let candidates = self.candidates(primary, secondary);
        if candidates.is_empty() {
            return BTreeSet::new();
        }
        if candidates.len() == secondary.len() {
            // The whole loop lies on the primary.
            return candidates.into_iter().collect();
        }

        let crossings = crossings(secondary, &candidates);
        let n = crossings.len();
        if n < 2 {
            // A lone crossing bounds no arc.
            return BTreeSet::new();
        }
        let mut marked = BTreeSet::new();
        for i in 0..n {
            let from = secondary[crossings[(i + n - 1) % n]].end.position;
            let to = secondary[crossings[i]].start.position;

            let (Some(sec1), Some(sec2)) = (
                section(primary, &from, &to, self.section_radius),
                section(secondary, &from, &to, self.section_radius),
            ) else {
                continue;
            };

            let spread = max_min_distance(
                &sec1.iter().map(|&k| primary[k].end.position).collect::<Vec<_>>(),
                &sec2.iter().map(|&k| secondary[k].end.position).collect::<Vec<_>>(),
            );
            if spread < self.overlap_threshold {
                marked.extend(sec2);
            }
        }
        marked
    }

    /// Secondary segments whose end point lies within `candidate_radius` of
    /// any primary end point, in secondary order.
    fn candidates(&self, primary: &Track, secondary: &Track) -> Vec<usize> {
        let dists = distance_matrix(&secondary.end_points(), &primary.end_points());
        row_minima(&dists)
            .into_iter()
            .enumerate()
            .filter(|&(_, d)| d <= self.candidate_radius)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Candidates where the chain of contiguous candidates breaks on either side.
///
/// A long shared run yields only its two ends; an isolated candidate is a
/// crossing on its own.
fn crossings(secondary: &Track, candidates: &[usize]) -> Vec<usize> {
    let n = candidates.len();
    (0..n)
        .filter(|&i| {
            let prev = &secondary[candidates[(i + n - 1) % n]];
            let cur = &secondary[candidates[i]];
            let next = &secondary[candidates[(i + 1) % n]];
            !cur.follows(prev) || !next.follows(cur)
        })
        .map(|i| candidates[i])
        .collect()
}

/// Segments of `track` from the first one ending near `from` up to the
/// next one ending near `to`, scanning forward with wraparound for at
/// most two laps.
fn section(track: &Track, from: &Point2<f64>, to: &Point2<f64>, radius: f64) -> Option<Vec<usize>> {
    let n = track.len();
    let mut sec = Vec::new();
    let mut found = false;
    for pos in 0..2 * n {
        let i = pos % n;
        let end = &track[i].end.position;
        if nalgebra::distance(end, from) <= radius {
            found = true;
        }
        if found {
            sec.push(i);
            if nalgebra::distance(end, to) <= radius {
                break;
            }
        }
    }
    (!sec.is_empty()).then_some(sec)
}

/// For every point of `a`, its distance to the nearest point of `b`; the
/// largest of these.
fn max_min_distance(a: &[Point2<f64>], b: &[Point2<f64>]) -> f64 {
    row_minima(&distance_matrix(a, b))
        .into_iter()
        .fold(0.0, f64::max)
}

fn row_minima(dists: &Array2<f64>) -> Vec<f64> {
    dists
        .axis_iter(Axis(0))
        .map(|row| row.fold(f64::INFINITY, |m, &d| m.min(d)))
        .collect()
}
