//! Turns a [`TrackLayout`] into physics tiles and render polygons.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::generator::{
    GeneratorConfig, Polygon, Quad, Rgb, TrackLayout, border_flags, border_polygons,
    obstacle_polygons,
};

pub const ROAD_COLOR: Rgb = [0.4, 0.4, 0.4];
pub const GRASS_COLOR: Rgb = [0.4, 0.8, 0.4];
pub const GRASS_CHECKER_COLOR: Rgb = [0.4, 0.9, 0.4];
const LOOP_END_COLOR: Rgb = [0.0, 1.0, 0.0];
const INTERSECTION_COLOR: Rgb = [1.0, 0.0, 0.0];
const AXIS_COLOR: Rgb = [0.0, 0.0, 0.0];

/// Checker squares per half side of the playfield.
const CHECKER_CELLS: i32 = 20;

/// Optional debug markers, passed explicitly to scene construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugOverlay {
    /// Mark the end points of loop-boundary segments.
    pub show_loop_ends: bool,
    /// Mark primary segments flagged `near_intersection`.
    pub show_intersections: bool,
    /// Draw the world x and y axes.
    pub show_axis: bool,
}

/// Static sensor body for one lane of one segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadTile {
    /// Global segment index; contacts report back through it.
    pub segment: usize,
    pub lane: usize,
    pub vertices: Quad,
    pub has_obstacle: bool,
    pub friction: f64,
}

/// Everything the physics and rendering collaborators need for one layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackScene {
    pub tiles: Vec<RoadTile>,
    /// Draw order: background, borders, road and obstacles, debug markers.
    pub polygons: Vec<Polygon>,
}

pub fn build_scene(
    layout: &TrackLayout,
    config: &GeneratorConfig,
    overlay: &DebugOverlay,
) -> TrackScene {
    let mut scene = TrackScene {
        polygons: background_polygons(config.playfield),
        ..Default::default()
    };

    for (track_id, track) in layout.tracks().tracks().iter().enumerate() {
        let flags = border_flags(track, config.turn_rate, config.border_min_count);
        let info = &layout.info()[layout.track_range(track_id)];
        scene.polygons.extend(border_polygons(
            track,
            &flags,
            info,
            config.track_width,
            config.border_width,
        ));
    }

    for (j, si) in layout.info().iter().enumerate() {
        for lane in (0..si.lanes.count()).filter(|&l| si.lanes.is_present(l)) {
            let vertices = lane_quad(layout, j, lane, config.track_width);
            scene.tiles.push(RoadTile {
                segment: j,
                lane,
                vertices,
                has_obstacle: si.has_obstacle,
                friction: 1.0,
            });
            scene.polygons.push(Polygon::new(vertices, ROAD_COLOR));
        }
        if si.has_obstacle {
            scene
                .polygons
                .extend(obstacle_polygons(layout.segment(j), config.track_width));
        }
    }

    scene
        .polygons
        .extend(debug_polygons(layout, config.playfield, overlay));
    scene
}

/// Quad of `lane` on segment `j`.
///
/// A single lane spans both sides of the centre line; with two lanes, lane 0
/// covers the left half and lane 1 the right. Where the neighbouring segment
/// of the same track lacks this lane, the tile narrows to the centre line at
/// that end.
fn lane_quad(layout: &TrackLayout, j: usize, lane: usize, width: f64) -> Quad {
    let seg = layout.segment(j);
    let num_lanes = layout.info()[j].lanes.count();
    let right = (1 - (lane + 1) % num_lanes) as f64 * width;
    let left = (1 - (lane + 2) % num_lanes) as f64 * width;

    let has_lane = |k: usize| layout.info()[k].lanes.is_present(lane);
    let first = !has_lane(layout.track_neighbor(j, -1));
    let last = !has_lane(layout.track_neighbor(j, 1));
    let end_scale = if last { 0.0 } else { 1.0 };
    let start_scale = if first { 0.0 } else { 1.0 };

    [
        seg.end.offset(-end_scale * left),
        seg.end.offset(end_scale * right),
        seg.start.offset(start_scale * right),
        seg.start.offset(-start_scale * left),
    ]
}

/// Grass base over the whole playfield plus a lighter checker pattern.
fn background_polygons(playfield: f64) -> Vec<Polygon> {
    let p = playfield;
    let mut polygons = vec![Polygon::new(
        [
            Point2::new(-p, p),
            Point2::new(p, p),
            Point2::new(p, -p),
            Point2::new(-p, -p),
        ],
        GRASS_COLOR,
    )];
    let k = playfield / CHECKER_CELLS as f64;
    for x in (-CHECKER_CELLS..CHECKER_CELLS).step_by(2) {
        for y in (-CHECKER_CELLS..CHECKER_CELLS).step_by(2) {
            let (x, y) = (k * x as f64, k * y as f64);
            polygons.push(Polygon::new(
                [
                    Point2::new(x + k, y),
                    Point2::new(x, y),
                    Point2::new(x, y + k),
                    Point2::new(x + k, y + k),
                ],
                GRASS_CHECKER_COLOR,
            ));
        }
    }
    polygons
}

fn debug_polygons(layout: &TrackLayout, playfield: f64, overlay: &DebugOverlay) -> Vec<Polygon> {
    let mut polygons = Vec::new();
    for (j, si) in layout.info().iter().enumerate() {
        let end = layout.segment(j).end.position;
        if overlay.show_loop_ends && si.is_loop_boundary() {
            polygons.push(Polygon::square(end, 2.0, LOOP_END_COLOR));
        }
        if overlay.show_intersections && si.near_intersection {
            polygons.push(Polygon::square(end, 1.0, INTERSECTION_COLOR));
        }
    }
    if overlay.show_axis {
        let p = playfield;
        polygons.push(Polygon::new(
            [
                Point2::new(-p, 2.0),
                Point2::new(p, 2.0),
                Point2::new(p, -2.0),
                Point2::new(-p, -2.0),
            ],
            AXIS_COLOR,
        ));
        polygons.push(Polygon::new(
            [
                Point2::new(2.0, -p),
                Point2::new(2.0, p),
                Point2::new(-2.0, p),
                Point2::new(-2.0, -p),
            ],
            AXIS_COLOR,
        ));
    }
    polygons
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{SegmentInfo, Track, TrackPoint, TrackSet};
    use approx::assert_relative_eq;

    const BACKGROUND: usize = 1 + 20 * 20;

    fn straight_layout(num_lanes: usize) -> TrackLayout {
        let points: Vec<_> = (0..8)
            .map(|k| TrackPoint::new(0.0, 0.0, 0.0, 3.5 * k as f64))
            .collect();
        let tracks = TrackSet::new(vec![Track::from_points(&points)]);
        let info = (0..8).map(|_| SegmentInfo::new(0, num_lanes)).collect();
        TrackLayout::new(tracks, info)
    }

    fn layout_with(info: Vec<SegmentInfo>) -> TrackLayout {
        let base = straight_layout(info[0].lanes.count());
        TrackLayout::new(base.tracks().clone(), info)
    }

    #[test]
    fn test_single_lane_tiles_span_both_sides() {
        let layout = straight_layout(1);
        let config = GeneratorConfig::default();
        let scene = build_scene(&layout, &config, &DebugOverlay::default());

        assert_eq!(scene.tiles.len(), 8);
        assert_eq!(scene.polygons.len(), BACKGROUND + 8);
        let tile = scene.tiles[3];
        let w = config.track_width;
        assert_relative_eq!(tile.vertices[0].x, -w);
        assert_relative_eq!(tile.vertices[1].x, w);
        assert_relative_eq!(tile.friction, 1.0);
    }

    #[test]
    fn test_two_lanes_split_at_centre() {
        let layout = straight_layout(2);
        let config = GeneratorConfig::default();
        let scene = build_scene(&layout, &config, &DebugOverlay::default());

        assert_eq!(scene.tiles.len(), 16);
        let left = scene.tiles.iter().find(|t| t.segment == 2 && t.lane == 0).unwrap();
        let right = scene.tiles.iter().find(|t| t.segment == 2 && t.lane == 1).unwrap();
        assert_relative_eq!(left.vertices[0].x, -config.track_width);
        assert_relative_eq!(left.vertices[1].x, 0.0);
        assert_relative_eq!(right.vertices[0].x, 0.0);
        assert_relative_eq!(right.vertices[1].x, config.track_width);
    }

    #[test]
    fn test_lane_tapers_next_to_missing_lane() {
        let mut info: Vec<_> = (0..8).map(|_| SegmentInfo::new(0, 2)).collect();
        info[4].lanes.remove(1);
        let layout = layout_with(info);
        let scene = build_scene(&layout, &GeneratorConfig::default(), &DebugOverlay::default());

        assert_eq!(scene.tiles.len(), 15);
        let before = scene.tiles.iter().find(|t| t.segment == 3 && t.lane == 1).unwrap();
        // The end point of segment 3 collapses to the centre line.
        assert_relative_eq!(before.vertices[1].x, 0.0);
        assert!(before.vertices[2].x > 0.0);
    }

    #[test]
    fn test_obstacles_and_overlay() {
        let mut info: Vec<_> = (0..8).map(|_| SegmentInfo::new(0, 1)).collect();
        info[2].has_obstacle = true;
        info[5].is_loop_end = true;
        info[1].near_intersection = true;
        let layout = layout_with(info);
        let overlay = DebugOverlay {
            show_loop_ends: true,
            show_intersections: true,
            show_axis: true,
        };
        let scene = build_scene(&layout, &GeneratorConfig::default(), &overlay);

        assert!(scene.tiles[2].has_obstacle);
        assert_eq!(scene.polygons.len(), BACKGROUND + 8 + 2 + 4);
        let obstacles = scene
            .polygons
            .iter()
            .filter(|p| p.color == crate::generator::OBSTACLE_COLOR)
            .count();
        assert_eq!(obstacles, 2);
    }
}
