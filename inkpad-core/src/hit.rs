//! # Hit testing
//!
//! Decides which shape a pointer press selects. Tests are geometric, against the shape model,
//! never against pixels.

use crate::{
    raster::distance_point_to_segment,
    shape::{Geometry, Shape, ShapeID},
    state::Document,
    Point,
};

/// Minimum pick distance for open paths, so hairlines stay clickable.
pub const MIN_PATH_TOLERANCE: f32 = 2.0;

/// Distance within which a point counts as touching a line or freehand path of this width.
#[must_use]
pub fn path_tolerance(stroke_width: f32) -> f32 {
    (stroke_width * 0.6).max(MIN_PATH_TOLERANCE)
}

/// Does `point` touch `shape`?
///
/// * Rectangles hit anywhere in their bounding box, edges included.
/// * Circles hit within `radius + width / 2` of the center.
/// * Lines and freehand paths hit within [`path_tolerance`] of any segment.
///   A freehand path with fewer than two points has no segments and never hits.
#[must_use]
pub fn hit_test(point: Point, shape: &Shape) -> bool {
    match &shape.geometry {
        Geometry::Rectangle { corner, opposite } => {
            let min = corner.min_by_component(*opposite);
            let max = corner.max_by_component(*opposite);
            point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
        }
        Geometry::Circle { center, edge } => {
            let radius = (*edge - *center).mag();
            (point - *center).mag() <= radius + shape.style.stroke_width() * 0.5
        }
        Geometry::Line { start, end } => {
            distance_point_to_segment(point, *start, *end)
                <= path_tolerance(shape.style.stroke_width())
        }
        Geometry::Freehand(points) => {
            let tolerance = path_tolerance(shape.style.stroke_width());
            points
                .windows(2)
                .any(|pair| distance_point_to_segment(point, pair[0], pair[1]) <= tolerance)
        }
    }
}

/// Find the topmost shape under `point`, if any.
#[must_use]
pub fn pick(document: &Document, point: Point) -> Option<ShapeID> {
    document
        .iter_topmost_first()
        .find(|shape| hit_test(point, shape))
        .map(|shape| shape.id)
}
