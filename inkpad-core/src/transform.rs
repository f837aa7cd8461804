//! # Coordinate spaces
//!
//! Document (and canvas) space has its origin at the bottom-left with +Y up. Device space (host
//! windows) and markup space (SVG) both have the origin at the top-left with +Y down.
//!
//! The conversion between the two is a reflection about the canvas's horizontal midline, and
//! it happens in exactly two places: when the host hands in device positions, and when the
//! vector exporter writes coordinates out. Nowhere else should flip.

use crate::Point;

/// Reflect a Y coordinate between y-up and y-down spaces of the given height.
/// This is its own inverse.
#[must_use]
pub fn flip_y(height: f32, y: f32) -> f32 {
    height - y
}

/// Convert a top-left-origin device position into document space.
#[must_use]
pub fn device_to_document(height: f32, device: Point) -> Point {
    Point::new(device.x, flip_y(height, device.y))
}

/// Convert a document position into top-left-origin markup space.
#[must_use]
pub fn document_to_markup(height: f32, document: Point) -> Point {
    Point::new(document.x, flip_y(height, document.y))
}

#[cfg(test)]
mod test {
    use super::{device_to_document, document_to_markup, flip_y};
    use crate::Point;
    #[test]
    fn involution() {
        for y in [0.0, 12.5, 100.0, -3.0] {
            assert_eq!(flip_y(100.0, flip_y(100.0, y)), y);
        }
        let p = Point::new(7.0, 30.0);
        assert_eq!(document_to_markup(64.0, device_to_document(64.0, p)), p);
    }
    #[test]
    fn corners() {
        // Top-left of a window is the top-left of the canvas, which is y == height in document space.
        assert_eq!(
            device_to_document(100.0, Point::new(0.0, 0.0)),
            Point::new(0.0, 100.0)
        );
        assert_eq!(
            document_to_markup(100.0, Point::new(10.0, 50.0)),
            Point::new(10.0, 50.0)
        );
        assert_eq!(
            document_to_markup(100.0, Point::new(10.0, 10.0)),
            Point::new(10.0, 90.0)
        );
    }
}
