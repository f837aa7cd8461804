//! # Scene rasterizer
//!
//! Rebuilds the canvas from the document. After any out-of-band change to the document (undo,
//! reorder, restyle, move...) this is the only way the canvas gets updated, so that at rest the
//! canvas is always a pure function of `(document, background)`.

use crate::{
    canvas::Canvas,
    color::Color,
    raster,
    shape::{Geometry, Shape},
    state::Document,
};

/// Rasterize one shape on top of the canvas' current contents.
pub fn draw_shape(canvas: &mut Canvas, shape: &Shape) {
    let style = &shape.style;
    let width = style.stroke_width();
    match &shape.geometry {
        Geometry::Freehand(points) => {
            for pair in points.windows(2) {
                raster::stamp_thick_line(canvas, pair[0], pair[1], style.stroke, width);
            }
        }
        Geometry::Line { start, end } => {
            raster::stamp_thick_line(canvas, *start, *end, style.stroke, width);
        }
        Geometry::Rectangle { corner, opposite } => {
            raster::fill_and_stroke_rect(canvas, *corner, *opposite, style.stroke, style.fill, width);
        }
        Geometry::Circle { center, edge } => {
            raster::fill_and_stroke_circle(canvas, *center, *edge, style.stroke, style.fill, width);
        }
    }
}

/// Clear to `background` and replay every shape in paint order.
pub fn redraw(canvas: &mut Canvas, document: &Document, background: Color) {
    canvas.clear(background);
    for shape in document.shapes() {
        draw_shape(canvas, shape);
    }
    log::trace!("Redrew {} shapes", document.len());
}

#[cfg(test)]
mod test {
    use super::{draw_shape, redraw};
    use crate::{
        canvas::Canvas,
        color::Color,
        shape::{Geometry, Shape, ShapeKind, Style},
        state::Document,
        util::PositiveF32,
        Point,
    };

    fn sample_document() -> Document {
        let translucent = Style::new(
            Color::rgba(0.2, 0.4, 0.9, 0.5),
            Color::rgba(0.9, 0.9, 0.1, 0.4),
            PositiveF32::new(3.0).unwrap(),
        );
        Document::new(vec![
            Shape::new(
                Geometry::from_two_points(
                    ShapeKind::Rectangle,
                    Point::new(5.0, 5.0),
                    Point::new(30.0, 25.0),
                ),
                translucent,
            ),
            Shape::new(
                Geometry::from_two_points(
                    ShapeKind::Circle,
                    Point::new(20.0, 20.0),
                    Point::new(28.0, 20.0),
                ),
                translucent,
            ),
            Shape::new(
                Geometry::Freehand(vec![
                    Point::new(1.0, 1.0),
                    Point::new(15.0, 40.0),
                    Point::new(40.0, 2.0),
                ]),
                Style::default(),
            ),
            Shape::new(
                Geometry::from_two_points(
                    ShapeKind::Line,
                    Point::new(0.0, 47.0),
                    Point::new(47.0, 0.0),
                ),
                translucent,
            ),
        ])
    }

    #[test]
    fn idempotent() {
        let doc = sample_document();
        let bg = Color::rgba(1.0, 1.0, 1.0, 0.25);
        let mut canvas = Canvas::new(48, 48, Color::TRANSPARENT).unwrap();
        redraw(&mut canvas, &doc, bg);
        let once = canvas.clone();
        redraw(&mut canvas, &doc, bg);
        assert_eq!(canvas, once);
    }
    #[test]
    fn independent_of_prior_contents() {
        let doc = sample_document();
        let mut dirty = Canvas::new(48, 48, Color::BLACK).unwrap();
        for i in 0..48 {
            dirty.blend(i, i, Color::WHITE);
        }
        let mut clean = Canvas::new(48, 48, Color::TRANSPARENT).unwrap();
        redraw(&mut dirty, &doc, Color::TRANSPARENT);
        redraw(&mut clean, &doc, Color::TRANSPARENT);
        assert_eq!(dirty, clean);
    }
    #[test]
    fn empty_document_is_background() {
        let mut canvas = Canvas::new(8, 8, Color::BLACK).unwrap();
        redraw(&mut canvas, &Document::default(), Color::WHITE);
        assert!(canvas.pixels().iter().all(|&p| p == Color::WHITE));
    }
    #[test]
    fn incremental_matches_full() {
        // Drawing shapes one by one on a cleared canvas is the same as a replay.
        let doc = sample_document();
        let mut incremental = Canvas::new(48, 48, Color::TRANSPARENT).unwrap();
        for shape in doc.shapes() {
            draw_shape(&mut incremental, shape);
        }
        let mut full = Canvas::new(48, 48, Color::BLACK).unwrap();
        redraw(&mut full, &doc, Color::TRANSPARENT);
        assert_eq!(incremental, full);
    }
    #[test]
    fn order_matters() {
        let red = Style::new(
            Color::rgba(1.0, 0.0, 0.0, 1.0),
            Color::TRANSPARENT,
            PositiveF32::new(4.0).unwrap(),
        );
        let blue = Style { stroke: Color::rgba(0.0, 0.0, 1.0, 1.0), ..red };
        let a = Shape::new(
            Geometry::from_two_points(ShapeKind::Line, Point::new(0.0, 8.0), Point::new(16.0, 8.0)),
            red,
        );
        let b = Shape::new(
            Geometry::from_two_points(ShapeKind::Line, Point::new(8.0, 0.0), Point::new(8.0, 16.0)),
            blue,
        );
        let mut canvas = Canvas::new(16, 16, Color::TRANSPARENT).unwrap();
        redraw(&mut canvas, &Document::new(vec![a.clone(), b.clone()]), Color::TRANSPARENT);
        assert_eq!(canvas.get(8, 8), Some(blue.stroke));
        redraw(&mut canvas, &Document::new(vec![b, a]), Color::TRANSPARENT);
        assert_eq!(canvas.get(8, 8), Some(red.stroke));
    }
}
