//! Vector export.
//!
//! One root `<svg>`, one background `<rect>`, then one element per shape in paint order.
//! Coordinates are converted to SVG's y-down space via [`crate::transform`]; nothing else
//! about the geometry is changed.

use std::fmt::Write;

use crate::{
    color::{unorm_to_u8, Color},
    shape::{Geometry, Shape},
    state::Document,
    transform::{document_to_markup, flip_y},
};

/// `rgb(R,G,B)` with 8-bit channels. Alpha is emitted separately as an opacity attribute.
#[must_use]
pub fn rgb(color: Color) -> String {
    format!(
        "rgb({},{},{})",
        unorm_to_u8(color.r),
        unorm_to_u8(color.g),
        unorm_to_u8(color.b)
    )
}

/// Opacity clamped to `[0, 1]` with at most three decimals, trailing zeros trimmed.
#[must_use]
pub fn opacity(alpha: f32) -> String {
    let fixed = format!("{:.3}", alpha.clamp(0.0, 1.0));
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_owned()
}

fn stroke_attributes(shape: &Shape) -> String {
    let style = &shape.style;
    format!(
        "stroke=\"{}\" stroke-width=\"{}\" stroke-opacity=\"{}\"",
        rgb(style.stroke),
        style.stroke_width().max(1.0),
        opacity(style.stroke.a)
    )
}

fn fill_attributes(shape: &Shape) -> String {
    let fill = shape.style.fill;
    if fill.is_visible() {
        format!("fill=\"{}\" fill-opacity=\"{}\"", rgb(fill), opacity(fill.a))
    } else {
        "fill=\"none\"".to_owned()
    }
}

/// Write the element for one shape, or nothing for a freehand path too short to draw.
fn write_shape<W: Write>(out: &mut W, height: f32, shape: &Shape) -> std::fmt::Result {
    let stroke = stroke_attributes(shape);
    match &shape.geometry {
        Geometry::Rectangle { corner, opposite } => {
            let x = corner.x.min(opposite.x);
            let y = corner.y.min(opposite.y);
            let w = (opposite.x - corner.x).abs();
            let h = (opposite.y - corner.y).abs();
            // The bottom edge (y) flips to the top edge once the height is taken off.
            writeln!(
                out,
                "  <rect x=\"{x}\" y=\"{}\" width=\"{w}\" height=\"{h}\" {stroke} {} />",
                flip_y(height, y) - h,
                fill_attributes(shape)
            )
        }
        Geometry::Circle { center, edge } => {
            let r = (*edge - *center).mag();
            let c = document_to_markup(height, *center);
            writeln!(
                out,
                "  <circle cx=\"{}\" cy=\"{}\" r=\"{r}\" {stroke} {} />",
                c.x,
                c.y,
                fill_attributes(shape)
            )
        }
        Geometry::Line { start, end } => {
            let (a, b) = (
                document_to_markup(height, *start),
                document_to_markup(height, *end),
            );
            writeln!(
                out,
                "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" {stroke} fill=\"none\" />",
                a.x, a.y, b.x, b.y
            )
        }
        Geometry::Freehand(points) if points.len() >= 2 => {
            out.write_str("  <polyline points=\"")?;
            for point in points {
                let p = document_to_markup(height, *point);
                write!(out, "{},{} ", p.x, p.y)?;
            }
            writeln!(out, "\" {stroke} fill=\"none\" />")
        }
        Geometry::Freehand(_) => Ok(()),
    }
}

/// Write a full SVG document for a `width` x `height` canvas.
pub fn write_svg<W: Write>(
    mut out: W,
    width: u32,
    height: u32,
    background: Color,
    document: &Document,
) -> std::fmt::Result {
    writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
    )?;
    writeln!(
        out,
        "  <rect width=\"100%\" height=\"100%\" fill=\"{}\" fill-opacity=\"{}\" />",
        rgb(background),
        opacity(background.a)
    )?;
    let height_f = height as f32;
    for shape in document.shapes() {
        write_shape(&mut out, height_f, shape)?;
    }
    writeln!(out, "</svg>")
}

/// Render the document as an SVG string.
#[must_use]
pub fn to_svg(width: u32, height: u32, background: Color, document: &Document) -> String {
    let mut out = String::new();
    // Formatting into a `String` never fails.
    let _ = write_svg(&mut out, width, height, background, document);
    log::debug!("Exported {} shapes as svg", document.len());
    out
}

#[cfg(test)]
mod test {
    use super::{opacity, rgb, to_svg};
    use crate::{
        color::Color,
        shape::{Geometry, Shape, ShapeKind, Style},
        state::Document,
        util::PositiveF32,
        Point,
    };

    fn single(geometry: Geometry, style: Style) -> Document {
        Document::new(vec![Shape::new(geometry, style)])
    }
    /// Lines of the body, without the root and background.
    fn shape_lines(svg: &str) -> Vec<&str> {
        let lines: Vec<_> = svg.lines().collect();
        lines[2..lines.len() - 1].to_vec()
    }

    #[test]
    fn opacity_format() {
        assert_eq!(opacity(1.0), "1");
        assert_eq!(opacity(0.0), "0");
        assert_eq!(opacity(0.5), "0.5");
        assert_eq!(opacity(1.0 / 3.0), "0.333");
        assert_eq!(opacity(2.0), "1");
        assert_eq!(opacity(0.25), "0.25");
    }
    #[test]
    fn rgb_format() {
        assert_eq!(rgb(Color::rgba(1.0, 0.5, 0.0, 0.2)), "rgb(255,128,0)");
        assert_eq!(rgb(Color::rgba(-1.0, 3.0, 0.2, 1.0)), "rgb(0,255,51)");
    }
    #[test]
    fn rectangle_flips() {
        let doc = single(
            Geometry::from_two_points(
                ShapeKind::Rectangle,
                Point::new(10.0, 10.0),
                Point::new(50.0, 50.0),
            ),
            Style::default(),
        );
        let svg = to_svg(100, 100, Color::TRANSPARENT, &doc);
        assert_eq!(
            shape_lines(&svg),
            [
                "  <rect x=\"10\" y=\"50\" width=\"40\" height=\"40\" stroke=\"rgb(0,0,0)\" stroke-width=\"2\" stroke-opacity=\"1\" fill=\"none\" />"
            ]
        );
    }
    #[test]
    fn rectangle_literal_transform() {
        // Corners in any order, non-square canvas: y is `height - min_y - h`.
        let doc = single(
            Geometry::from_two_points(
                ShapeKind::Rectangle,
                Point::new(30.0, 70.0),
                Point::new(10.0, 20.0),
            ),
            Style::default(),
        );
        let svg = to_svg(200, 100, Color::TRANSPARENT, &doc);
        assert!(svg.contains("<rect x=\"10\" y=\"30\" width=\"20\" height=\"50\""), "{svg}");
    }
    #[test]
    fn document_frame() {
        let svg = to_svg(64, 32, Color::rgba(1.0, 1.0, 1.0, 0.5), &Document::default());
        assert_eq!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"64\" height=\"32\" viewBox=\"0 0 64 32\">\n\
             \x20 <rect width=\"100%\" height=\"100%\" fill=\"rgb(255,255,255)\" fill-opacity=\"0.5\" />\n\
             </svg>\n"
        );
    }
    #[test]
    fn circle_line_polyline() {
        let style = Style::new(
            Color::rgba(1.0, 0.0, 0.0, 0.5),
            Color::rgba(0.0, 0.0, 1.0, 1.0),
            PositiveF32::new(0.5).unwrap(),
        );
        let doc = Document::new(vec![
            Shape::new(
                Geometry::from_two_points(
                    ShapeKind::Circle,
                    Point::new(20.0, 30.0),
                    Point::new(23.0, 34.0),
                ),
                style,
            ),
            Shape::new(
                Geometry::from_two_points(
                    ShapeKind::Line,
                    Point::new(0.0, 0.0),
                    Point::new(10.5, 100.0),
                ),
                style,
            ),
            Shape::new(
                Geometry::Freehand(vec![
                    Point::new(1.0, 2.0),
                    Point::new(3.0, 4.0),
                    Point::new(5.0, 6.0),
                ]),
                style,
            ),
        ]);
        let svg = to_svg(100, 100, Color::TRANSPARENT, &doc);
        // Width floored at one.
        let stroke = "stroke=\"rgb(255,0,0)\" stroke-width=\"1\" stroke-opacity=\"0.5\"";
        assert_eq!(
            shape_lines(&svg),
            [
                format!("  <circle cx=\"20\" cy=\"70\" r=\"5\" {stroke} fill=\"rgb(0,0,255)\" fill-opacity=\"1\" />"),
                format!("  <line x1=\"0\" y1=\"100\" x2=\"10.5\" y2=\"0\" {stroke} fill=\"none\" />"),
                format!("  <polyline points=\"1,98 3,96 5,94 \" {stroke} fill=\"none\" />"),
            ]
        );
    }
    #[test]
    fn short_freehand_skipped() {
        let doc = single(
            Geometry::Freehand(vec![Point::new(4.0, 4.0)]),
            Style::default(),
        );
        let svg = to_svg(10, 10, Color::TRANSPARENT, &doc);
        assert!(shape_lines(&svg).is_empty());
        assert_eq!(svg.lines().count(), 3);
    }
}
