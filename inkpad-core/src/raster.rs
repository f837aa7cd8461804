//! # Primitive rasterizer
//!
//! Every stroke is built out of one brush tip: a filled disk, stamped through [`Canvas::blend`].
//! Lines are disks stamped at unit spacing, outlines are lines.
//!
//! Geometry may lie arbitrarily far off the canvas. Every loop here is bounded by the canvas
//! rather than by the size of the input: pixel loops are intersected with the canvas rectangle,
//! and lines only visit the stamps that can reach it.

use crate::{canvas::Canvas, color::Color, util::round_to_pixel, Point};

/// Smallest radius a stroke stamp may have, so that hairlines still cover a pixel.
pub const MIN_STAMP_RADIUS: f32 = 0.5;
/// Bounds on how many segments approximate a circle outline.
pub const CIRCLE_SEGMENTS_MIN: u32 = 32;
pub const CIRCLE_SEGMENTS_MAX: u32 = 256;

/// Blend `color` into every pixel with `dx² + dy² <= r²` around the pixel `(cx, cy)`.
/// Only the part of the disk overlapping the canvas is visited.
fn fill_disk(canvas: &mut Canvas, cx: i64, cy: i64, r: i64, color: Color) {
    if r < 0 {
        return;
    }
    let rr = i128::from(r) * i128::from(r);
    // Offsets that keep `c + d` within `0..size`.
    let span = |c: i64, size: u32| {
        let lo = (-r).max(c.saturating_neg());
        let hi = r.min((i64::from(size) - 1).saturating_sub(c));
        lo..=hi
    };
    let xs = span(cx, canvas.width());
    for dy in span(cy, canvas.height()) {
        let dy2 = i128::from(dy) * i128::from(dy);
        for dx in xs.clone() {
            if (i128::from(dx) * i128::from(dx)).saturating_add(dy2) <= rr {
                // In bounds by construction of the spans.
                canvas.blend((cx + dx) as i32, (cy + dy) as i32, color);
            }
        }
    }
}

/// Blend `color` into every pixel within `ceil(radius)` of `center`, snapped to the nearest pixel.
pub fn stamp_disk(canvas: &mut Canvas, center: Point, radius: f32, color: Color) {
    // Saturating casts: absurd radii or positions just cover (or miss) the whole canvas.
    let r = radius.ceil() as i64;
    fill_disk(
        canvas,
        round_to_pixel(center.x),
        round_to_pixel(center.y),
        r,
        color,
    );
}

/// Number of disks a line between `from` and `to` is made of, endpoints included:
/// `max(1, ceil(length)) + 1`, saturating for absurd lengths.
///
/// Only the ones that can touch the canvas are actually stamped.
#[must_use]
pub fn thick_line_stamps(from: Point, to: Point) -> u64 {
    let (from, to) = (widen(from), widen(to));
    let length = (to[0] - from[0]).hypot(to[1] - from[1]);
    (length.ceil() as u64).max(1).saturating_add(1)
}

fn widen(p: Point) -> [f64; 2] {
    [f64::from(p.x), f64::from(p.y)]
}

/// Parameter range `[t0, t1]` of `from + t * delta`, `t` in `[0, 1]`, that lies inside the box.
fn clip_segment(
    from: [f64; 2],
    delta: [f64; 2],
    min: [f64; 2],
    max: [f64; 2],
) -> Option<(f64, f64)> {
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for axis in 0..2 {
        let lo = min[axis] - from[axis];
        let hi = max[axis] - from[axis];
        let d = delta[axis];
        if d == 0.0 {
            if lo > 0.0 || hi < 0.0 {
                return None;
            }
        } else {
            let (a, b) = (lo / d, hi / d);
            let (enter, exit) = if d > 0.0 { (a, b) } else { (b, a) };
            t0 = t0.max(enter);
            t1 = t1.min(exit);
        }
    }
    (t0 <= t1).then_some((t0, t1))
}

/// Stamp disks of `radius` at `max(1, ceil(length)) + 1` evenly spaced points along the segment,
/// skipping every stamp too far away to touch the canvas.
fn stamp_segment(canvas: &mut Canvas, from: [f64; 2], to: [f64; 2], color: Color, radius: f32) {
    if !from.iter().chain(&to).all(|c| c.is_finite()) {
        log::trace!("Skipping non-finite segment {from:?} - {to:?}");
        return;
    }
    // Any stamp centered outside this box misses the canvas entirely.
    let reach = f64::from(radius).ceil() + 1.0;
    let min = [-reach, -reach];
    let max = [
        f64::from(canvas.width()) + reach,
        f64::from(canvas.height()) + reach,
    ];
    // The stamp positions are symmetric, so walk from whichever end is nearer the canvas,
    // where the interpolation is most precise.
    let middle = [(min[0] + max[0]) * 0.5, (min[1] + max[1]) * 0.5];
    let remoteness = |p: [f64; 2]| (p[0] - middle[0]).abs().max((p[1] - middle[1]).abs());
    let (from, to) = if remoteness(to) < remoteness(from) {
        (to, from)
    } else {
        (from, to)
    };
    let delta = [to[0] - from[0], to[1] - from[1]];
    let Some((t0, t1)) = clip_segment(from, delta, min, max) else {
        return;
    };
    // Kept as a float: the count of a very long line doesn't fit any integer, but only the
    // few stamps inside the box are ever visited.
    let steps = delta[0].hypot(delta[1]).ceil().max(1.0);
    let first = (t0 * steps).floor();
    let last = (t1 * steps).ceil().min(steps);
    // Stamps are at least half a pixel apart, so no more than this many fit in the box.
    let limit = 2.0 * (max[0] - min[0]).hypot(max[1] - min[1]) + 2.0;
    let count = (last - first).clamp(0.0, limit) as u64;
    for k in 0..=count {
        let t = (first + k as f64) / steps;
        let center = Point::new(
            (from[0] + delta[0] * t) as f32,
            (from[1] + delta[1] * t) as f32,
        );
        stamp_disk(canvas, center, radius, color);
    }
}

/// Stamp disks of radius `max(0.5, width / 2)` at unit spacing from `from` to `to`, inclusive.
///
/// A zero-length line is still stamped (twice, at the same spot).
pub fn stamp_thick_line(canvas: &mut Canvas, from: Point, to: Point, color: Color, width: f32) {
    let radius = (width * 0.5).max(MIN_STAMP_RADIUS);
    stamp_segment(canvas, widen(from), widen(to), color, radius);
}

/// Integer pixel bounds of the box spanned by two corners, as `(min, max)` inclusive.
#[must_use]
pub fn pixel_bounds(a: Point, b: Point) -> ([i64; 2], [i64; 2]) {
    (
        [
            round_to_pixel(a.x.min(b.x)),
            round_to_pixel(a.y.min(b.y)),
        ],
        [
            round_to_pixel(a.x.max(b.x)),
            round_to_pixel(a.y.max(b.y)),
        ],
    )
}

/// Fill (if `fill` is visible) and outline the axis-aligned box with opposite corners `a` and `b`.
pub fn fill_and_stroke_rect(
    canvas: &mut Canvas,
    a: Point,
    b: Point,
    stroke: Color,
    fill: Color,
    stroke_width: f32,
) {
    let ([x_min, y_min], [x_max, y_max]) = pixel_bounds(a, b);
    if fill.is_visible() {
        let (w, h) = (i64::from(canvas.width()), i64::from(canvas.height()));
        for y in y_min.max(0)..=y_max.min(h - 1) {
            for x in x_min.max(0)..=x_max.min(w - 1) {
                canvas.blend(x as i32, y as i32, fill);
            }
        }
    }
    let corners = [
        [x_min as f64, y_min as f64],
        [x_max as f64, y_min as f64],
        [x_max as f64, y_max as f64],
        [x_min as f64, y_max as f64],
    ];
    let radius = (stroke_width * 0.5).max(MIN_STAMP_RADIUS);
    for (i, &from) in corners.iter().enumerate() {
        let to = corners[(i + 1) % corners.len()];
        stamp_segment(canvas, from, to, stroke, radius);
    }
}

/// How many polygon edges approximate the outline of a circle of this radius.
#[must_use]
pub fn circle_segments(radius: f32) -> u32 {
    // Saturating float->int cast handles huge radii.
    ((radius * 6.0).ceil() as u32).clamp(CIRCLE_SEGMENTS_MIN, CIRCLE_SEGMENTS_MAX)
}

/// Fill (if `fill` is visible) and outline the circle centered at `center` passing through `edge`.
pub fn fill_and_stroke_circle(
    canvas: &mut Canvas,
    center: Point,
    edge: Point,
    stroke: Color,
    fill: Color,
    stroke_width: f32,
) {
    let (c, e) = (widen(center), widen(edge));
    // In f64 so far-apart points don't overflow to an infinite radius.
    let radius = (e[0] - c[0]).hypot(e[1] - c[1]);
    if fill.is_visible() {
        // Fill is anchored at the truncated center, unlike stamps which round.
        fill_disk(
            canvas,
            center.x as i64,
            center.y as i64,
            round_to_pixel(radius as f32),
            fill,
        );
    }

    let segments = circle_segments(radius as f32);
    let stamp_radius = (stroke_width * 0.5).max(MIN_STAMP_RADIUS);
    let on_circle = |angle: f64| [c[0] + angle.cos() * radius, c[1] + angle.sin() * radius];
    let mut prev = on_circle(0.0);
    for i in 1..=segments {
        let angle = (f64::from(i) / f64::from(segments)) * std::f64::consts::TAU;
        let next = on_circle(angle);
        stamp_segment(canvas, prev, next, stroke, stamp_radius);
        prev = next;
    }
}

/// Euclidean distance from `p` to the closed segment `a`-`b`.
/// A zero-length segment degrades to point-to-point distance.
#[must_use]
pub fn distance_point_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let ab = b - a;
    let denom = ab.mag_sq();
    if denom == 0.0 {
        return (p - a).mag();
    }
    let t = ((p - a).dot(ab) / denom).clamp(0.0, 1.0);
    (p - (a + ab * t)).mag()
}
