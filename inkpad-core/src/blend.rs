//! # Compositing
//!
//! The single blend operator used by every write to the pixel buffer.

use crate::color::Color;

/// Resulting alpha below this is treated as fully transparent.
pub const ALPHA_EPSILON: f32 = 1e-6;

/// Composite straight-alpha `src` over straight-alpha `dst`.
///
/// `out.a = src.a + dst.a * (1 - src.a)`, and the color channels are the alpha-weighted
/// sum divided back out by `out.a`. If the result is (near) fully transparent the pixel
/// is cleared to [`Color::TRANSPARENT`].
///
/// Associative but not commutative - order of stamps matters.
///
/// Both inputs are clamped into `[0, 1]` first, so the result always is too.
#[must_use]
pub fn over(dst: Color, src: Color) -> Color {
    let (dst, src) = (dst.clamped(), src.clamped());
    // Contributes nothing, leave dst bit-exact.
    if src.a <= 0.0 {
        return dst;
    }
    let dst_weight = dst.a * (1.0 - src.a);
    let a = src.a + dst_weight;
    if a < ALPHA_EPSILON {
        return Color::TRANSPARENT;
    }
    let mix = |s: f32, d: f32| (s * src.a + d * dst_weight) / a;
    // Rounding may overshoot by an ulp.
    Color {
        r: mix(src.r, dst.r),
        g: mix(src.g, dst.g),
        b: mix(src.b, dst.b),
        a,
    }
    .clamped()
}
