/// A straight (non-premultiplied) RGBA color, with channels nominally in `[0, 1]`.
///
/// Channels outside that range are clamped wherever a color enters the canvas or a style, so
/// every pixel of the buffer always has channels in `[0, 1]`.
#[repr(C)]
#[derive(
    Copy, Clone, PartialEq, Debug, Default, bytemuck::Pod, bytemuck::Zeroable, serde::Serialize, serde::Deserialize,
)]
#[allow(clippy::module_name_repetitions)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}
impl Color {
    /// Fully transparent black. Also the "no fill" sentinel.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);

    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
    /// Create a color, rejecting NaN or infinite channels and clamping the rest into `[0, 1]`.
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Result<Self, ColorError> {
        let color = Self::rgba(r, g, b, a);
        if color.as_array().iter().all(|c| c.is_finite()) {
            Ok(color.clamped())
        } else {
            Err(ColorError::NotFinite(color))
        }
    }
    /// Every channel clamped into `[0, 1]`. NaN channels become 0.
    #[must_use]
    pub fn clamped(self) -> Self {
        self.as_array()
            .map(|c| if c.is_nan() { 0.0 } else { c.clamp(0.0, 1.0) })
            .into()
    }
    #[must_use]
    pub fn from_rgba8([r, g, b, a]: [u8; 4]) -> Self {
        let unorm = |c: u8| f32::from(c) / 255.0;
        Self::rgba(unorm(r), unorm(g), unorm(b), unorm(a))
    }
    /// Quantize to 8 bits per channel, clamping out-of-range channels.
    #[must_use]
    pub fn to_rgba8(self) -> [u8; 4] {
        self.as_array().map(unorm_to_u8)
    }
    #[must_use]
    pub fn as_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
    /// Does this color contribute anything when composited?
    #[must_use]
    pub fn is_visible(self) -> bool {
        self.a > 0.0
    }
}
impl From<[f32; 4]> for Color {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self::rgba(r, g, b, a)
    }
}

/// Clamp to `[0, 1]` and scale to a byte, rounding to nearest.
#[must_use]
pub fn unorm_to_u8(c: f32) -> u8 {
    // NaN clamps to NaN, which `as` saturates to 0.
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum ColorError {
    #[error("color {0:?} has a non-finite channel")]
    NotFinite(Color),
}
