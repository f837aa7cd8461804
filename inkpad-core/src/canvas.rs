//! # Canvas
//!
//! The fixed-size pixel buffer being painted. Row 0 is the *bottom* row, matching document
//! space (origin bottom-left, +Y up).

use crate::color::Color;

/// Parameters a canvas is created from. Fixed for the life of an editing session.
#[derive(Copy, Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    pub width: u32,
    pub height: u32,
    /// Color every pixel is reset to by a clear or full redraw.
    pub background: Color,
}
impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            background: Color::TRANSPARENT,
        }
    }
}

/// Largest canvas, in pixels, that will be allocated (8192 x 8192).
pub const MAX_PIXELS: u64 = 1 << 26;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasError {
    #[error("canvas dimensions {0}x{1} must both be nonzero")]
    Empty(u32, u32),
    #[error("canvas dimensions {0}x{1} exceed the {MAX_PIXELS} pixel limit")]
    TooLarge(u32, u32),
}

#[derive(Clone, PartialEq, Debug)]
pub struct Canvas {
    width: u32,
    height: u32,
    /// Invariant: `pixels.len() == width * height`, row-major, bottom row first.
    pixels: Vec<Color>,
}
impl Canvas {
    /// Allocate a canvas filled with `background`, clamped into `[0, 1]`.
    pub fn new(width: u32, height: u32, background: Color) -> Result<Self, CanvasError> {
        if width == 0 || height == 0 {
            return Err(CanvasError::Empty(width, height));
        }
        let count = u64::from(width) * u64::from(height);
        if count > MAX_PIXELS {
            return Err(CanvasError::TooLarge(width, height));
        }
        let len = usize::try_from(count).map_err(|_| CanvasError::TooLarge(width, height))?;
        Ok(Self {
            width,
            height,
            pixels: vec![background.clamped(); len],
        })
    }
    pub fn from_settings(settings: &CanvasSettings) -> Result<Self, CanvasError> {
        Self::new(settings.width, settings.height, settings.background)
    }
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }
    /// All pixels, row-major, bottom row first.
    #[must_use]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }
    /// Fetch a pixel. `None` if out of bounds.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|idx| self.pixels[idx])
    }
    /// Composite `color` over the pixel at `(x, y)`. Writes outside the canvas are silently dropped.
    pub fn blend(&mut self, x: i32, y: i32, color: Color) {
        if let Some(idx) = self.index(x, y) {
            let dst = &mut self.pixels[idx];
            *dst = crate::blend::over(*dst, color);
        }
    }
    /// Overwrite every pixel with `background`, clamped into `[0, 1]`. No blending.
    pub fn clear(&mut self, background: Color) {
        self.pixels.fill(background.clamped());
    }
    /// Iterate rows from the top of the image down, as image encoders expect.
    pub fn rows_top_down(&self) -> impl Iterator<Item = &[Color]> + '_ {
        self.pixels.chunks_exact(self.width as usize).rev()
    }
    /// Count of pixels with nonzero alpha.
    #[must_use]
    pub fn painted_pixels(&self) -> usize {
        self.pixels.iter().filter(|p| p.is_visible()).count()
    }
}
