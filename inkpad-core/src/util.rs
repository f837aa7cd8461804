//! Utility types, used throughout the crate.

/// A float which is finite (non-NaN, non-infinite).
#[derive(Copy, Clone, PartialEq, PartialOrd, bytemuck::NoUninit, bytemuck::Zeroable, Debug)]
#[repr(transparent)]
pub struct FiniteF32(f32);
impl FiniteF32 {
    pub fn new(val: f32) -> Result<Self, FloatError> {
        if val.is_finite() {
            Ok(Self(val))
        } else {
            Err(FloatError::NotFinite)
        }
    }
    #[must_use]
    pub fn get(self) -> f32 {
        self.0
    }
}

/// A float which is finite and strictly greater than zero. Used for stroke widths.
#[derive(Copy, Clone, PartialEq, PartialOrd, bytemuck::NoUninit, bytemuck::Zeroable, Debug)]
#[repr(transparent)]
pub struct PositiveF32(f32);
impl PositiveF32 {
    pub const ONE: Self = Self(1.0);
    pub const TWO: Self = Self(2.0);
    pub fn new(val: f32) -> Result<Self, FloatError> {
        let finite = FiniteF32::new(val)?.get();
        if finite > 0.0 {
            Ok(Self(finite))
        } else {
            Err(FloatError::NotPositive)
        }
    }
    #[must_use]
    pub fn get(self) -> f32 {
        self.0
    }
}
// Serialized as a plain number, validated on the way back in.
impl serde::Serialize for PositiveF32 {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f32(self.0)
    }
}
impl<'de> serde::Deserialize<'de> for PositiveF32 {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = f32::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatError {
    #[error("not finite")]
    NotFinite,
    #[error("not greater than zero")]
    NotPositive,
}

/// Round to the nearest integer, ties to even.
///
/// Pixel snapping throughout the rasterizer uses this, so a stamp centered at `2.5`
/// lands on pixel 2 and one at `3.5` lands on pixel 4.
#[must_use]
pub fn round_to_pixel(val: f32) -> i64 {
    // Saturates, NaN becomes 0.
    val.round_ties_even() as i64
}

#[cfg(test)]
mod test {
    use super::{round_to_pixel, FiniteF32, FloatError, PositiveF32};
    #[test]
    fn finite() {
        assert_eq!(FiniteF32::new(f32::NAN), Err(FloatError::NotFinite));
        assert_eq!(FiniteF32::new(f32::INFINITY), Err(FloatError::NotFinite));
        assert_eq!(FiniteF32::new(-3.5).map(FiniteF32::get), Ok(-3.5));
    }
    #[test]
    fn positive() {
        assert_eq!(PositiveF32::new(0.0), Err(FloatError::NotPositive));
        assert_eq!(PositiveF32::new(-1.0), Err(FloatError::NotPositive));
        assert_eq!(PositiveF32::new(f32::NAN), Err(FloatError::NotFinite));
        assert_eq!(PositiveF32::new(2.0).map(PositiveF32::get), Ok(2.0));
    }
    #[test]
    fn ties_to_even() {
        assert_eq!(round_to_pixel(2.5), 2);
        assert_eq!(round_to_pixel(3.5), 4);
        assert_eq!(round_to_pixel(-0.5), 0);
        assert_eq!(round_to_pixel(4.6), 5);
    }
}
