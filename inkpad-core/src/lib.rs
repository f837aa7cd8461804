pub mod blend;
pub mod canvas;
pub mod color;
pub mod commands;
pub mod hit;
pub mod history;
pub mod id;
pub mod io;
pub mod raster;
pub mod scene;
pub mod session;
pub mod shape;
pub mod state;
pub mod transform;
pub mod util;

pub use id::InkID;

/// A position in document space: origin bottom-left, +Y up, one unit per pixel.
pub type Point = ultraviolet::Vec2;
