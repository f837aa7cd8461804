//! # State
//!
//! The document model: the ordered shape list that every raster and vector output is derived from.

pub mod document;
pub use document::Document;
