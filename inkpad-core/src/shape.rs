//! # Shapes
//!
//! A shape is one vector primitive plus the style it is drawn with. Geometry is stored in
//! document space (origin bottom-left, +Y up).

use crate::{color::Color, util::PositiveF32, Point};

pub type ShapeID = crate::InkID<Shape>;

/// What a pointer gesture does. Every mode other than [`ToolMode::Select`] creates a shape.
#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Debug,
    Default,
    strum::AsRefStr,
    strum::EnumIter,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ToolMode {
    #[default]
    Select,
    Freehand,
    Line,
    Rectangle,
    Circle,
}
impl ToolMode {
    /// The kind of shape this tool creates, or `None` for the selection tool.
    #[must_use]
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            Self::Select => None,
            Self::Freehand => Some(ShapeKind::Freehand),
            Self::Line => Some(ShapeKind::Line),
            Self::Rectangle => Some(ShapeKind::Rectangle),
            Self::Circle => Some(ShapeKind::Circle),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, strum::AsRefStr, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ShapeKind {
    Freehand,
    Line,
    Rectangle,
    Circle,
}

/// The stroke and fill of a shape, and the defaults for new shapes.
#[derive(Copy, Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Style {
    pub stroke: Color,
    /// A fill with zero alpha means "no fill".
    pub fill: Color,
    pub width: PositiveF32,
}
impl Style {
    /// Colors are clamped into `[0, 1]`.
    #[must_use]
    pub fn new(stroke: Color, fill: Color, width: PositiveF32) -> Self {
        Self {
            stroke: stroke.clamped(),
            fill: fill.clamped(),
            width,
        }
    }
    #[must_use]
    pub fn stroke_width(&self) -> f32 {
        self.width.get()
    }
}
impl Default for Style {
    fn default() -> Self {
        Self {
            stroke: Color::BLACK,
            fill: Color::TRANSPARENT,
            width: PositiveF32::TWO,
        }
    }
}

/// Geometry of a shape, each variant carrying exactly what it needs.
#[derive(Clone, PartialEq, Debug)]
pub enum Geometry {
    /// A polyline. May hold fewer than two points if the gesture never moved.
    Freehand(Vec<Point>),
    Line { start: Point, end: Point },
    /// Axis-aligned box between two opposite corners, in any order.
    Rectangle { corner: Point, opposite: Point },
    /// Circle centered at `center`, whose radius is the distance to `edge`.
    Circle { center: Point, edge: Point },
}
impl Geometry {
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Freehand(_) => ShapeKind::Freehand,
            Self::Line { .. } => ShapeKind::Line,
            Self::Rectangle { .. } => ShapeKind::Rectangle,
            Self::Circle { .. } => ShapeKind::Circle,
        }
    }
    /// Build the two-point geometry of `kind`. Freehand starts as the polyline `[a, b]`.
    #[must_use]
    pub fn from_two_points(kind: ShapeKind, a: Point, b: Point) -> Self {
        match kind {
            ShapeKind::Freehand => Self::Freehand(vec![a, b]),
            ShapeKind::Line => Self::Line { start: a, end: b },
            ShapeKind::Rectangle => Self::Rectangle {
                corner: a,
                opposite: b,
            },
            ShapeKind::Circle => Self::Circle { center: a, edge: b },
        }
    }
    /// All defining points, in order.
    #[must_use]
    pub fn points(&self) -> smallvec::SmallVec<[Point; 2]> {
        match self {
            Self::Freehand(points) => points.iter().copied().collect(),
            Self::Line { start: a, end: b }
            | Self::Rectangle {
                corner: a,
                opposite: b,
            }
            | Self::Circle { center: a, edge: b } => smallvec::smallvec![*a, *b],
        }
    }
    /// Translate every point by `delta`.
    pub fn translate(&mut self, delta: Point) {
        match self {
            Self::Freehand(points) => points.iter_mut().for_each(|p| *p += delta),
            Self::Line { start: a, end: b }
            | Self::Rectangle {
                corner: a,
                opposite: b,
            }
            | Self::Circle { center: a, edge: b } => {
                *a += delta;
                *b += delta;
            }
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct Shape {
    pub id: ShapeID,
    pub geometry: Geometry,
    pub style: Style,
}
impl Shape {
    /// Create a shape with a fresh ID.
    #[must_use]
    pub fn new(geometry: Geometry, style: Style) -> Self {
        Self {
            id: ShapeID::default(),
            geometry,
            style,
        }
    }
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }
}
