use crate::shape::{Shape, ShapeID};

/// The ordered list of committed shapes. Paint order is list order - later shapes are on top.
///
/// Cloning a document is a deep copy, which is exactly what a history snapshot is.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Document {
    shapes: Vec<Shape>,
}
impl Document {
    #[must_use]
    pub fn new(shapes: Vec<Shape>) -> Self {
        Self { shapes }
    }
    /// Shapes, back to front.
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }
    /// Iterate shapes front to back, the order hit testing considers them in.
    pub fn iter_topmost_first(&self) -> impl Iterator<Item = &Shape> + '_ {
        self.shapes.iter().rev()
    }
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
    /// Find the paint-order index of a shape.
    #[must_use]
    pub fn position(&self, id: ShapeID) -> Option<usize> {
        self.shapes.iter().position(|shape| shape.id == id)
    }
    #[must_use]
    pub fn get(&self, id: ShapeID) -> Option<&Shape> {
        self.shapes.iter().find(|shape| shape.id == id)
    }
    #[must_use]
    pub fn get_mut(&mut self, id: ShapeID) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|shape| shape.id == id)
    }
    /// Insert a new shape on top of everything else.
    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }
    /// Remove a shape, returning it. `None` if not found.
    pub fn remove(&mut self, id: ShapeID) -> Option<Shape> {
        let idx = self.position(id)?;
        Some(self.shapes.remove(idx))
    }
    /// Move a shape to the end of the paint order (topmost). Returns false if not found.
    pub fn bring_to_front(&mut self, id: ShapeID) -> bool {
        let Some(idx) = self.position(id) else {
            return false;
        };
        self.shapes[idx..].rotate_left(1);
        true
    }
    /// Move a shape to the start of the paint order (bottommost). Returns false if not found.
    pub fn send_to_back(&mut self, id: ShapeID) -> bool {
        let Some(idx) = self.position(id) else {
            return false;
        };
        self.shapes[..=idx].rotate_right(1);
        true
    }
    /// Remove every shape.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }
    /// Swap in another shape list wholesale, returning the old one.
    pub fn replace(&mut self, shapes: Vec<Shape>) -> Vec<Shape> {
        std::mem::replace(&mut self.shapes, shapes)
    }
    /// Deep copy of the shape list.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Shape> {
        self.shapes.clone()
    }
}
