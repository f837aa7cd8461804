//! # Commands
//!
//! Every change to the document is named by a [`Command`]. The history stores the command
//! alongside the snapshot taken before it ran, so that undo and redo can say what they are
//! reverting.

use crate::shape::{ShapeID, ShapeKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// A drawing gesture finished and its shape was appended.
    Commit { target: ShapeID, kind: ShapeKind },
    /// A selected shape was dragged to a new position.
    Move(ShapeID),
    /// A shape's stroke, fill, or width changed.
    Restyle(ShapeID),
    BringToFront(ShapeID),
    SendToBack(ShapeID),
    Delete(ShapeID),
    /// Every shape was removed.
    Clear,
}
impl Command {
    /// The shape this command acted on, if it names exactly one.
    #[must_use]
    pub fn target(&self) -> Option<ShapeID> {
        match self {
            Self::Commit { target, .. }
            | Self::Move(target)
            | Self::Restyle(target)
            | Self::BringToFront(target)
            | Self::SendToBack(target)
            | Self::Delete(target) => Some(*target),
            Self::Clear => None,
        }
    }
}
impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Commit { target, kind } => write!(f, "commit {} {target}", kind.as_ref()),
            Self::Move(target) => write!(f, "move {target}"),
            Self::Restyle(target) => write!(f, "restyle {target}"),
            Self::BringToFront(target) => write!(f, "bring {target} to front"),
            Self::SendToBack(target) => write!(f, "send {target} to back"),
            Self::Delete(target) => write!(f, "delete {target}"),
            Self::Clear => f.write_str("clear"),
        }
    }
}
