//! # History
//!
//! Snapshot-based undo and redo. Before any change, a deep copy of the whole shape list is
//! pushed onto the undo stack and the redo stack is dropped. Undo and redo swap the live list
//! with the top of the respective stack, saving the live list onto the other.
//!
//! Both stacks are unbounded.

use crate::{commands::Command, shape::Shape, state::Document};

/// One saved state of the document, and the command that moved away from it.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub command: Command,
    pub shapes: Vec<Shape>,
}

#[derive(Clone, Debug, Default)]
pub struct History {
    undo: Vec<Snapshot>,
    redo: Vec<Snapshot>,
}
impl History {
    /// Save the pre-mutation state of `document`, about to be changed by `command`.
    /// Invalidates everything that could have been redone.
    pub fn record(&mut self, command: Command, document: &Document) {
        self.push(Snapshot {
            command,
            shapes: document.snapshot(),
        });
    }
    /// Push an already-taken snapshot. Used when the pre-mutation state had to be captured
    /// before the mutation was known to be complete, as with dragging.
    pub fn push(&mut self, snapshot: Snapshot) {
        log::trace!("Recording history for {}", snapshot.command);
        self.undo.push(snapshot);
        self.redo.clear();
    }
    /// Restore the most recent snapshot into `document`. Returns the command that was reverted,
    /// or `None` (leaving the document untouched) if there is nothing to undo.
    pub fn undo(&mut self, document: &mut Document) -> Option<Command> {
        let Snapshot { command, shapes } = self.undo.pop()?;
        let current = document.replace(shapes);
        self.redo.push(Snapshot {
            command,
            shapes: current,
        });
        log::debug!("Undid {command}");
        Some(command)
    }
    /// Re-apply the most recently undone state into `document`. Returns the command that was
    /// re-applied, or `None` if there is nothing to redo.
    pub fn redo(&mut self, document: &mut Document) -> Option<Command> {
        let Snapshot { command, shapes } = self.redo.pop()?;
        let current = document.replace(shapes);
        self.undo.push(Snapshot {
            command,
            shapes: current,
        });
        log::debug!("Redid {command}");
        Some(command)
    }
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
    #[must_use]
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }
    #[must_use]
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }
    /// The command the next undo would revert.
    #[must_use]
    pub fn peek_undo(&self) -> Option<Command> {
        self.undo.last().map(|snapshot| snapshot.command)
    }
    /// The command the next redo would re-apply.
    #[must_use]
    pub fn peek_redo(&self) -> Option<Command> {
        self.redo.last().map(|snapshot| snapshot.command)
    }
}
