//! # Session
//!
//! One editing session: the canvas, the document, its history, the selection, and the pointer
//! state machine that turns host pointer events into shapes.
//!
//! The host never touches any of these directly. It forwards pointer events (already in
//! document space - see [`crate::transform::device_to_document`]), style and tool changes, and
//! edit commands, and reads back the canvas or exports.
//!
//! Pointer states:
//! * `Idle`
//! * `Drawing` - a drawing tool is held down, building an in-progress shape.
//! * `Moving` - the select tool grabbed a shape and is dragging it.

use crate::{
    canvas::{Canvas, CanvasError, CanvasSettings},
    color::Color,
    commands::Command,
    history::{History, Snapshot},
    hit, raster, scene,
    shape::{Geometry, Shape, ShapeID, ShapeKind, Style, ToolMode},
    state::Document,
    util::PositiveF32,
    Point,
};

/// A shape being built by an active drawing gesture. Not part of the document until release.
#[derive(Clone, Debug, PartialEq)]
pub struct InProgress {
    pub kind: ShapeKind,
    /// Where the pointer went down.
    pub start: Point,
    /// Freehand only: every point visited so far, starting with `start`.
    pub trail: Vec<Point>,
    /// Style captured at pointer-down. Changes mid-gesture apply to the next shape.
    pub style: Style,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Drawing(InProgress),
    Moving {
        target: ShapeID,
        last: Point,
        /// The document as it was when the drag started, pushed to history on release.
        before: Vec<Shape>,
    },
}

pub struct Session {
    settings: CanvasSettings,
    canvas: Canvas,
    document: Document,
    history: History,
    selection: Option<ShapeID>,
    interaction: Interaction,
    tool: ToolMode,
    style: Style,
}
impl Session {
    /// Start a session with an empty document. The canvas is allocated once, here.
    pub fn new(settings: CanvasSettings) -> Result<Self, CanvasError> {
        let canvas = Canvas::from_settings(&settings)?;
        Ok(Self {
            settings,
            canvas,
            document: Document::default(),
            history: History::default(),
            selection: None,
            interaction: Interaction::Idle,
            tool: ToolMode::default(),
            style: Style::default(),
        })
    }
    #[must_use]
    pub fn settings(&self) -> &CanvasSettings {
        &self.settings
    }
    /// The pixel buffer, for display.
    #[must_use]
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }
    /// Raw pixels, bottom row first. See [`Canvas::rows_top_down`] for display order.
    #[must_use]
    pub fn pixels(&self) -> &[Color] {
        self.canvas.pixels()
    }
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }
    #[must_use]
    pub fn selection(&self) -> Option<ShapeID> {
        self.selection
    }
    #[must_use]
    pub fn selected_shape(&self) -> Option<&Shape> {
        self.document.get(self.selection?)
    }
    #[must_use]
    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }
    #[must_use]
    pub fn tool_mode(&self) -> ToolMode {
        self.tool
    }
    #[must_use]
    pub fn style(&self) -> Style {
        self.style
    }

    /// Set the style used by shapes created from now on.
    pub fn set_style(&mut self, stroke: Color, fill: Color, width: PositiveF32) {
        self.style = Style::new(stroke, fill, width);
    }
    /// Change the active tool. A gesture already in progress finishes with the tool it started with.
    pub fn set_tool_mode(&mut self, tool: ToolMode) {
        self.tool = tool;
    }

    /// Clear to the background and replay the whole document.
    pub fn redraw(&mut self) {
        scene::redraw(&mut self.canvas, &self.document, self.settings.background);
    }

    pub fn pointer_down(&mut self, pos: Point) {
        if !is_finite(pos) {
            log::warn!("Ignoring pointer down at non-finite position {pos:?}");
            return;
        }
        // A second press without a release abandons whatever was going on.
        self.abandon_gesture();

        let Some(kind) = self.tool.shape_kind() else {
            self.selection = hit::pick(&self.document, pos);
            if let Some(target) = self.selection {
                log::debug!("Selected {target}");
                self.interaction = Interaction::Moving {
                    target,
                    last: pos,
                    before: self.document.snapshot(),
                };
            }
            return;
        };
        self.interaction = Interaction::Drawing(InProgress {
            kind,
            start: pos,
            trail: if kind == ShapeKind::Freehand {
                vec![pos]
            } else {
                Vec::new()
            },
            style: self.style,
        });
    }

    pub fn pointer_drag(&mut self, pos: Point) {
        if !is_finite(pos) {
            log::warn!("Ignoring pointer drag at non-finite position {pos:?}");
            return;
        }
        match &mut self.interaction {
            Interaction::Idle => (),
            Interaction::Drawing(in_progress) => {
                // Only freehand previews, by stamping straight into the canvas.
                // The commit redraws from the document, so this never leaves a trace on its own.
                if in_progress.kind == ShapeKind::Freehand {
                    let last = in_progress.trail.last().copied().unwrap_or(in_progress.start);
                    raster::stamp_thick_line(
                        &mut self.canvas,
                        last,
                        pos,
                        in_progress.style.stroke,
                        in_progress.style.stroke_width(),
                    );
                    in_progress.trail.push(pos);
                }
            }
            Interaction::Moving { target, last, .. } => {
                let delta = pos - *last;
                *last = pos;
                let target = *target;
                if let Some(shape) = self.document.get_mut(target) {
                    shape.geometry.translate(delta);
                    self.redraw();
                }
            }
        }
    }

    pub fn pointer_up(&mut self, pos: Point) {
        if !is_finite(pos) {
            log::warn!("Ignoring pointer up at non-finite position {pos:?}");
            return;
        }
        match std::mem::take(&mut self.interaction) {
            Interaction::Idle => (),
            Interaction::Drawing(in_progress) => self.commit(in_progress, pos),
            Interaction::Moving { target, before, .. } => {
                self.history.push(Snapshot {
                    command: Command::Move(target),
                    shapes: before,
                });
            }
        }
    }

    /// Turn a finished gesture into a shape. Always commits, even if the result is degenerate.
    fn commit(&mut self, in_progress: InProgress, end: Point) {
        let InProgress {
            kind,
            start,
            trail,
            style,
        } = in_progress;
        let geometry = match kind {
            // The release point isn't part of the trail - drags already recorded where the pointer was.
            ShapeKind::Freehand => Geometry::Freehand(trail),
            _ => Geometry::from_two_points(kind, start, end),
        };
        let shape = Shape::new(geometry, style);
        self.history.record(
            Command::Commit {
                target: shape.id,
                kind,
            },
            &self.document,
        );
        log::debug!("Committed {} {}", kind.as_ref(), shape.id);

        if kind == ShapeKind::Freehand {
            // Throw away the live preview stamps.
            self.document.push(shape);
            self.redraw();
        } else {
            scene::draw_shape(&mut self.canvas, &shape);
            self.document.push(shape);
        }
    }

    /// Drop any in-progress gesture without committing it.
    fn abandon_gesture(&mut self) {
        match std::mem::take(&mut self.interaction) {
            Interaction::Idle => (),
            Interaction::Drawing(in_progress) => {
                if in_progress.kind == ShapeKind::Freehand && in_progress.trail.len() > 1 {
                    self.redraw();
                }
            }
            // Keep the drag that already happened, it's still undoable.
            Interaction::Moving { target, before, .. } => self.history.push(Snapshot {
                command: Command::Move(target),
                shapes: before,
            }),
        }
    }

    /// Revert the last change. No-op if there is nothing to undo.
    pub fn undo(&mut self) {
        self.abandon_gesture();
        if self.history.undo(&mut self.document).is_some() {
            self.selection = None;
            self.redraw();
        }
    }
    /// Re-apply the last undone change. No-op if there is nothing to redo.
    pub fn redo(&mut self) {
        self.abandon_gesture();
        if self.history.redo(&mut self.document).is_some() {
            self.selection = None;
            self.redraw();
        }
    }
    /// Remove every shape. Undoable.
    pub fn clear_document(&mut self) {
        self.abandon_gesture();
        self.history.record(Command::Clear, &self.document);
        self.document.clear();
        self.selection = None;
        self.redraw();
    }
    /// The current selection, if it still refers to a shape in the document.
    fn live_selection(&self) -> Option<ShapeID> {
        self.selection.filter(|&id| self.document.get(id).is_some())
    }
    pub fn delete_selected(&mut self) {
        let Some(target) = self.live_selection() else {
            return;
        };
        self.abandon_gesture();
        self.history.record(Command::Delete(target), &self.document);
        self.document.remove(target);
        self.selection = None;
        self.redraw();
    }
    pub fn bring_selected_to_front(&mut self) {
        let Some(target) = self.live_selection() else {
            return;
        };
        self.abandon_gesture();
        self.history
            .record(Command::BringToFront(target), &self.document);
        self.document.bring_to_front(target);
        self.redraw();
    }
    pub fn send_selected_to_back(&mut self) {
        let Some(target) = self.live_selection() else {
            return;
        };
        self.abandon_gesture();
        self.history
            .record(Command::SendToBack(target), &self.document);
        self.document.send_to_back(target);
        self.redraw();
    }
    /// Change the style of the selected shape. Setting the style it already has does nothing,
    /// and records no history.
    pub fn restyle_selected(&mut self, stroke: Color, fill: Color, width: PositiveF32) {
        let style = Style::new(stroke, fill, width);
        let Some(target) = self.live_selection() else {
            return;
        };
        if self
            .document
            .get(target)
            .is_some_and(|shape| shape.style == style)
        {
            return;
        }
        self.abandon_gesture();
        self.history.record(Command::Restyle(target), &self.document);
        if let Some(shape) = self.document.get_mut(target) {
            shape.style = style;
        }
        self.redraw();
    }

    /// PNG bytes of the canvas as it is now.
    pub fn export_raster(&self) -> Result<Vec<u8>, crate::io::ExportError> {
        crate::io::png::encode(&self.canvas)
    }
    /// SVG text of the document as it is now.
    #[must_use]
    pub fn export_vector(&self) -> String {
        crate::io::svg::to_svg(
            self.settings.width,
            self.settings.height,
            self.settings.background,
            &self.document,
        )
    }
}

fn is_finite(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}
