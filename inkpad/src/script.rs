//! # Gesture scripts
//!
//! A TOML list of host events, replayed in order against a [`Session`]. This stands in for a
//! window: each step is what a toolbar button, a key, or the pointer would have sent.
//!
//! ```toml
//! [canvas]
//! width = 100
//! height = 100
//!
//! [[step]]
//! op = "tool"
//! tool = "rectangle"
//! [[step]]
//! op = "down"
//! x = 10
//! y = 10
//! [[step]]
//! op = "up"
//! x = 50
//! y = 50
//! [[step]]
//! op = "export_svg"
//! path = "out.svg"
//! ```

use inkpad_core::{
    canvas::CanvasSettings,
    color::Color,
    io,
    session::Session,
    shape::{Style, ToolMode},
    transform, Point,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Tool {
        tool: ToolMode,
    },
    /// Style for shapes created from now on. Omitted fields take the defaults.
    Style(Style),
    /// Pointer events. Coordinates are in document space (y-up) unless `device` is set, in which
    /// case they're window pixels with y pointing down.
    Down {
        x: f32,
        y: f32,
        #[serde(default)]
        device: bool,
    },
    Drag {
        x: f32,
        y: f32,
        #[serde(default)]
        device: bool,
    },
    Up {
        x: f32,
        y: f32,
        #[serde(default)]
        device: bool,
    },
    Undo,
    Redo,
    Clear,
    Delete,
    BringToFront,
    SendToBack,
    Restyle(Style),
    Redraw,
    /// Paths are relative to the script's directory.
    ExportPng {
        path: std::path::PathBuf,
    },
    ExportSvg {
        path: std::path::PathBuf,
    },
}

#[derive(Clone, Debug, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Script {
    /// Overrides the canvas from the user's settings.
    #[serde(default)]
    pub canvas: Option<CanvasSettings>,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}
impl Script {
    pub fn parse(string: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(string)
    }
    pub fn read(path: &std::path::Path) -> anyhow::Result<Self> {
        let string = std::fs::read_to_string(path)?;
        Ok(Self::parse(&string)?)
    }
}

/// What came of replaying a script.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    pub steps: usize,
    pub failed: usize,
    pub exported: Vec<std::path::PathBuf>,
}

fn checked_style(style: Style) -> anyhow::Result<Style> {
    let check = |c: Color| Color::new(c.r, c.g, c.b, c.a);
    Ok(Style::new(check(style.stroke)?, check(style.fill)?, style.width))
}

fn position(session: &Session, x: f32, y: f32, device: bool) -> Point {
    let point = Point::new(x, y);
    if device {
        transform::device_to_document(session.settings().height as f32, point)
    } else {
        point
    }
}

/// Apply one step. Errors leave the session as it was.
pub fn apply(
    session: &mut Session,
    step: &Step,
    base_dir: &std::path::Path,
) -> anyhow::Result<Option<std::path::PathBuf>> {
    match *step {
        Step::Tool { tool } => session.set_tool_mode(tool),
        Step::Style(style) => {
            let style = checked_style(style)?;
            session.set_style(style.stroke, style.fill, style.width);
        }
        Step::Down { x, y, device } => {
            let pos = position(session, x, y, device);
            session.pointer_down(pos);
        }
        Step::Drag { x, y, device } => {
            let pos = position(session, x, y, device);
            session.pointer_drag(pos);
        }
        Step::Up { x, y, device } => {
            let pos = position(session, x, y, device);
            session.pointer_up(pos);
        }
        Step::Undo => session.undo(),
        Step::Redo => session.redo(),
        Step::Clear => session.clear_document(),
        Step::Delete => session.delete_selected(),
        Step::BringToFront => session.bring_selected_to_front(),
        Step::SendToBack => session.send_selected_to_back(),
        Step::Restyle(style) => {
            let style = checked_style(style)?;
            session.restyle_selected(style.stroke, style.fill, style.width);
        }
        Step::Redraw => session.redraw(),
        Step::ExportPng { ref path } => {
            let path = base_dir.join(path);
            let bytes = session.export_raster()?;
            io::write_path(&path, &bytes)?;
            return Ok(Some(path));
        }
        Step::ExportSvg { ref path } => {
            let path = base_dir.join(path);
            io::write_path(&path, session.export_vector().as_bytes())?;
            return Ok(Some(path));
        }
    }
    Ok(None)
}

/// Replay every step in order. A failed step is logged and skipped.
pub fn run(session: &mut Session, script: &Script, base_dir: &std::path::Path) -> Report {
    let mut report = Report {
        steps: script.steps.len(),
        ..Default::default()
    };
    for (idx, step) in script.steps.iter().enumerate() {
        match apply(session, step, base_dir) {
            Ok(Some(path)) => {
                log::info!("Exported {path:?}");
                report.exported.push(path);
            }
            Ok(None) => (),
            Err(e) => {
                log::error!("Step {idx} ({step:?}) failed: {e:#}");
                report.failed += 1;
            }
        }
    }
    report
}

#[cfg(test)]
mod test {
    use super::{run, Script, Step};
    use inkpad_core::{
        canvas::CanvasSettings,
        color::Color,
        session::Session,
        shape::{Geometry, ShapeKind, ToolMode},
        Point,
    };

    fn session_for(script: &Script) -> Session {
        Session::new(script.canvas.unwrap_or_default()).unwrap()
    }

    #[test]
    fn parses_steps() {
        let script = Script::parse(
            r#"
            [canvas]
            width = 64
            height = 32

            [[step]]
            op = "tool"
            tool = "freehand"
            [[step]]
            op = "style"
            stroke = { r = 1.0, g = 0.0, b = 0.0, a = 1.0 }
            width = 3
            [[step]]
            op = "down"
            x = 1
            y = 2.5
            [[step]]
            op = "up"
            x = 1
            y = 2
            device = true
            [[step]]
            op = "bring_to_front"
            [[step]]
            op = "export_svg"
            path = "a.svg"
            "#,
        )
        .unwrap();
        let canvas = script.canvas.unwrap();
        assert_eq!((canvas.width, canvas.height), (64, 32));
        assert_eq!(canvas.background, Color::TRANSPARENT);
        assert_eq!(script.steps.len(), 6);
        assert_eq!(
            script.steps[0],
            Step::Tool {
                tool: ToolMode::Freehand
            }
        );
        let Step::Style(style) = script.steps[1] else {
            panic!("expected style, got {:?}", script.steps[1]);
        };
        assert_eq!(style.stroke, Color::rgba(1.0, 0.0, 0.0, 1.0));
        assert_eq!(style.fill, Color::TRANSPARENT);
        assert_eq!(style.stroke_width(), 3.0);
        assert_eq!(
            script.steps[3],
            Step::Up {
                x: 1.0,
                y: 2.0,
                device: true
            }
        );
        assert_eq!(script.steps[4], Step::BringToFront);
    }
    #[test]
    fn rejects_unknown_op() {
        assert!(Script::parse("[[step]]\nop = \"paint\"\n").is_err());
    }
    #[test]
    fn replays_gestures() {
        let script = Script::parse(
            r#"
            [canvas]
            width = 100
            height = 100
            [[step]]
            op = "tool"
            tool = "line"
            [[step]]
            op = "down"
            x = 10
            y = 90
            device = true
            [[step]]
            op = "drag"
            x = 30
            y = 90
            device = true
            [[step]]
            op = "up"
            x = 50
            y = 90
            device = true
            [[step]]
            op = "undo"
            [[step]]
            op = "redo"
            "#,
        )
        .unwrap();
        let mut session = session_for(&script);
        let report = run(&mut session, &script, std::path::Path::new("."));
        assert_eq!(report.failed, 0);
        let shapes = session.document().shapes();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].kind(), ShapeKind::Line);
        // Device y=90 on a 100px canvas is document y=10.
        assert_eq!(
            shapes[0].geometry,
            Geometry::Line {
                start: Point::new(10.0, 10.0),
                end: Point::new(50.0, 10.0)
            }
        );
    }
    #[test]
    fn bad_steps_are_skipped() {
        let mut script = Script {
            canvas: Some(CanvasSettings {
                width: 16,
                height: 16,
                background: Color::TRANSPARENT,
            }),
            steps: Vec::new(),
        };
        script.steps.push(Step::Tool {
            tool: ToolMode::Rectangle,
        });
        script.steps.push(Step::Style(inkpad_core::shape::Style {
            stroke: Color::rgba(f32::NAN, 0.0, 0.0, 1.0),
            ..Default::default()
        }));
        script.steps.push(Step::Down {
            x: 2.0,
            y: 2.0,
            device: false,
        });
        script.steps.push(Step::Up {
            x: 8.0,
            y: 8.0,
            device: false,
        });
        script.steps.push(Step::ExportSvg {
            path: "no-such-dir-for-inkpad/out.svg".into(),
        });
        let mut session = session_for(&script);
        let report = run(&mut session, &script, &std::env::temp_dir());
        assert_eq!(report.steps, 5);
        assert_eq!(report.failed, 2);
        assert!(report.exported.is_empty());
        // The rejected style never applied, and the failed export changed nothing.
        let shapes = session.document().shapes();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].style.stroke, Color::BLACK);
    }
    #[test]
    fn exports_to_base_dir() {
        let dir = std::env::temp_dir();
        let name = format!("inkpad-script-{}.png", std::process::id());
        let script = Script {
            canvas: None,
            steps: vec![Step::ExportPng { path: name.clone().into() }],
        };
        let mut session = session_for(&script);
        let report = run(&mut session, &script, &dir);
        assert_eq!(report.exported, [dir.join(&name)]);
        let bytes = std::fs::read(dir.join(&name)).unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
        let _ = std::fs::remove_file(dir.join(name));
    }
}
