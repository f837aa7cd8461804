#![warn(clippy::pedantic)]

pub mod script;
pub mod settings;

use anyhow::Result as AnyResult;

/// Replay one script in a fresh session. The canvas comes from the script if it names one,
/// else from the user's settings.
fn replay(path: &std::path::Path, settings: &settings::Settings) -> AnyResult<script::Report> {
    use anyhow::Context;
    let script = script::Script::read(path).with_context(|| format!("reading {path:?}"))?;
    let canvas = script.canvas.unwrap_or(settings.canvas);
    let mut session = inkpad_core::session::Session::new(canvas)
        .with_context(|| format!("creating canvas for {path:?}"))?;
    let style = settings.style;
    session.set_style(style.stroke, style.fill, style.width);

    // Relative export paths land next to the script.
    let base_dir = path.parent().unwrap_or_else(|| std::path::Path::new("."));
    Ok(script::run(&mut session, &script, base_dir))
}

fn main() -> AnyResult<()> {
    let has_term = std::io::IsTerminal::is_terminal(&std::io::stdin());
    // Log to a terminal, if available. Else, log to "log.out" in the working directory.
    if has_term {
        env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        let _ = simple_logging::log_to_file("log.out", log::LevelFilter::Debug);
    }

    let settings = settings::Settings::load();
    if let Err(e) = settings.save() {
        log::warn!("Failed to save settings:\n{e:?}");
    };

    // Args are a simple list of scripts to replay, in order.
    // Paths are OSStrings, let the system handle character encoding restrictions.
    let paths: Vec<std::path::PathBuf> = std::env::args_os().skip(1).map(Into::into).collect();
    if paths.is_empty() {
        use strum::IntoEnumIterator;
        let tools: Vec<_> = inkpad_core::shape::ToolMode::iter()
            .map(|tool| tool.as_ref().to_owned())
            .collect();
        log::warn!(
            "No scripts given. Usage: inkpad <script.toml>...\nAvailable tools: {}",
            tools.join(", ")
        );
        return Ok(());
    }

    let mut had_failure = false;
    for path in &paths {
        match replay(path, &settings) {
            Err(e) => {
                log::error!("failed to replay {path:?}: {e:#}");
                had_failure = true;
            }
            Ok(report) => {
                log::info!(
                    "Replayed {path:?}: {} steps, {} failed, {} exported",
                    report.steps,
                    report.failed,
                    report.exported.len()
                );
                had_failure |= report.failed != 0;
            }
        }
    }
    if had_failure {
        anyhow::bail!("some scripts did not replay cleanly");
    }
    Ok(())
}
