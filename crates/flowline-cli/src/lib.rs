//! CLI logic for the Flowline inspection tool.
//!
//! The tool loads a scene file, optionally collapses or expands containers,
//! runs one layout and routing pass, and writes a plain-text report of the
//! resulting frame.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fmt::Write as _,
    fs,
    io::{self, Write as _},
};

use log::{debug, info};

use flowline::{FlowchartEngine, FlowlineError, Frame, identifier::Id, scene::Scene};

/// Run the Flowline CLI application
///
/// # Errors
///
/// Returns `FlowlineError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Scene parsing errors
/// - Inconsistent scenes and unknown toggle targets
pub fn run(args: &Args) -> Result<(), FlowlineError> {
    info!(
        input_path = args.input,
        output_path:? = args.output;
        "Processing scene"
    );

    let config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;
    let scene: Scene =
        toml::from_str(&source).map_err(|e| FlowlineError::Scene(e.to_string()))?;

    let mut engine = FlowchartEngine::from_scene(config, &scene)?;

    for name in &args.toggle {
        let outcome = engine.toggle_collapse(Id::new(name))?;
        debug!(shape_id = name, outcome:?; "Toggled container");
    }

    let report = render_report(&engine.frame());

    match &args.output {
        Some(path) => {
            fs::write(path, report)?;
            info!(output_file = path; "Report written");
        }
        None => io::stdout().write_all(report.as_bytes())?,
    }

    Ok(())
}

/// Formats a frame as one line per visible shape followed by one line per
/// routed connection with its SVG path data.
pub fn render_report(frame: &Frame) -> String {
    let mut out = String::new();

    for shape in frame.shapes() {
        let bounds = shape.bounds();
        let _ = write!(
            out,
            "{} [{}, {}, {}x{}]",
            shape.id(),
            bounds.min_x(),
            bounds.min_y(),
            bounds.width(),
            bounds.height()
        );
        if shape.is_collapsed() {
            out.push_str(" collapsed");
        }
        if !shape.label().is_empty() {
            let _ = write!(out, " \"{}\"", shape.label());
        }
        out.push('\n');
    }

    for connection in frame.connections() {
        let _ = writeln!(out, "{}: {}", connection.id(), connection.path().to_path_data());
    }

    out
}
