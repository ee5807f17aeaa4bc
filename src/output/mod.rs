//! Output layer - renders a captured response into the configured sink

pub mod editor;
pub mod render;
pub mod sink;

use std::io::Write;

pub use editor::Editor;
pub use render::{render, Format};
pub use sink::{OutputDestination, OutputSink};

use crate::config::Settings;
use crate::error::Result;
use crate::response::CapturedResponse;

/// Writes the response to the destination named in settings.
///
/// An unrecognised destination is reported and replaced by the console.
/// The sink is torn down even when the write fails; the first failure is
/// returned.
pub fn write_response(res: &mut CapturedResponse, settings: &Settings) -> Result<()> {
    let destination = OutputDestination::from_settings(settings).unwrap_or_else(|e| {
        eprintln!("{}", e);
        tracing::warn!(error = %e, "falling back to stdout");
        OutputDestination::Console
    });
    let format = Format::from_setting(&settings.out_writer_format);

    let mut sink = destination.open()?;
    let text = render(format, res);
    let written = sink.write_all(text.as_bytes());
    let finished = sink.finish();

    written?;
    finished?;
    tracing::debug!(?format, "response written");
    Ok(())
}
