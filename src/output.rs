use std::fmt::Write;

use crate::config::OutputFormat;
use crate::models::Report;

pub fn render(report: &Report, format: OutputFormat) -> Result<String, serde_json::Error> {
  match format {
    OutputFormat::Text => Ok(render_text(report)),
    OutputFormat::Json => render_json(report),
  }
}

/// The human-readable block: count header, one message per result in arrival
/// order, closing confirmation.
pub fn render_text(report: &Report) -> String {
  let mut out = String::new();
  let _ = writeln!(out);
  let _ = writeln!(out, "Main: All workers have finished. Final results ({}):", report.len());
  for result in &report.results {
    let _ = writeln!(out, "{}", result.message);
  }
  let _ = writeln!(out);
  let _ = writeln!(out, "Main: Program terminated successfully.");
  out
}

/// One JSON object per result, one per line.
pub fn render_json(report: &Report) -> Result<String, serde_json::Error> {
  let mut out = String::new();
  for result in &report.results {
    out.push_str(&serde_json::to_string(result)?);
    out.push('\n');
  }
  Ok(out)
}
