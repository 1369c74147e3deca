//! Shared output formatting for lint results.

use anyhow::Result;
use gaplint_core::{DiagnosticReport, LintResult};
use miette::{NamedSource, Report};
use std::collections::HashMap;
use std::fmt::Write;
use std::path::Path;

use crate::OutputFormat;

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    let rendered = match format {
        OutputFormat::Text => render_text(result),
        OutputFormat::Compact => render_compact(result),
        OutputFormat::Json => render_json(result)?,
        OutputFormat::Pretty => render_pretty(result, |path| std::fs::read_to_string(path).ok()),
    };
    print!("{rendered}");
    Ok(())
}

fn render_text(result: &LintResult) -> String {
    result.format_report()
}

fn render_compact(result: &LintResult) -> String {
    let mut out = String::new();
    for d in &result.diagnostics {
        let _ = writeln!(out, "{d}");
    }
    for failure in &result.failures {
        let _ = writeln!(out, "{}: E000 {}", failure.file.display(), failure.message);
    }
    out
}

fn render_json(result: &LintResult) -> Result<String> {
    let mut json = serde_json::to_string_pretty(result)?;
    json.push('\n');
    Ok(json)
}

/// Renders each diagnostic with the source excerpt around it.
///
/// `read` supplies file contents; a file it cannot supply falls back to the
/// one-line form.
fn render_pretty<F>(result: &LintResult, read: F) -> String
where
    F: Fn(&Path) -> Option<String>,
{
    let mut sources: HashMap<&Path, Option<String>> = HashMap::new();
    let mut out = String::new();

    for d in &result.diagnostics {
        let file = d.location.file.as_path();
        let source = sources.entry(file).or_insert_with(|| read(file));

        match source {
            Some(content) => {
                let report = Report::new(DiagnosticReport::from(d)).with_source_code(
                    NamedSource::new(file.display().to_string(), content.clone()),
                );
                let _ = writeln!(out, "{report:?}");
            }
            None => {
                let _ = writeln!(out, "{}", d.format());
            }
        }
    }
    for failure in &result.failures {
        let _ = writeln!(out, "{}: {}", failure.file.display(), failure.message);
    }
    let _ = writeln!(out, "{}", result.summary());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaplint_core::{Diagnostic, FileFailure, Location};
    use std::path::PathBuf;

    fn sample() -> LintResult {
        LintResult {
            diagnostics: vec![
                Diagnostic::new(
                    "W002",
                    "line-too-long",
                    Location::new(PathBuf::from("lib/a.gi"), 3, Some(81)),
                    "too long line (84 / 80)",
                ),
                Diagnostic::new(
                    "W001",
                    "empty-lines",
                    Location::new(PathBuf::from("lib/a.gi"), 7, None),
                    "consecutive empty lines",
                ),
            ],
            files_checked: 2,
            truncated: false,
            failures: vec![FileFailure {
                file: PathBuf::from("lib/b.gd"),
                message: "permission denied".to_string(),
            }],
        }
    }

    #[test]
    fn text_format() {
        insta::assert_snapshot!(render_text(&sample()), @r"
        lib/a.gi:3: too long line (84 / 80) [W002/line-too-long]
        lib/a.gi:7: consecutive empty lines [W001/empty-lines]
        lib/b.gd: permission denied
        Found 2 warning(s) in 2 file(s), 1 file(s) could not be read
        ");
    }

    #[test]
    fn compact_format() {
        insta::assert_snapshot!(render_compact(&sample()), @r"
        lib/a.gi:3:81: W002 too long line (84 / 80)
        lib/a.gi:7:1: W001 consecutive empty lines
        lib/b.gd: E000 permission denied
        ");
    }

    #[test]
    fn json_format_omits_spans() {
        let result = LintResult {
            failures: Vec::new(),
            ..sample()
        };
        let value: serde_json::Value = serde_json::from_str(&render_json(&result).unwrap()).unwrap();
        assert_eq!(value["files_checked"], 2);
        assert_eq!(value["truncated"], false);
        assert_eq!(value["diagnostics"][0]["code"], "W002");
        assert_eq!(value["diagnostics"][0]["location"]["column"], 81);
        assert!(value["diagnostics"][1]["location"].get("column").is_none());
        assert!(value["diagnostics"][0]["location"].get("offset").is_none());
        assert!(value.get("failures").is_none());
    }

    #[test]
    fn pretty_format_falls_back_without_source() {
        let rendered = render_pretty(&sample(), |_| None);
        assert!(rendered.starts_with("lib/a.gi:3: too long line (84 / 80) [W002/line-too-long]\n"));
        assert!(rendered.ends_with("1 file(s) could not be read\n"));
    }

    #[test]
    fn pretty_format_shows_rule_and_suppression_hint() {
        let rendered = render_pretty(&sample(), |_| Some(format!("{}\n", "x;\n".repeat(8))));
        assert!(rendered.contains("[W002] too long line (84 / 80)"));
        assert!(rendered.contains("gaplint: disable=line-too-long"));
        assert!(rendered.contains("lib/a.gi"));
    }
}
