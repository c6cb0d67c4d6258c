//! Run summary formatting for JSON, YAML, and human-readable text

use anyhow::{Context, Result};
use std::fmt::{self, Write};

use crate::pipeline::{PhaseStatus, RunSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable formatted text
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, summary: &RunSummary) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(summary)
                .context("Failed to serialize run summary to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(summary).context("Failed to serialize run summary to YAML")
            }
            OutputFormat::Human => self.format_human(summary),
        }
    }

    fn format_human(&self, summary: &RunSummary) -> Result<String> {
        let mut out = String::new();
        write_human(&mut out, summary).context("Failed to render run summary")?;
        Ok(out)
    }
}

fn write_human(out: &mut String, summary: &RunSummary) -> fmt::Result {
    let elapsed = summary.finished_at - summary.started_at;

    writeln!(
        out,
        "Dataset run: {} -> {} ({} ms)",
        summary.started_at.format("%Y-%m-%d %H:%M:%S UTC"),
        summary.finished_at.format("%Y-%m-%d %H:%M:%S UTC"),
        elapsed.num_milliseconds()
    )?;
    writeln!(out, "Search: {}", summary.search_backend)?;
    writeln!(out)?;

    writeln!(out, "{:<10} {:<7} {:>7} {:>10}", "PHASE", "STATUS", "ITEMS", "ARTIFACTS")?;
    for report in &summary.phases {
        let status = match report.status {
            PhaseStatus::Succeeded => "ok",
            PhaseStatus::Failed => "FAILED",
        };
        writeln!(
            out,
            "{:<10} {:<7} {:>7} {:>10}",
            report.phase.as_str(),
            status,
            report.items,
            report.artifacts.len()
        )?;
        if let Some(error) = &report.error {
            writeln!(out, "  error: {}", error)?;
        }
    }

    if let Some(qa) = &summary.qa {
        writeln!(out)?;
        writeln!(
            out,
            "QA: {} duplicate variants, {} empty artifacts, {} excluded files",
            qa.duplicate_variants, qa.empty_artifacts, qa.excluded_files
        )?;
        if qa.halt_recommended {
            writeln!(out, "QA: halting downstream consumers is recommended")?;
        }
    }

    let mut artifacts = summary.artifacts().peekable();
    if artifacts.peek().is_some() {
        writeln!(out, "\nArtifacts:")?;
        for artifact in artifacts {
            writeln!(out, "  {}", artifact)?;
        }
    }

    write!(
        out,
        "\n{} succeeded, {} failed",
        summary.succeeded(),
        summary.failed()
    )
}
