mod csv;
mod json;
mod terminal;

pub use csv::CsvReporter;
pub use json::JsonReporter;
pub use terminal::TerminalReporter;

use crate::analysis::ReachabilitySets;
use crate::graph::BatchSummary;
use miette::{IntoDiagnostic, Result, WrapErr};
use std::path::{Path, PathBuf};

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Terminal,
    Csv,
    Json,
}

impl ReportFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "terminal" => Some(ReportFormat::Terminal),
            "csv" => Some(ReportFormat::Csv),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

/// Reporter for outputting reachability results
pub struct Reporter {
    format: ReportFormat,
    output_path: Option<PathBuf>,
}

impl Reporter {
    pub fn new(format: ReportFormat, output_path: Option<PathBuf>) -> Self {
        Self { format, output_path }
    }

    /// Report the reachable and dead sets; the summary is absent for cached graphs
    pub fn report(&self, sets: &ReachabilitySets, summary: Option<&BatchSummary>) -> Result<()> {
        match self.format {
            ReportFormat::Terminal => TerminalReporter::new().report(sets, summary),
            ReportFormat::Csv => CsvReporter::new(self.output_path.clone()).report(sets),
            ReportFormat::Json => JsonReporter::new(self.output_path.clone()).report(sets, summary),
        }
    }
}

/// Write a rendered report to a file, or stdout when no path is given
fn emit(output_path: Option<&Path>, content: &str) -> Result<()> {
    match output_path {
        Some(path) => {
            std::fs::write(path, content)
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to write report to {}", path.display()))?;
            eprintln!("Report written to: {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}
