use super::emit;
use crate::analysis::ReachabilitySets;
use miette::Result;
use std::path::PathBuf;

/// Two-column tabular report: `UI Element,Status`
pub struct CsvReporter {
    output_path: Option<PathBuf>,
}

impl CsvReporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    pub fn report(&self, sets: &ReachabilitySets) -> Result<()> {
        emit(self.output_path.as_deref(), &Self::render(sets))
    }

    /// One row per node, reachable rows first, each group sorted by key
    pub fn render(sets: &ReachabilitySets) -> String {
        let mut out = String::from("UI Element,Status\n");
        for (key, status) in sets.rows() {
            out.push_str(&escape_field(key));
            out.push(',');
            out.push_str(status.as_str());
            out.push('\n');
        }
        out
    }
}

/// Quote a field containing a delimiter, quote or line break
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
