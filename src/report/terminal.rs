use crate::analysis::ReachabilitySets;
use crate::graph::BatchSummary;
use crate::resolve::QUALIFIER_SEPARATOR;
use colored::Colorize;
use miette::Result;
use std::collections::BTreeMap;

/// Heading used for dead nodes without an asset qualifier (method targets)
const UNQUALIFIED_GROUP: &str = "(methods and unqualified elements)";

/// Terminal reporter with colored output; lists dead nodes grouped by asset
pub struct TerminalReporter;

impl TerminalReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn report(&self, sets: &ReachabilitySets, summary: Option<&BatchSummary>) -> Result<()> {
        if sets.is_empty() {
            println!("{}", "Graph is empty: no UI components were found.".yellow().bold());
            if let Some(summary) = summary {
                self.print_batch(summary);
            }
            return Ok(());
        }

        if sets.dead.is_empty() {
            println!("{}", "No dead UI elements found!".green().bold());
        } else {
            println!();
            println!(
                "{}",
                format!("Found {} dead UI nodes:", sets.dead.len()).yellow().bold()
            );
            println!();

            for (group, names) in group_by_asset(&sets.dead) {
                println!("{}", group.cyan().bold());
                for name in names {
                    println!("  {} {}", "✗".red(), name);
                }
                println!();
            }
        }

        println!("{}", "─".repeat(60).dimmed());
        println!(
            "Summary: {}, {}",
            format!("{} reachable", sets.reachable.len()).green(),
            format!("{} dead", sets.dead.len()).red()
        );

        if let Some(summary) = summary {
            self.print_batch(summary);
        }

        Ok(())
    }

    fn print_batch(&self, summary: &BatchSummary) {
        println!(
            "{}",
            format!(
                "Scanned {} assets: {} GameObjects, {} UI components",
                summary.assets_scanned, summary.game_objects, summary.components
            )
            .dimmed()
        );

        if summary.assets_skipped > 0 {
            println!(
                "{}",
                format!("⚠ {} assets could not be read", summary.assets_skipped).yellow()
            );
        }
        if summary.chunks_skipped > 0 {
            println!(
                "{}",
                format!("⚠ {} records failed to decode and were skipped", summary.chunks_skipped)
                    .yellow()
            );
        }
        if summary.unresolved_owners > 0 {
            println!(
                "{}",
                format!(
                    "{} components have unresolved owners (shown as UnknownButton(..))",
                    summary.unresolved_owners
                )
                .dimmed()
            );
        }
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Group node keys by their asset qualifier, keeping keys sorted within groups
fn group_by_asset<'a, I>(keys: I) -> BTreeMap<&'a str, Vec<&'a str>>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut groups: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for key in keys {
        let (group, name) = key
            .split_once(QUALIFIER_SEPARATOR)
            .unwrap_or((UNQUALIFIED_GROUP, key.as_str()));
        groups.entry(group).or_default().push(name);
    }
    groups
}
