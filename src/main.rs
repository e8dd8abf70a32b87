use clap::Parser;
use colored::Colorize;
use miette::{IntoDiagnostic, Result};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

use deadui::analysis::{EntryPointDetector, ReachabilityAnalyzer};
use deadui::config::{Config, EntryFallback};
use deadui::discovery::{AssetStats, FileFinder};
use deadui::error::AnalysisError;
use deadui::graph::{load_graph, save_graph, BatchSummary, GraphBuilder, NavigationGraph, ParallelGraphBuilder};
use deadui::platform;
use deadui::report::{ReportFormat, Reporter};

/// deadui - Find unreachable UI elements in Unity scenes and prefabs
#[derive(Parser, Debug)]
#[command(name = "deadui")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the Unity project directory to analyze
    path: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Target directories to analyze (can be specified multiple times)
    #[arg(short, long)]
    target: Vec<PathBuf>,

    /// Patterns to exclude (can be specified multiple times)
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Analyze a previously exported graph (.json or .gexf) instead of extracting
    #[arg(short, long, value_name = "FILE")]
    graph: Option<PathBuf>,

    /// Explicit entry node keys; disables keyword selection
    #[arg(long, value_name = "NODE")]
    entry: Vec<String>,

    /// Entry keywords, replacing the configured list (can be specified multiple times)
    #[arg(short, long, value_name = "KEYWORD")]
    keyword: Vec<String>,

    /// Match entry keywords case-sensitively
    #[arg(long)]
    case_sensitive: bool,

    /// Do not fall back to zero in-degree nodes when no keyword matches
    #[arg(long)]
    no_fallback: bool,

    /// Output format (defaults to the configured one)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Output file (for csv/json formats)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the navigation graph to this file (.json or .gexf)
    #[arg(long, value_name = "FILE")]
    export_graph: Option<PathBuf>,

    /// Extract assets in parallel
    #[arg(long)]
    parallel: bool,

    /// Only analyze projects that build for this platform (android)
    #[arg(long, value_name = "NAME")]
    platform: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Terminal,
    Csv,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => ReportFormat::Terminal,
            OutputFormat::Csv => ReportFormat::Csv,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.quiet);

    info!("deadui v{}", env!("CARGO_PKG_VERSION"));

    if cli.path.is_none() && cli.graph.is_none() {
        return Err(AnalysisError::NoInput).into_diagnostic();
    }

    let config = load_config(&cli)?;

    run_analysis(&config, &cli)
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Reports may go to stdout, so logs stay on stderr
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        let root = cli.path.as_deref().unwrap_or_else(|| Path::new("."));
        Config::from_default_locations(root)?
    };

    // Override with CLI arguments
    if !cli.target.is_empty() {
        config.targets = cli.target.clone();
    }
    if !cli.exclude.is_empty() {
        config.exclude.extend(cli.exclude.clone());
    }
    if !cli.keyword.is_empty() {
        config.entry.keywords = cli.keyword.clone();
    }
    if cli.case_sensitive {
        config.entry.case_sensitive = true;
    }
    if cli.no_fallback {
        config.entry.fallback = EntryFallback::None;
    }

    Ok(config)
}

fn run_analysis(config: &Config, cli: &Cli) -> Result<()> {
    let start_time = Instant::now();

    if let Some(name) = &cli.platform {
        let probe = platform::probe_for(name)
            .ok_or_else(|| miette::miette!("Unknown platform '{}' (supported: android)", name))?;

        match &cli.path {
            Some(root) => {
                let report = probe.probe(root);
                if !report.matched() {
                    status(
                        cli,
                        format!("Project does not target {}. Skipping analysis.", probe.name())
                            .yellow(),
                    );
                    return Ok(());
                }
                info!("{} indicators: {}", probe.name(), report.found.join(", "));
            }
            None => warn!(
                "--platform {} needs a project directory; analyzing the cached graph unchecked",
                probe.name()
            ),
        }
    }

    // Step 1: Obtain the graph, from a cached artifact or by extraction
    let (graph, summary) = match &cli.graph {
        Some(graph_path) => {
            info!("Loading cached graph from {}...", graph_path.display());
            let graph = load_graph(graph_path).into_diagnostic()?;
            (graph, None)
        }
        None => match &cli.path {
            Some(root) => {
                let (graph, summary) = extract_graph(config, cli, root)?;
                (graph, Some(summary))
            }
            None => return Err(AnalysisError::NoInput).into_diagnostic(),
        },
    };

    if let Some(export_path) = &cli.export_graph {
        save_graph(&graph, export_path)?;
    }

    // Step 2: Select entry nodes
    info!("Selecting entry nodes...");
    let detector = if cli.entry.is_empty() {
        EntryPointDetector::from_config(config)
    } else {
        EntryPointDetector::explicit(cli.entry.iter().cloned())
    };
    let entries = detector.detect(&graph);

    // Step 3: Reachability
    info!("Running reachability analysis...");
    let sets = ReachabilityAnalyzer::new().analyze(&graph, &entries);

    // Step 4: Report
    let format = match cli.format {
        Some(format) => format.into(),
        None => ReportFormat::from_name(&config.report.format).unwrap_or_else(|| {
            warn!("Unknown report format '{}', using terminal", config.report.format);
            ReportFormat::Terminal
        }),
    };
    Reporter::new(format, cli.output.clone()).report(&sets, summary.as_ref())?;

    let elapsed = start_time.elapsed();
    status(
        cli,
        format!(
            "⏱  Analyzed {} nodes ({} entries) in {:.2}s",
            graph.node_count(),
            entries.len(),
            elapsed.as_secs_f64()
        )
        .dimmed(),
    );

    Ok(())
}

fn extract_graph(config: &Config, cli: &Cli, root: &Path) -> Result<(NavigationGraph, BatchSummary)> {
    use indicatif::{ProgressBar, ProgressStyle};

    if !root.is_dir() {
        return Err(miette::miette!("Project directory not found: {}", root.display()));
    }

    info!("Discovering assets...");
    let finder = FileFinder::new(config);
    let files = finder.find_files(root)?;

    let stats = AssetStats::from_files(&files);
    info!("Found {} scenes and {} prefabs", stats.scenes, stats.prefabs);

    if files.is_empty() {
        status(cli, "No .unity or .prefab files found.".yellow());
    }

    let (graph, summary) = if cli.parallel {
        status(
            cli,
            format!("⚡ Parallel mode: extracting {} assets...", files.len()).cyan(),
        );
        ParallelGraphBuilder::from_config(config).build_from_files(&files)
    } else {
        let pb = if cli.quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(files.len() as u64)
        };
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
                .into_diagnostic()?
                .progress_chars("#>-"),
        );

        info!("Extracting assets...");
        let mut builder = GraphBuilder::from_config(config);
        for file in &files {
            builder.process_file(file);
            pb.inc(1);
        }
        pb.finish_and_clear();

        builder.build()
    };

    if summary.assets_skipped > 0 {
        warn!("{} assets could not be read", summary.assets_skipped);
    }
    info!(
        "Graph: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    Ok((graph, summary))
}

/// Advisory status line on stderr, suppressed in quiet mode
fn status(cli: &Cli, message: colored::ColoredString) {
    if !cli.quiet {
        eprintln!("{}", message);
    }
}
