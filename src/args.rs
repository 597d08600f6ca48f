use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "linklens",
    about = "Analyze a batch of candidate links for validity, domains, and aggregate statistics",
    version,
    long_about = None
)]
pub struct Args {
    /// Input file with one candidate link per line, or "-" for stdin
    #[arg(default_value = "-")]
    pub input: String,

    /// Do not prepend https:// to scheme-less lines
    #[arg(long)]
    pub no_assume_https: bool,

    /// Collapse lines whose normalized form matches case-insensitively
    #[arg(short, long)]
    pub dedupe: bool,

    /// Number of top entries to display per distribution
    #[arg(short, long, default_value_t = 10)]
    pub top: usize,

    /// Print the full analysis as JSON instead of the text report
    #[arg(long)]
    pub json: bool,

    /// Export per-link rows as CSV to the given path
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Append this run to a bounded history file (JSON, most-recent first)
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Redact domain names for privacy
    #[arg(long)]
    pub redact: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
