use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::Read;
use tracing::{error, info};

use linklens::analysis::{analyze_links, AnalyzeOptions};
use linklens::history::History;
use linklens::{args::Args, report, utils};

fn read_input(source: &str) -> Result<String> {
    if source == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read input from stdin")?;
        Ok(buffer)
    } else {
        fs::read_to_string(source).with_context(|| format!("Failed to read input file {}", source))
    }
}

fn run(args: &Args) -> Result<()> {
    let input = read_input(&args.input)?;

    let options = AnalyzeOptions {
        assume_https: !args.no_assume_https,
        dedupe: args.dedupe,
    };
    let analysis = analyze_links(&input, &options);

    if let Some(path) = &args.csv {
        fs::write(path, report::to_csv(&analysis))
            .with_context(|| format!("Failed to write CSV to {:?}", path))?;
        info!(action = "export", component = "csv", file_path = ?path, "Wrote CSV export");
    }

    if let Some(path) = &args.history {
        let mut history = History::load(path);
        history.push(analysis.clone());
        history.save(path)?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        report::print_report(&analysis, args.top, args.redact);
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    utils::setup_logging(args.verbose);
    utils::validate_args(&args)?;

    match run(&args) {
        Ok(()) => Ok(()),
        Err(e) => {
            error!(error = %e, "Error");
            std::process::exit(1);
        }
    }
}
