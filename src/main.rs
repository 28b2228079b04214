use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

use quotescan::{write_run_stats, FileReport, QuoteScanner, ReaderConfig, RunStats, TextReader};

#[derive(Parser, Debug)]
#[command(name = "quotescan")]
#[command(about = "Find and strip quoted text in UTF-8 text files")]
#[command(version)]
struct Args {
    /// Text files to scan
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Word that found quotes must contain (empty finds every quote)
    #[arg(long, default_value = "")]
    word: String,

    /// Replacement text for removed passages
    #[arg(long, default_value = " [...] ")]
    ellipsis: String,

    /// Run removal over the whole text instead of only the first line
    #[arg(long)]
    whole_text: bool,

    /// Print found quotes with index and line/column span
    #[arg(long)]
    located: bool,

    /// Abort on first error
    #[arg(long)]
    fail_fast: bool,

    /// Suppress console progress bar
    #[arg(long)]
    no_progress: bool,

    /// Stats output file path
    #[arg(long)]
    stats_out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only scan results
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .json()
        .init();

    let args = Args::parse();

    info!("Starting quotescan");
    info!(?args, "Parsed CLI arguments");

    let scanner = QuoteScanner::with_default_rules()?;
    let reader = TextReader::new(ReaderConfig {
        fail_fast: args.fail_fast,
        ..Default::default()
    });

    let run_start = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let run_timer = Instant::now();
    let mut stats = RunStats::new(run_start, &args.word);

    let progress = if args.no_progress || args.inputs.len() < 2 {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(args.inputs.len() as u64);
        bar.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} files {msg}")?);
        bar
    };

    for path in &args.inputs {
        let (text, read_stats) = reader.read_text(path).await?;

        if let Some(ref error) = read_stats.read_error {
            warn!("Skipping {}: {}", path.display(), error);
            stats.record(FileReport::failed(&read_stats, error.clone()));
            progress.inc(1);
            continue;
        }

        progress.suspend(|| print_demo(&scanner, path, &text, &args))?;

        let report = FileReport::scan(&scanner, &text, &args.word, &read_stats)?;
        info!(
            "Scanned {}: {} quotes, {} word matches",
            report.path, report.quotes_found, report.word_matches
        );
        stats.record(report);
        progress.inc(1);
    }

    progress.finish_and_clear();
    stats.total_processing_time_ms = run_timer.elapsed().as_millis() as u64;

    if let Some(ref stats_path) = args.stats_out {
        write_run_stats(stats_path, &stats).await?;
        info!("Wrote run stats to {}", stats_path.display());
    }

    if stats.files_failed > 0 {
        eprintln!("{} of {} files could not be read", stats.files_failed, args.inputs.len());
    }

    info!(
        "Completed: {} files processed, {} failed, {} quotes found",
        stats.files_processed, stats.files_failed, stats.total_quotes_found
    );

    Ok(())
}

/// Print searches with and without case sensitivity, then removal normal and inverted
fn print_demo(scanner: &QuoteScanner, path: &Path, text: &str, args: &Args) -> Result<()> {
    println!("== {}", path.display());

    println!("Case insensitive search for \"{}\":", args.word);
    print_quotes(scanner, text, &args.word, false, args.located)?;

    println!("\nCase sensitive search for \"{}\":", args.word);
    print_quotes(scanner, text, &args.word, true, args.located)?;

    let sample = if args.whole_text {
        text
    } else {
        text.lines().next().unwrap_or_default()
    };

    println!("\nRemove quotes:");
    println!("{}", scanner.remove(sample, &args.ellipsis, false));

    println!("\nRemove non-quotes:");
    println!("{}\n", scanner.remove(sample, &args.ellipsis, true));

    Ok(())
}

fn print_quotes(scanner: &QuoteScanner, text: &str, word: &str, case_sensitive: bool, located: bool) -> Result<()> {
    if located {
        for quote in scanner.find_located(text, word, case_sensitive)? {
            println!("{}", scanner.format_quote_output(&quote));
        }
    } else {
        for quote in scanner.find(text, word, case_sensitive)? {
            println!("{quote}");
        }
    }
    Ok(())
}
