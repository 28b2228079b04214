// WHY: Per-file and per-run statistics for the CLI's --stats-out JSON file

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::quote_scanner::QuoteScanner;
use crate::reader::ReadStats;

/// Per-file scanning statistics
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FileReport {
    pub path: String,
    pub chars_processed: u64,
    /// All quotes, regardless of target word
    pub quotes_found: u64,
    /// Quotes containing the target word, case-insensitive
    pub word_matches: u64,
    /// Quotes containing the target word, case-sensitive
    pub word_matches_case_sensitive: u64,
    pub processing_time_ms: u64,
    /// Processing status (success, failed)
    pub status: String,
    pub error: Option<String>,
}

impl FileReport {
    /// Scan a successfully read text and count its quotes
    pub fn scan(scanner: &QuoteScanner, text: &str, word: &str, read: &ReadStats) -> Result<Self> {
        let start_time = std::time::Instant::now();

        let quotes_found = scanner.find_spans(text, "", false)?.count() as u64;
        let (word_matches, word_matches_case_sensitive) = if word.is_empty() {
            (quotes_found, quotes_found)
        } else {
            (
                scanner.find_spans(text, word, false)?.count() as u64,
                scanner.find_spans(text, word, true)?.count() as u64,
            )
        };

        Ok(Self {
            path: read.file_path.clone(),
            chars_processed: read.chars_read,
            quotes_found,
            word_matches,
            word_matches_case_sensitive,
            processing_time_ms: read.duration_ms + start_time.elapsed().as_millis() as u64,
            status: "success".to_string(),
            error: None,
        })
    }

    /// Report for a file that could not be read
    pub fn failed(read: &ReadStats, error: impl Into<String>) -> Self {
        Self {
            path: read.file_path.clone(),
            chars_processed: 0,
            quotes_found: 0,
            word_matches: 0,
            word_matches_case_sensitive: 0,
            processing_time_ms: read.duration_ms,
            status: "failed".to_string(),
            error: Some(error.into()),
        }
    }
}

/// Whole-run statistics
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RunStats {
    /// Seconds since the Unix epoch when the run started
    pub run_start: u64,
    pub word: String,
    pub total_processing_time_ms: u64,
    pub total_chars_processed: u64,
    pub total_quotes_found: u64,
    pub total_word_matches: u64,
    pub files_processed: u64,
    pub files_failed: u64,
    pub file_reports: Vec<FileReport>,
}

impl RunStats {
    pub fn new(run_start: u64, word: &str) -> Self {
        Self {
            run_start,
            word: word.to_string(),
            ..Default::default()
        }
    }

    pub fn record(&mut self, report: FileReport) {
        if report.error.is_some() {
            self.files_failed += 1;
        } else {
            self.files_processed += 1;
        }
        self.total_chars_processed += report.chars_processed;
        self.total_quotes_found += report.quotes_found;
        self.total_word_matches += report.word_matches;
        self.file_reports.push(report);
    }
}

/// Write run statistics as pretty-printed JSON
pub async fn write_run_stats(path: &Path, stats: &RunStats) -> Result<()> {
    let file = tokio::fs::File::create(path).await?;
    let mut writer = BufWriter::new(file);

    let json = serde_json::to_vec_pretty(stats)?;
    writer.write_all(&json).await?;
    writer.write_all(b"\n").await?;

    writer.flush().await?;
    Ok(())
}
