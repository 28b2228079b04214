use anyhow::{anyhow, Result};
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, BufReader};
use tracing::{debug, info, warn};

/// Configuration for file reading behavior
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Whether to fail fast on first error or continue processing
    pub fail_fast: bool,
    /// Buffer size for async reading (default: 8KB)
    pub buffer_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            buffer_size: 8192,
        }
    }
}

/// Statistics for file reading operations
#[derive(Debug, Clone)]
pub struct ReadStats {
    pub file_path: String,
    pub chars_read: u64,
    pub bytes_read: u64,
    pub duration_ms: u64,
    pub read_error: Option<String>,
}

/// Reads whole UTF-8 text files for quote scanning
pub struct TextReader {
    config: ReaderConfig,
}

impl TextReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read a file as UTF-8 text
    /// Without fail_fast, errors are reported through `ReadStats::read_error` with empty text
    pub async fn read_text<P: AsRef<Path>>(&self, file_path: P) -> Result<(String, ReadStats)> {
        let path = file_path.as_ref();
        let start_time = std::time::Instant::now();

        debug!("Starting read of file: {}", path.display());

        let loaded = self.read_buffered(path).await;

        let duration_ms = start_time.elapsed().as_millis() as u64;

        match loaded {
            Ok(text) => {
                let stats = ReadStats {
                    file_path: path.display().to_string(),
                    chars_read: text.chars().count() as u64,
                    bytes_read: text.len() as u64,
                    duration_ms,
                    read_error: None,
                };
                info!(
                    "Successfully read {}: {} chars, {} bytes in {}ms",
                    path.display(),
                    stats.chars_read,
                    stats.bytes_read,
                    stats.duration_ms
                );
                Ok((text, stats))
            }
            Err(e) => {
                let error_msg = format!("Failed to read {}: {}", path.display(), e);
                warn!("{}", error_msg);

                if self.config.fail_fast {
                    return Err(anyhow!(error_msg));
                }

                let stats = ReadStats {
                    file_path: path.display().to_string(),
                    chars_read: 0,
                    bytes_read: 0,
                    duration_ms,
                    read_error: Some(error_msg),
                };
                Ok((String::new(), stats))
            }
        }
    }

    async fn read_buffered(&self, path: &Path) -> Result<String> {
        let file = File::open(path).await?;
        let mut reader = BufReader::with_capacity(self.config.buffer_size, file);
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        String::from_utf8(bytes).map_err(|e| anyhow!("invalid UTF-8 at byte {}", e.utf8_error().valid_up_to()))
    }

    /// Read multiple files sequentially, in input order
    pub async fn read_texts_batch<P: AsRef<Path>>(&self, file_paths: &[P]) -> Result<Vec<(String, ReadStats)>> {
        info!("Starting batch read of {} files", file_paths.len());

        let mut results = Vec::with_capacity(file_paths.len());
        for file_path in file_paths {
            results.push(self.read_text(file_path).await?);
        }

        info!("Completed batch read of {} files", results.len());
        Ok(results)
    }
}

/// Read a single file with default configuration
pub async fn read_text_async<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let reader = TextReader::new(ReaderConfig {
        fail_fast: true,
        ..Default::default()
    });
    let (text, _stats) = reader.read_text(file_path).await?;
    Ok(text)
}
