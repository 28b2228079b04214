pub mod quote_scanner;
pub mod reader;
pub mod report;

// Re-export main types for convenient access
pub use quote_scanner::{
    find, remove, LocatedQuote, QuoteRules, QuoteScanner, QuoteSpan, Quotes, Span
};

// Re-export reading and reporting types used by the CLI and integration tests
pub use reader::{read_text_async, ReadStats, ReaderConfig, TextReader};
pub use report::{write_run_stats, FileReport, RunStats};
