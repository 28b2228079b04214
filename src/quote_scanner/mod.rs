// WHY: Main scanner interface: quote extraction with an optional target word, and quote removal
// Borrowed spans for callers that want offsets, plain substrings for callers that just want text

use anyhow::{bail, Result};
use regex_automata::meta::Regex;
use std::sync::OnceLock;
use tracing::debug;

pub mod boundaries;
pub mod normalization;
pub mod position;
pub mod spans;

pub use normalization::{normalize_quote, normalize_quote_into};
pub use position::{BytePos, PositionTracker, Span};
pub use spans::{QuoteSpan, QuoteSpans, Quotes, WordMatcher};

/// Configuration for which characters delimit quoted text
#[derive(Debug, Clone)]
pub struct QuoteRules {
    /// Characters that can open a quote
    pub opening_quotes: Vec<char>,
    /// Characters that can close a quote
    pub closing_quotes: Vec<char>,
}

impl Default for QuoteRules {
    fn default() -> Self {
        Self {
            // Straight and curly double quotes; single quotes double as apostrophes and are never delimiters
            opening_quotes: vec!['"', '\u{201C}'],
            closing_quotes: vec!['"', '\u{201D}'],
        }
    }
}

impl QuoteRules {
    pub fn is_opening(&self, ch: char) -> bool {
        self.opening_quotes.contains(&ch)
    }

    pub fn is_closing(&self, ch: char) -> bool {
        self.closing_quotes.contains(&ch)
    }

    /// Reject rule sets the adjacency checks cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.opening_quotes.is_empty() {
            bail!("At least one opening quote character is required");
        }
        if self.closing_quotes.is_empty() {
            bail!("At least one closing quote character is required");
        }
        for &ch in self.opening_quotes.iter().chain(&self.closing_quotes) {
            if boundaries::is_space(ch) {
                bail!("Quote character {:?} is whitespace", ch);
            }
            if boundaries::is_word_char(ch) {
                bail!("Quote character {:?} is a word character", ch);
            }
        }
        Ok(())
    }

    /// Alternation matching any opening or closing quote character
    fn mark_pattern(&self) -> String {
        let mut marks: Vec<char> = self.opening_quotes.iter().chain(&self.closing_quotes).copied().collect();
        marks.sort_unstable();
        marks.dedup();
        marks
            .iter()
            .map(|ch| regex_syntax::escape(&ch.to_string()))
            .collect::<Vec<_>>()
            .join("|")
    }
}

/// Quote with its index in the scan and its line/column position
#[derive(Debug, Clone)]
pub struct LocatedQuote<'t> {
    pub index: usize,
    pub raw_content: &'t str,
    pub span: Span,
}

impl<'t> LocatedQuote<'t> {
    pub fn raw(&self) -> &'t str {
        self.raw_content
    }

    /// Single-line rendering of the quote
    pub fn normalize(&self) -> String {
        normalize_quote(self.raw_content)
    }
}

/// Finds and strips quoted text
#[derive(Debug, Clone)]
pub struct QuoteScanner {
    rules: QuoteRules,
    marks: Regex,
}

impl QuoteScanner {
    /// Create a scanner with custom quote rules
    pub fn new(rules: QuoteRules) -> Result<Self> {
        rules.validate()?;
        let marks = Regex::new(&rules.mark_pattern())?;
        Ok(Self { rules, marks })
    }

    /// Create a scanner for straight and curly double quotes
    pub fn with_default_rules() -> Result<Self> {
        Self::new(QuoteRules::default())
    }

    /// Lazily scan for quotes, optionally only those containing `word` as a whole token
    /// An empty `word` matches every quote.
    pub fn find_spans<'s, 't>(&'s self, text: &'t str, word: &str, case_sensitive: bool) -> Result<QuoteSpans<'s, 't>> {
        debug!(bytes = text.len(), word, case_sensitive, "Starting quote scan");
        let matcher = if word.is_empty() {
            None
        } else {
            Some(WordMatcher::new(word, case_sensitive)?)
        };
        Ok(QuoteSpans::new(&self.rules, &self.marks, matcher, text))
    }

    /// Like `find_spans`, yielding the quoted substrings including delimiters
    pub fn find<'s, 't>(&'s self, text: &'t str, word: &str, case_sensitive: bool) -> Result<Quotes<'s, 't>> {
        self.find_spans(text, word, case_sensitive).map(Quotes::from)
    }

    /// Collect matching quotes with 1-based line/column spans
    pub fn find_located<'t>(&self, text: &'t str, word: &str, case_sensitive: bool) -> Result<Vec<LocatedQuote<'t>>> {
        let mut tracker = PositionTracker::new(text);
        self.find_spans(text, word, case_sensitive)?
            .enumerate()
            .map(|(index, quote)| -> Result<LocatedQuote<'t>> {
                let span = tracker.span_of(quote.start, quote.end)?;
                Ok(LocatedQuote {
                    index,
                    raw_content: quote.raw,
                    span,
                })
            })
            .collect()
    }

    /// Replace every quote with `ellipsis`, or with `invert` keep only the quotes joined by `ellipsis`
    pub fn remove(&self, text: &str, ellipsis: &str, invert: bool) -> String {
        let spans = QuoteSpans::new(&self.rules, &self.marks, None, text);

        if invert {
            return spans.map(|quote| quote.raw).collect::<Vec<_>>().join(ellipsis);
        }

        let mut result = String::with_capacity(text.len());
        let mut last_end = 0;
        for quote in spans {
            result.push_str(&text[last_end..quote.start.0]);
            result.push_str(ellipsis);
            last_end = quote.end.0;
        }
        result.push_str(&text[last_end..]);
        result
    }

    /// Tab-separated output line: index, normalized quote, (start_line,start_col,end_line,end_col)
    pub fn format_quote_output(&self, quote: &LocatedQuote<'_>) -> String {
        format!(
            "{}\t{}\t({},{},{},{})",
            quote.index,
            quote.normalize(),
            quote.span.start_line,
            quote.span.start_col,
            quote.span.end_line,
            quote.span.end_col
        )
    }
}

/// Shared scanner with default rules
pub fn default_scanner() -> Result<&'static QuoteScanner> {
    static DEFAULT_SCANNER: OnceLock<QuoteScanner> = OnceLock::new();

    if let Some(scanner) = DEFAULT_SCANNER.get() {
        return Ok(scanner);
    }
    let scanner = QuoteScanner::with_default_rules()?;
    Ok(DEFAULT_SCANNER.get_or_init(|| scanner))
}

/// Find straight or curly double quotes in `text` using the default rules
pub fn find<'t>(text: &'t str, word: &str, case_sensitive: bool) -> Result<Quotes<'static, 't>> {
    default_scanner()?.find(text, word, case_sensitive)
}

/// Remove quotes (or, inverted, everything but quotes) using the default rules
pub fn remove(text: &str, ellipsis: &str, invert: bool) -> Result<String> {
    Ok(default_scanner()?.remove(text, ellipsis, invert))
}
