// WHY: Lazy left-to-right quote scanning
// A quote mark regex finds candidate delimiters; adjacency rules are checked by hand around each hit

use anyhow::Result;
use regex_automata::{meta::Regex, util::syntax, Input};
use tracing::trace;

use super::boundaries::{char_at, closes_after_text, opens_after_space, token_ends_at, token_starts_at};
use super::position::BytePos;
use super::QuoteRules;

/// A quoted span borrowed from the scanned text, delimiters included
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteSpan<'t> {
    pub start: BytePos,
    pub end: BytePos,
    pub raw: &'t str,
}

impl<'t> QuoteSpan<'t> {
    fn new(text: &'t str, start: usize, end: usize) -> Self {
        Self {
            start: BytePos::new(start),
            end: BytePos::new(end),
            raw: &text[start..end],
        }
    }

    /// Text between the delimiters
    pub fn interior(&self) -> &'t str {
        let mut chars = self.raw.char_indices();
        let open_len = chars.next().map_or(0, |(_, ch)| ch.len_utf8());
        let close_start = chars.next_back().map_or(self.raw.len(), |(idx, _)| idx);
        &self.raw[open_len..close_start]
    }
}

/// Literal target word matcher
/// The word is escaped before compiling, so pattern syntax in it is matched verbatim
#[derive(Debug, Clone)]
pub struct WordMatcher {
    regex: Regex,
    /// Longest byte length any match can have
    max_match_len: usize,
}

impl WordMatcher {
    pub fn new(word: &str, case_sensitive: bool) -> Result<Self> {
        let regex = Regex::builder()
            .syntax(syntax::Config::new().case_insensitive(!case_sensitive))
            .build(&regex_syntax::escape(word))?;
        // Case folding can swap a char for one with a longer UTF-8 encoding (k -> U+212A)
        let max_match_len = if case_sensitive {
            word.len()
        } else {
            word.chars().count() * 4
        };
        Ok(Self { regex, max_match_len })
    }

    /// Occurrences starting within `[from, last_start]`, ascending, overlapping ones included
    fn occurrences(&self, text: &str, from: usize, last_start: usize) -> Vec<(usize, usize)> {
        let mut found = Vec::new();
        let mut search_from = from;

        // Any match starting by last_start ends by bound, so nothing past it needs scanning
        let mut bound = (last_start + self.max_match_len).min(text.len());
        while !text.is_char_boundary(bound) {
            bound += 1;
        }

        while search_from <= last_start {
            let Some(mat) = self.regex.find(Input::new(text).range(search_from..bound)) else {
                break;
            };
            if mat.start() > last_start {
                break;
            }
            found.push((mat.start(), mat.end()));
            search_from = mat.start() + char_at(text, mat.start()).map_or(1, char::len_utf8);
        }

        found
    }
}

/// Iterator over quote spans in left-to-right order
/// Cloning before consumption gives an independent restart of the same scan
#[derive(Debug, Clone)]
pub struct QuoteSpans<'s, 't> {
    rules: &'s QuoteRules,
    marks: &'s Regex,
    word: Option<WordMatcher>,
    text: &'t str,
    position: usize,
}

impl<'s, 't> QuoteSpans<'s, 't> {
    pub(super) fn new(rules: &'s QuoteRules, marks: &'s Regex, word: Option<WordMatcher>, text: &'t str) -> Self {
        Self {
            rules,
            marks,
            word,
            text,
            position: 0,
        }
    }

    /// Next quote mark at or after `from`
    fn next_mark(&self, from: usize) -> Option<(usize, char)> {
        let mat = self.marks.find(Input::new(self.text).range(from..))?;
        char_at(self.text, mat.start()).map(|ch| (mat.start(), ch))
    }

    /// End of the span if the next quote mark at or after `from` is a valid closing delimiter
    fn close_at_next_mark(&self, from: usize) -> Option<usize> {
        let (pos, mark) = self.next_mark(from)?;
        (self.rules.is_closing(mark) && closes_after_text(self.text, pos)).then(|| pos + mark.len_utf8())
    }

    /// Try to complete a quote whose opening delimiter ends at `interior_start`
    fn close_from(&self, interior_start: usize) -> Option<usize> {
        let Some(word) = &self.word else {
            return self.close_at_next_mark(interior_start);
        };

        // The word may begin anywhere up to the next quote mark; later starts are tried first
        let interior_limit = self
            .next_mark(interior_start)
            .map_or(self.text.len(), |(pos, _)| pos);

        word.occurrences(self.text, interior_start, interior_limit)
            .into_iter()
            .rev()
            .filter(|&(start, end)| token_starts_at(self.text, start) && token_ends_at(self.text, end))
            .find_map(|(_, end)| self.close_at_next_mark(end))
    }
}

impl<'s, 't> Iterator for QuoteSpans<'s, 't> {
    type Item = QuoteSpan<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.position < self.text.len() {
            let Some((mark_start, mark)) = self.next_mark(self.position) else {
                self.position = self.text.len();
                break;
            };
            let after_mark = mark_start + mark.len_utf8();

            if self.rules.is_opening(mark) && opens_after_space(self.text, mark_start) {
                if let Some(end) = self.close_from(after_mark) {
                    self.position = end;
                    return Some(QuoteSpan::new(self.text, mark_start, end));
                }
                trace!(byte = mark_start, "Opening quote without a valid close");
            }

            self.position = after_mark;
        }

        None
    }
}

impl std::iter::FusedIterator for QuoteSpans<'_, '_> {}

/// Iterator over quoted substrings, delimiters included
#[derive(Debug, Clone)]
pub struct Quotes<'s, 't> {
    spans: QuoteSpans<'s, 't>,
}

impl<'s, 't> From<QuoteSpans<'s, 't>> for Quotes<'s, 't> {
    fn from(spans: QuoteSpans<'s, 't>) -> Self {
        Self { spans }
    }
}

impl<'s, 't> Iterator for Quotes<'s, 't> {
    type Item = &'t str;

    fn next(&mut self) -> Option<Self::Item> {
        self.spans.next().map(|span| span.raw)
    }
}

impl std::iter::FusedIterator for Quotes<'_, '_> {}
