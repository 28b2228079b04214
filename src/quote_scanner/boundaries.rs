// WHY: Quote delimiters are only meaningful next to the right kind of neighbour
// These checks stand in for the lookaround assertions a backtracking regex would use

/// Whitespace for delimiter adjacency purposes
/// Includes the ASCII information separators, which prose files occasionally carry as line breaks
pub fn is_space(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '\u{1C}'..='\u{1F}')
}

/// Word characters for target-word token boundaries
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Character ending immediately before `byte_pos`, if any
pub fn char_before(text: &str, byte_pos: usize) -> Option<char> {
    text[..byte_pos].chars().next_back()
}

/// Character starting at `byte_pos`, if any
pub fn char_at(text: &str, byte_pos: usize) -> Option<char> {
    text[byte_pos..].chars().next()
}

/// An opening delimiter at `byte_pos` must follow whitespace or sit at the start of the text
pub fn opens_after_space(text: &str, byte_pos: usize) -> bool {
    char_before(text, byte_pos).map_or(true, is_space)
}

/// A closing delimiter at `byte_pos` must directly follow a non-whitespace character
pub fn closes_after_text(text: &str, byte_pos: usize) -> bool {
    char_before(text, byte_pos).is_some_and(|ch| !is_space(ch))
}

/// The target word must be preceded by a non-word character; the start of text does not count
pub fn token_starts_at(text: &str, byte_pos: usize) -> bool {
    char_before(text, byte_pos).is_some_and(|ch| !is_word_char(ch))
}

/// The target word must be followed by a non-word character; the end of text does not count
pub fn token_ends_at(text: &str, byte_pos: usize) -> bool {
    char_at(text, byte_pos).is_some_and(|ch| !is_word_char(ch))
}
