// WHY: quotes in wrapped prose span hard line breaks; one-line display needs them flattened

use super::boundaries::is_space;

/// Collapse line breaks and whitespace runs in a quote to single spaces, trimming the ends
pub fn normalize_quote(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    normalize_quote_into(text, &mut result);
    result
}

/// Normalize into a supplied buffer so batch output can reuse one allocation
pub fn normalize_quote_into(text: &str, buffer: &mut String) {
    buffer.clear();
    buffer.reserve(text.len());

    let mut pending_space = false;

    // \r\n needs no special case: both halves are whitespace and collapse together
    for ch in text.trim_matches(is_space).chars() {
        if is_space(ch) {
            pending_space = true;
            continue;
        }
        if pending_space {
            buffer.push(' ');
            pending_space = false;
        }
        buffer.push(ch);
    }
}
