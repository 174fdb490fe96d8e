//! # Text Layout
//!
//! Greedy word wrapping used by the message log, plus small string helpers
//! for composing messages.

/// Wraps `text` into lines no wider than `width` columns.
///
/// Words longer than the width are split. Whitespace-only input yields no
/// lines.
///
/// # Examples
///
/// ```
/// use delve::wrap_text;
///
/// let lines = wrap_text("the quick brown fox", 10);
/// assert_eq!(lines, vec!["the quick", "brown fox"]);
/// ```
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let current_len = current.chars().count();
        if current.is_empty() {
            current.extend(word);
        } else if current_len + 1 + word.len() <= width {
            current.push(' ');
            current.extend(word);
        } else {
            lines.push(std::mem::replace(&mut current, word.into_iter().collect()));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Uppercases the first character of `s`.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
