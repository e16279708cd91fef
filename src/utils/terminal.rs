//! Terminal output sanitization
//!
//! # Security: Terminal Injection Prevention
//!
//! Titles, models, category names and content all come from imported documents. They are
//! passed through [`strip_ansi_codes`] before `list` and `show` print them, so an imported
//! chat cannot clear the screen, move the cursor or restyle the terminal.

const ESC: char = '\x1b';

/// Strips ANSI CSI sequences and control characters other than tab, newline and CR
///
/// # Examples
///
/// ```
/// use chat_labels::utils::terminal::strip_ansi_codes;
///
/// let title = "\x1b[2JHow do lifetimes work?\x07";
/// assert_eq!(strip_ansi_codes(title), "How do lifetimes work?");
/// ```
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        // CSI: ESC [ params... final letter
        if ch == ESC && chars.peek() == Some(&'[') {
            chars.next();
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }

        if ch.is_control() && !matches!(ch, '\t' | '\n' | '\r') {
            continue;
        }
        result.push(ch);
    }

    result
}
