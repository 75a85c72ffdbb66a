//! Character-index editing helpers.
//!
//! Caret indices count `char`s, matching the font queries, so every edit
//! converts to a byte offset at the last moment.

/// Number of characters in `text`.
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

fn byte_offset(text: &str, index: usize) -> usize {
    text.char_indices()
        .nth(index)
        .map(|(b, _)| b)
        .unwrap_or(text.len())
}

/// Insert `ch` before the character at `index` (appends past the end).
pub fn insert_char(text: &mut String, index: usize, ch: char) {
    let at = byte_offset(text, index);
    text.insert(at, ch);
}

/// Remove the character at `index`, returning it.
pub fn remove_char(text: &mut String, index: usize) -> Option<char> {
    if index >= char_count(text) {
        return None;
    }
    let at = byte_offset(text, index);
    Some(text.remove(at))
}

/// Caret stop after moving one word left from `index`.
///
/// Scans backwards starting two characters before the caret, so a caret
/// sitting just after a space jumps over that space to the start of the
/// previous word.
pub fn prev_word_boundary(text: &str, index: usize) -> usize {
    if index == 0 {
        return 0;
    }
    let chars: Vec<char> = text.chars().collect();
    let from = (index - 1).min(chars.len());
    chars[..from]
        .iter()
        .rposition(|c| c.is_whitespace())
        .map(|i| i + 1)
        .unwrap_or(0)
}

/// Caret stop after moving one word right from `index`: the next whitespace
/// strictly after the following character, or the end of the text.
pub fn next_word_boundary(text: &str, index: usize) -> usize {
    let chars: Vec<char> = text.chars().collect();
    if index >= chars.len() {
        return chars.len();
    }
    chars
        .iter()
        .enumerate()
        .skip(index + 1)
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, _)| i)
        .unwrap_or(chars.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_remove_by_char_index() {
        let mut text = String::from("héllo");
        insert_char(&mut text, 2, 'x');
        assert_eq!(text, "héxllo");
        insert_char(&mut text, 99, '!');
        assert_eq!(text, "héxllo!");
        assert_eq!(remove_char(&mut text, 1), Some('é'));
        assert_eq!(text, "hxllo!");
        assert_eq!(remove_char(&mut text, 6), None);
        assert_eq!(char_count(&text), 6);
    }

    #[test]
    fn test_prev_word_boundary() {
        let text = "hello world again";
        // Just after the space: back to the start of "hello".
        assert_eq!(prev_word_boundary(text, 6), 0);
        // Middle of "world".
        assert_eq!(prev_word_boundary(text, 9), 6);
        // Start of "again".
        assert_eq!(prev_word_boundary(text, 12), 6);
        assert_eq!(prev_word_boundary(text, 1), 0);
        assert_eq!(prev_word_boundary(text, 0), 0);
    }

    #[test]
    fn test_next_word_boundary() {
        let text = "hello world again";
        assert_eq!(next_word_boundary(text, 0), 5);
        // On the space: skips to the space after "world".
        assert_eq!(next_word_boundary(text, 5), 11);
        assert_eq!(next_word_boundary(text, 12), 17);
        assert_eq!(next_word_boundary(text, 17), 17);
        assert_eq!(next_word_boundary(text, 40), 17);
    }
}
