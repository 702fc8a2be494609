//! Text measuring helpers shared by the field pipelines.
//!
//! Form values come from a browser, so lengths are counted in UTF-16 code
//! units and the byte order mark counts as whitespace, as it does there.

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Length of `text` in UTF-16 code units
pub fn text_length(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Whitespace as a browser form sees it: Unicode whitespace plus U+FEFF
pub fn is_form_whitespace(c: char) -> bool {
    c.is_whitespace() || c == BYTE_ORDER_MARK
}

/// Strips leading and trailing [form whitespace](is_form_whitespace)
pub fn trim_input(text: &str) -> &str {
    text.trim_matches(is_form_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_astral_characters_count_twice() {
        assert_eq!(text_length("abc"), 3);
        assert_eq!(text_length("é"), 1);
        assert_eq!(text_length("\u{1F600}"), 2);
        assert_eq!(text_length("Aa1!\u{1F600}\u{1F600}"), 8);
    }

    #[test]
    fn test_byte_order_mark_is_trimmed() {
        assert_eq!(trim_input("\u{FEFF} user@example.com\t"), "user@example.com");
        assert!(is_form_whitespace('\u{FEFF}'));
        assert!(!is_form_whitespace('a'));
    }
}
