//! Escape codec for entry text.
//!
//! Chat transports deliver command arguments on a single line, so multi-line
//! entry text travels as literal `\n` and `\t` two-character sequences.
//! [`unescape`] turns those into real newlines/tabs before text is stored;
//! [`escape`] is the inverse, applied when text is handed back for
//! round-trip editing.

/// Convert literal `\n`/`\t` sequences into real newline/tab characters.
pub fn unescape(text: &str) -> String {
    text.replace("\\n", "\n").replace("\\t", "\t")
}

/// Convert real newline/tab characters into literal `\n`/`\t` sequences.
pub fn escape(text: &str) -> String {
    text.replace('\n', "\\n").replace('\t', "\\t")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unescape_converts_sequences() {
        assert_eq!(unescape("line1\\nline2"), "line1\nline2");
        assert_eq!(unescape("col1\\tcol2"), "col1\tcol2");
    }

    #[test]
    fn escape_converts_control_characters() {
        assert_eq!(escape("line1\nline2"), "line1\\nline2");
        assert_eq!(escape("col1\tcol2"), "col1\\tcol2");
    }

    #[test]
    fn plain_text_untouched() {
        assert_eq!(unescape("no sequences here"), "no sequences here");
        assert_eq!(escape("no control chars here"), "no control chars here");
    }

    #[test]
    fn unescape_escape_round_trip() {
        let raw = "first\\nsecond\\tindented";
        assert_eq!(escape(&unescape(raw)), raw);
    }

    #[test]
    fn escape_unescape_round_trip() {
        let text = "first\nsecond\tindented\nthird";
        assert_eq!(unescape(&escape(text)), text);
    }

    #[test]
    fn mixed_sequences() {
        let raw = "a\\nb\\tc\\nd";
        let text = unescape(raw);
        assert_eq!(text, "a\nb\tc\nd");
        assert_eq!(escape(&text), raw);
    }

    #[test]
    fn empty_string() {
        assert_eq!(unescape(""), "");
        assert_eq!(escape(""), "");
    }
}
