//! Text normalization for extracted cell content.

use unicode_normalization::UnicodeNormalization;

/// Normalize text to NFC and collapse every whitespace run into one space.
///
/// Leading and trailing whitespace is removed. Non-breaking spaces count as
/// whitespace.
pub fn normalize(text: &str) -> String {
    let composed: String = text.nfc().collect();
    composed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize when enabled, otherwise return the text unchanged.
pub(crate) fn clean(text: String, enabled: bool) -> String {
    if enabled {
        normalize(&text)
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(normalize("  Error\n\t code  "), "Error code");
        assert_eq!(normalize("a\u{00A0}b"), "a b");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_nfc() {
        // "e" + combining acute accent
        assert_eq!(normalize("caf\u{0065}\u{0301}"), "caf\u{00E9}");
    }

    #[test]
    fn test_clean_disabled_keeps_text() {
        assert_eq!(clean(" x \n".to_string(), false), " x \n");
        assert_eq!(clean(" x \n".to_string(), true), "x");
    }
}
