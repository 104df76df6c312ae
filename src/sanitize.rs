//! Filename stem sanitization for video titles.

/// Characters that are never allowed in the generated stem.
const INVALID_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Maximum stem length, in characters.
const MAX_LEN: usize = 200;

/// Fallback stem when nothing usable survives sanitization.
pub const UNTITLED: &str = "untitled";

/// Convert an arbitrary title into a filesystem-safe stem.
///
/// Spaces become dashes, reserved characters are dropped, dash runs are
/// collapsed, and leading/trailing dashes are trimmed. The result is capped at
/// 200 characters without a dangling dash. Never returns an empty string.
pub fn sanitize_filename(title: &str) -> String {
    let mut sanitized = String::with_capacity(title.len());

    for ch in title.chars() {
        let ch = if ch == ' ' { '-' } else { ch };
        if INVALID_CHARS.contains(&ch) {
            continue;
        }
        if ch == '-' && sanitized.ends_with('-') {
            continue;
        }
        sanitized.push(ch);
    }

    let mut sanitized = sanitized.trim_matches('-').to_string();

    if sanitized.chars().count() > MAX_LEN {
        sanitized = sanitized.chars().take(MAX_LEN).collect();
        sanitized.truncate(sanitized.trim_end_matches('-').len());
    }

    if sanitized.is_empty() {
        UNTITLED.to_string()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaces_become_single_dashes() {
        assert_eq!(sanitize_filename("Test   Video   Title"), "Test-Video-Title");
        assert_eq!(sanitize_filename("Hello World"), "Hello-World");
    }

    #[test]
    fn test_invalid_characters_removed() {
        assert_eq!(
            sanitize_filename("What? A <Great> \"Video\": Part 1/2"),
            "What-A-Great-Video-Part-12"
        );
        assert_eq!(sanitize_filename("a|b*c\\d"), "abcd");
    }

    #[test]
    fn test_dash_runs_collapse_across_removed_chars() {
        assert_eq!(sanitize_filename("a - : - b"), "a-b");
        assert_eq!(sanitize_filename("a-?-b"), "a-b");
    }

    #[test]
    fn test_empty_falls_back_to_untitled() {
        assert_eq!(sanitize_filename(""), "untitled");
        assert_eq!(sanitize_filename("---<>:\"/\\|?*---"), "untitled");
        assert_eq!(sanitize_filename("   "), "untitled");
    }

    #[test]
    fn test_truncation_drops_trailing_dash() {
        let title = format!("{} tail", "a".repeat(199));
        let result = sanitize_filename(&title);
        assert_eq!(result, "a".repeat(199));

        let long = "b".repeat(500);
        assert_eq!(sanitize_filename(&long).chars().count(), 200);
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let title = "é".repeat(250);
        let result = sanitize_filename(&title);
        assert_eq!(result.chars().count(), 200);
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "",
            "Test   Video   Title",
            "--leading and trailing--",
            "---<>:\"/\\|?*---",
            "Mixed: Case / Title? * with | pipes",
            "ünïcödé titles work too",
        ];
        for input in inputs {
            let once = sanitize_filename(input);
            assert_eq!(sanitize_filename(&once), once, "input: {:?}", input);
        }

        let long = format!("{} x", "y".repeat(199));
        let once = sanitize_filename(&long);
        assert_eq!(sanitize_filename(&once), once);
    }
}
