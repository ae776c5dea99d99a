//! Character-based token estimation and truncation.
//!
//! No model tokenizer is involved; four characters count as one token.

/// Characters per estimated token.
pub const CHARS_PER_TOKEN: usize = 4;

/// Appended whenever text is cut to fit a budget.
pub const TRUNCATION_MARKER: &str = "\n[...truncated for token budget...]";

/// Estimated token count: `floor(chars / 4) + 1`.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / CHARS_PER_TOKEN + 1
}

/// Whether `text` fits within `max_tokens`.
pub fn fits_budget(text: &str, max_tokens: usize) -> bool {
    estimate_tokens(text) <= max_tokens
}

/// Cut `text` down to the char count implied by `max_tokens` and append
/// [`TRUNCATION_MARKER`].
///
/// Text already within budget is returned unchanged. When a newline falls
/// after 70% of the cut point the cut moves back to it so no line is split.
/// The marker is not counted against the budget. Re-applying with the same
/// budget returns the same text. After a back-off, the marker's leading
/// newline lands past the 70% point, so the second cut stops at the same
/// place.
pub fn truncate_to_budget(text: &str, max_tokens: usize) -> String {
    if fits_budget(text, max_tokens) {
        return text.to_string();
    }

    let max_chars = max_tokens.saturating_mul(CHARS_PER_TOKEN);

    let mut cut = prefix_chars(text, max_chars);
    if let Some(newline) = cut.rfind('\n') {
        let newline_chars = cut[..newline].chars().count();
        if newline_chars * 10 > max_chars * 7 {
            cut = &cut[..newline];
        }
    }

    let mut truncated = String::with_capacity(cut.len() + TRUNCATION_MARKER.len());
    truncated.push_str(cut);
    truncated.push_str(TRUNCATION_MARKER);
    truncated
}

fn prefix_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate() {
        assert_eq!(estimate_tokens(""), 1);
        assert_eq!(estimate_tokens("abc"), 1);
        assert_eq!(estimate_tokens("abcd"), 2);
        assert_eq!(estimate_tokens(&"x".repeat(400)), 101);
        // chars, not bytes
        assert_eq!(estimate_tokens("ΔΔΔΔ"), 2);
    }

    #[test]
    fn test_under_budget_is_noop() {
        let text = "Glucose: latest glucose: 100.0 mg/dL";
        assert_eq!(truncate_to_budget(text, 700), text);
    }

    #[test]
    fn test_truncates_long_text() {
        let text = "a".repeat(1000);
        let out = truncate_to_budget(&text, 50);
        assert_eq!(out.strip_suffix(TRUNCATION_MARKER), Some("a".repeat(200).as_str()));
    }

    #[test]
    fn test_small_budget_keeps_content() {
        let text = "a".repeat(1000);
        let out = truncate_to_budget(&text, 8);
        assert_eq!(out, format!("{}{}", "a".repeat(32), TRUNCATION_MARKER));
    }

    #[test]
    fn test_prefers_line_boundary() {
        let line = format!("{}\n", "b".repeat(19));
        let text = line.repeat(50);
        let out = truncate_to_budget(&text, 50);
        let body = out.strip_suffix(TRUNCATION_MARKER).unwrap();
        assert!(body.chars().all(|c| c == 'b' || c == '\n'));
        assert!(body.ends_with('b'));
        assert_eq!(body.len() % 20, 19);
    }

    #[test]
    fn test_ignores_early_newline() {
        let text = format!("head\n{}", "c".repeat(1000));
        let out = truncate_to_budget(&text, 50);
        let body = out.strip_suffix(TRUNCATION_MARKER).unwrap();
        assert!(body.starts_with("head\nccc"));
        assert_eq!(body.chars().count(), 200);
    }

    #[test]
    fn test_idempotent() {
        let text = (0..200)
            .map(|i| format!("line {} with Δ and some padding", i))
            .collect::<Vec<_>>()
            .join("\n");
        for budget in [0, 1, 5, 10, 40, 100, 700, 5000] {
            let once = truncate_to_budget(&text, budget);
            let twice = truncate_to_budget(&once, budget);
            assert_eq!(once, twice, "budget {}", budget);
        }
    }

    #[test]
    fn test_zero_budget() {
        assert_eq!(truncate_to_budget("", 0), TRUNCATION_MARKER);
        assert_eq!(truncate_to_budget("anything", 0), TRUNCATION_MARKER);
    }

    #[test]
    fn test_multibyte_boundary() {
        let text = "é".repeat(500);
        let out = truncate_to_budget(&text, 20);
        assert!(out.ends_with(TRUNCATION_MARKER));
        let body = out.strip_suffix(TRUNCATION_MARKER).unwrap();
        assert!(body.chars().all(|c| c == 'é'));
        assert_eq!(body.chars().count(), 80);
    }
}
