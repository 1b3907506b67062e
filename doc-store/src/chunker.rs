//! Overlapping character-window chunking.
//!
//! Documents are split into bounded windows with a fixed overlap so that
//! content spanning a window boundary stays visible to at least one
//! embedding. Windows are measured in characters, not bytes, so multi-byte
//! UTF-8 input never splits inside a code point.

use tracing::{debug, trace};

/// Split `text` into overlapping windows of at most `max_chars` characters.
///
/// Leading/trailing whitespace is trimmed first; empty or whitespace-only
/// input yields no chunks. Each consecutive pair of chunks shares `overlap`
/// characters, except where the final chunk is truncated by end-of-text.
///
/// Example with `max_chars=10, overlap=2`:
///   chunk 1: text[0..10]
///   chunk 2: text[8..18]
///   chunk 3: text[16..26]
///
/// Callers are expected to pass `max_chars > overlap`; the window step is
/// clamped to at least one character, so degenerate parameters still
/// terminate instead of looping.
///
/// # Panics
/// Never panics; `max_chars == 0` returns an empty vector.
pub fn split_into_chunks(text: &str, max_chars: usize, overlap: usize) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() || max_chars == 0 {
        trace!("split_into_chunks: empty input or zero window; nothing to do");
        return Vec::new();
    }

    let chars: Vec<char> = trimmed.chars().collect();
    let n = chars.len();

    // Step computation with saturation: ensure forward progress.
    let step = max_chars.saturating_sub(overlap).max(1);

    let mut chunks = Vec::new();
    let mut start = 0usize;

    loop {
        let end = (start + max_chars).min(n);
        chunks.push(chars[start..end].iter().collect());
        if end == n {
            break;
        }
        // Move the window forward, keeping `overlap` characters.
        start += step;
    }

    debug!(
        "split_into_chunks: produced {} chunks (max_chars={}, overlap={})",
        chunks.len(),
        max_chars,
        overlap
    );
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_text_fits_one_chunk() {
        let chunks = split_into_chunks("ABCDEFGHIJ", 10, 2);
        assert_eq!(chunks, vec!["ABCDEFGHIJ".to_string()]);
    }

    #[test]
    fn alphabet_splits_into_three_overlapping_windows() {
        let text = "abcdefghijklmnopqrstuvwxyz";
        let chunks = split_into_chunks(text, 10, 2);
        assert_eq!(chunks, vec![&text[0..10], &text[8..18], &text[16..26]]);
    }

    #[test]
    fn short_text_yields_trimmed_input() {
        let chunks = split_into_chunks("  hello world  ", 100, 10);
        assert_eq!(chunks, vec!["hello world".to_string()]);
    }

    #[test]
    fn empty_and_whitespace_yield_nothing() {
        assert!(split_into_chunks("", 10, 2).is_empty());
        assert!(split_into_chunks("   \n\t  ", 10, 2).is_empty());
    }

    #[test]
    fn zero_window_yields_nothing() {
        assert!(split_into_chunks("abc", 0, 0).is_empty());
    }

    #[test]
    fn covers_text_without_gaps() {
        let text: String = ('a'..='z').cycle().take(1000).collect();
        let max_chars = 80;
        let overlap = 20;
        let chunks = split_into_chunks(&text, max_chars, overlap);

        // Every chunk is bounded and non-empty.
        for c in &chunks {
            let len = c.chars().count();
            assert!(len > 0 && len <= max_chars);
        }
        // Consecutive chunks share exactly `overlap` characters.
        for pair in chunks.windows(2) {
            let prev: Vec<char> = pair[0].chars().collect();
            let next: Vec<char> = pair[1].chars().collect();
            let shared: String = prev[prev.len() - overlap..].iter().collect();
            let lead: String = next[..overlap.min(next.len())].iter().collect();
            assert_eq!(shared, lead);
        }
        // The last chunk ends exactly at the end of the text.
        assert!(text.ends_with(chunks.last().unwrap()));
    }

    #[test]
    fn exact_multiple_of_step_terminates() {
        // 24 chars, window 10, overlap 2 -> step 8; 24 is a step multiple.
        let text: String = ('a'..='x').collect();
        let chunks = split_into_chunks(&text, 10, 2);
        assert!(text.ends_with(chunks.last().unwrap()));
    }

    #[test]
    fn multibyte_input_counts_characters() {
        let text = "日本語のテキストを分割する";
        let chunks = split_into_chunks(text, 5, 1);
        for c in &chunks {
            assert!(c.chars().count() <= 5);
        }
        assert!(text.ends_with(chunks.last().unwrap().as_str()));
    }

    #[test]
    fn degenerate_overlap_still_terminates() {
        // overlap >= max_chars is rejected by config validation, but the
        // splitter itself must stay finite.
        let chunks = split_into_chunks("abcdefghij", 4, 9);
        assert!(!chunks.is_empty());
        assert!(chunks.len() <= 10);
    }
}
