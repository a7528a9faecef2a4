//! Article chunking: split text into paragraphs, merging small ones.
//!
//! The chunk boundaries produced here determine retrieval granularity, so
//! the merge rule is exact: short paragraphs accumulate until a long
//! paragraph flushes them, and a long paragraph is always emitted alone.

/// Split article text into chunks, merging paragraphs shorter than `min_len`.
///
/// The text is split on line breaks, trimmed, and empty lines dropped.
/// Consecutive paragraphs shorter than `min_len` characters are joined with
/// a single space into one chunk. A paragraph of `min_len` or more
/// characters first flushes any accumulated short paragraphs as their own
/// chunk, then becomes a chunk by itself — it is never merged with
/// neighboring text.
///
/// Returns an empty `Vec` for text with no non-empty lines. Every returned
/// chunk is non-empty, and chunks preserve the original paragraph order.
pub fn chunk_content(content: &str, min_len: usize) -> Vec<String> {
    let paragraphs = content.lines().map(str::trim).filter(|p| !p.is_empty());

    let (mut chunks, tail) = paragraphs.fold(
        (Vec::new(), String::new()),
        |(mut chunks, mut acc), paragraph| {
            if paragraph.chars().count() < min_len {
                if !acc.is_empty() {
                    acc.push(' ');
                }
                acc.push_str(paragraph);
            } else {
                if !acc.is_empty() {
                    chunks.push(std::mem::take(&mut acc));
                }
                chunks.push(paragraph.to_string());
            }
            (chunks, acc)
        },
    );

    if !tail.is_empty() {
        chunks.push(tail);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN_LEN: usize = 200;

    #[test]
    fn short_lines_merge_before_long_line_flushes() {
        let long = "x".repeat(250);
        let content = format!("a\nb\n{long}\nshort");
        let chunks = chunk_content(&content, MIN_LEN);
        assert_eq!(chunks, vec!["a b".to_string(), long, "short".to_string()]);
    }

    #[test]
    fn only_short_lines_produce_one_merged_chunk() {
        let chunks = chunk_content("one\ntwo\nthree", MIN_LEN);
        assert_eq!(chunks, vec!["one two three".to_string()]);
    }

    #[test]
    fn empty_content_produces_no_chunks() {
        assert!(chunk_content("", MIN_LEN).is_empty());
        assert!(chunk_content("\n   \n\t\n", MIN_LEN).is_empty());
    }

    #[test]
    fn single_long_line_is_its_own_chunk() {
        let long = "y".repeat(200);
        assert_eq!(chunk_content(&long, MIN_LEN), vec![long.clone()]);
    }

    #[test]
    fn consecutive_long_lines_stay_separate() {
        let a = "a".repeat(210);
        let b = "b".repeat(220);
        let content = format!("{a}\n{b}");
        assert_eq!(chunk_content(&content, MIN_LEN), vec![a, b]);
    }

    #[test]
    fn lines_are_trimmed_before_length_check() {
        // 199 chars of content padded with whitespace stays below the threshold.
        let padded = format!("   {}   ", "z".repeat(199));
        let chunks = chunk_content(&format!("{padded}\nend"), MIN_LEN);
        assert_eq!(chunks, vec![format!("{} end", "z".repeat(199))]);
    }

    #[test]
    fn threshold_counts_chars_not_bytes() {
        // 150 multibyte chars are short even though the byte length exceeds 200.
        let multibyte = "é".repeat(150);
        let chunks = chunk_content(&format!("{multibyte}\nafter"), MIN_LEN);
        assert_eq!(chunks, vec![format!("{multibyte} after")]);
    }
}
