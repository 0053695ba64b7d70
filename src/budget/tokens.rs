/// Estimate model token usage as the number of whitespace-delimited words.
///
/// This is a deliberate approximation, not a tokenizer. Chunk sizing and truncation are
/// calibrated against it, so swapping in an exact tokenizer changes chunk counts.
pub fn estimate_tokens(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Collapse every run of whitespace (line breaks included) into a single space
/// and trim both ends.
pub fn sanitize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
