use super::tokens::estimate_tokens;

/// Pick a chunk size (in characters) for `text`.
///
/// Inputs within `token_limit` keep `base_size`. Larger inputs shrink the size in
/// proportion to how far they overshoot the limit, never below `min_size`.
pub fn determine_chunk_size(
    text: &str,
    base_size: usize,
    min_size: usize,
    token_limit: usize,
) -> usize {
    chunk_size_for_tokens(estimate_tokens(text), base_size, min_size, token_limit)
}

/// Same as [`determine_chunk_size`] for an already-estimated token count.
pub fn chunk_size_for_tokens(
    tokens: usize,
    base_size: usize,
    min_size: usize,
    token_limit: usize,
) -> usize {
    if tokens <= token_limit {
        return base_size;
    }

    // token_limit == 0 gives an infinite factor, which floors to zero and lands on min_size
    let factor = tokens as f64 / token_limit as f64;
    let scaled = (base_size as f64 / factor).floor() as usize;
    scaled.max(min_size)
}
