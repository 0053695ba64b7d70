use super::*;

fn words(n: usize) -> String {
    (0..n)
        .map(|i| format!("w{}", i))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Rebuild the source text by dropping the part of each chunk already covered
fn reassemble(chunks: &[Chunk]) -> String {
    let mut out = String::new();
    let mut covered: usize = 0;
    for chunk in chunks {
        let skip = covered.saturating_sub(chunk.metadata.start_offset);
        out.extend(chunk.text.chars().skip(skip));
        covered = covered.max(chunk.metadata.end_offset);
    }
    out
}

// ========================================================================
// Token estimation
// ========================================================================

#[test]
fn test_estimate_tokens() {
    assert_eq!(estimate_tokens("the quick brown fox"), 4);
    assert_eq!(estimate_tokens(""), 0);
    assert_eq!(estimate_tokens("   \n\t "), 0);
    assert_eq!(estimate_tokens("  leading and\ntrailing  "), 3);
}

#[test]
fn test_sanitize_collapses_whitespace() {
    assert_eq!(sanitize_text("a  b\n\nc\t d "), "a b c d");
    assert_eq!(sanitize_text("\n\n"), "");
    assert_eq!(estimate_tokens(&sanitize_text("x\ny z")), 3);
}

// ========================================================================
// Chunk sizing
// ========================================================================

#[test]
fn test_size_unchanged_within_limit() {
    assert_eq!(determine_chunk_size(&words(4096), 1000, 500, 4096), 1000);
    assert_eq!(determine_chunk_size("", 1000, 500, 4096), 1000);
}

#[test]
fn test_size_halves_at_double_limit() {
    assert_eq!(determine_chunk_size(&words(8192), 1000, 500, 4096), 500);
}

#[test]
fn test_size_scales_between_base_and_floor() {
    // factor = 5000 / 4096, 1000 / factor = 819.2
    assert_eq!(chunk_size_for_tokens(5000, 1000, 500, 4096), 819);
}

#[test]
fn test_size_is_monotonic_past_limit() {
    let mut previous = usize::MAX;
    for tokens in (4097..40_000).step_by(257) {
        let size = chunk_size_for_tokens(tokens, 1000, 100, 4096);
        assert!(size <= previous, "size grew at {} tokens", tokens);
        assert!(size <= 1000);
        previous = size;
    }
}

#[test]
fn test_size_never_below_floor() {
    for tokens in [4097, 10_000, 1_000_000, usize::MAX / 2] {
        assert!(chunk_size_for_tokens(tokens, 1000, 500, 4096) >= 500);
    }
    assert_eq!(chunk_size_for_tokens(1_000_000, 1000, 500, 4096), 500);
}

// ========================================================================
// Splitting
// ========================================================================

#[test]
fn test_split_example() {
    let chunks = split_into_chunks("abcdefghij", 4, 1).unwrap();
    let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["abcd", "defg", "ghij", "j"]);
}

#[test]
fn test_split_empty_text() {
    let chunks = split_into_chunks("", 1000, 100).unwrap();
    assert!(chunks.is_empty());
}

#[test]
fn test_split_short_text_single_chunk() {
    let chunks = split_into_chunks("short text", 1000, 100).unwrap();
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].text, "short text");
}

#[test]
fn test_split_rejects_stalled_window() {
    let err = split_into_chunks("some text", 100, 100).unwrap_err();
    assert!(matches!(err, BudgetError::InvalidConfiguration { .. }));

    assert!(split_into_chunks("some text", 10, 50).is_err());
    assert!(split_into_chunks("some text", 0, 0).is_err());
}

#[test]
fn test_split_rejects_before_checking_emptiness() {
    assert!(split_into_chunks("", 100, 100).is_err());
}

#[test]
fn test_split_reconstructs_text() {
    let text = sanitize_text(&words(700));
    for (size, overlap) in [(1000, 100), (500, 100), (37, 0), (37, 36), (4, 1)] {
        let chunks = split_into_chunks(&text, size, overlap).unwrap();
        assert_eq!(reassemble(&chunks), text, "size={} overlap={}", size, overlap);
    }
}

#[test]
fn test_split_chunks_are_bounded() {
    let text = words(300);
    let chunks = split_into_chunks(&text, 128, 16).unwrap();
    let (last, rest) = chunks.split_last().unwrap();

    for chunk in rest {
        assert_eq!(chunk.char_len(), 128);
    }
    assert!(last.char_len() <= 128);
}

#[test]
fn test_split_chunk_count() {
    let text = "x".repeat(1000);
    let chunks = split_into_chunks(&text, 100, 10).unwrap();
    // starts 0, 90, ..., 990
    assert_eq!(chunks.len(), 12);
}

// ========================================================================
// Truncation
// ========================================================================

#[test]
fn test_truncate_example() {
    let t = truncate_to_budget(&words(5000), 200, 4096);
    assert!(t.truncated);
    assert_eq!(t.original_tokens, 5000);
    assert_eq!(t.final_tokens, 3846);
    assert_eq!(estimate_tokens(&t.text), 3846);
    assert!(t.text.starts_with("w0 w1 w2"));
    assert!(t.text.ends_with("w3845"));
}

#[test]
fn test_truncate_within_budget_is_untouched() {
    let text = "keep\nthis   text";
    let t = truncate_to_budget(text, 10, 4096);
    assert!(!t.truncated);
    assert_eq!(t.text, text);
    assert_eq!(t.original_tokens, 3);
    assert_eq!(t.final_tokens, 3);
    assert!(t.warning().is_none());
}

#[test]
fn test_truncate_respects_allowance() {
    for (n, reserved) in [(3900, 150), (4096, 0), (10_000, 1000), (100, 4000)] {
        let t = truncate_to_budget(&words(n), reserved, 4096);
        assert!(estimate_tokens(&t.text) <= allowed_tokens(4096, reserved, DEFAULT_SAFETY_MARGIN));
    }
}

#[test]
fn test_truncate_enforces_margin_below_limit() {
    // 3870 + 200 fits 4096, but not once the margin is held back
    let t = truncate_to_budget(&words(3870), 200, 4096);
    assert!(t.truncated);
    assert_eq!(t.final_tokens, 3846);
}

#[test]
fn test_truncate_is_idempotent() {
    let first = truncate_to_budget(&words(5000), 200, 4096);
    let second = truncate_to_budget(&first.text, 200, 4096);
    assert!(!second.truncated);
    assert_eq!(second.text, first.text);
}

#[test]
fn test_truncate_reserved_exceeds_limit() {
    let t = truncate_to_budget("a b c", 5000, 4096);
    assert!(t.truncated);
    assert_eq!(t.text, "");
    assert_eq!(t.final_tokens, 0);
}

#[test]
fn test_truncation_warning() {
    let t = truncate_to_budget(&words(5000), 200, 4096);
    let warning = t.warning().unwrap();
    assert_eq!(
        warning,
        BudgetWarning::Truncated {
            original_tokens: 5000,
            final_tokens: 3846
        }
    );
    assert!(warning.to_string().contains("5000"));
}

// ========================================================================
// Config and budgeter
// ========================================================================

#[test]
fn test_config_defaults() {
    let config = BudgetConfig::default();
    assert_eq!(config.token_limit, 4096);
    assert_eq!(config.base_chunk_size, 1000);
    assert_eq!(config.min_chunk_size, 500);
    assert_eq!(config.chunk_overlap, 100);
    assert_eq!(config.safety_margin, 50);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_partial_json() {
    let config: BudgetConfig = serde_json::from_str(r#"{"token_limit": 8192}"#).unwrap();
    assert_eq!(config.token_limit, 8192);
    assert_eq!(config.base_chunk_size, 1000);
}

#[test]
fn test_config_validation() {
    let bad = [
        BudgetConfig {
            token_limit: 0,
            ..Default::default()
        },
        BudgetConfig {
            min_chunk_size: 2000,
            ..Default::default()
        },
        BudgetConfig {
            chunk_overlap: 500,
            ..Default::default()
        },
        BudgetConfig {
            base_chunk_size: 0,
            ..Default::default()
        },
    ];

    for config in bad {
        assert!(ChunkBudgeter::new(config).is_err());
    }
}

#[test]
fn test_budgeter_split_adapts_size() {
    let budgeter = ChunkBudgeter::new(BudgetConfig {
        token_limit: 100,
        base_chunk_size: 400,
        min_chunk_size: 100,
        chunk_overlap: 20,
        safety_margin: 10,
    })
    .unwrap();

    let text = words(400);
    assert_eq!(budgeter.chunk_size_for(&text), 100);

    let chunks = budgeter.split(&text).unwrap();
    assert!(chunks.iter().all(|c| c.char_len() <= 100));
    assert_eq!(reassemble(&chunks), text);
}

#[test]
fn test_budgeter_truncate_uses_margin() {
    let budgeter = ChunkBudgeter::new(BudgetConfig {
        safety_margin: 0,
        ..Default::default()
    })
    .unwrap();

    let t = budgeter.truncate(&words(5000), 96);
    assert_eq!(t.final_tokens, 4000);
}

#[test]
fn test_budgeter_check_input() {
    let budgeter = ChunkBudgeter::default();
    assert!(budgeter.check_input(&words(4096)).is_none());

    let warning = budgeter.check_input(&words(4097)).unwrap();
    assert_eq!(
        warning,
        BudgetWarning::InputExceedsLimit {
            total_tokens: 4097,
            limit: 4096
        }
    );
    assert!(warning.to_string().starts_with("Uploaded documents' token count (4097)"));
}
