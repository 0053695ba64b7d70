use super::*;
use std::path::Path;

struct UpperExtractor;

impl Extractor for UpperExtractor {
    fn extract(&self, _name: &str, bytes: &[u8]) -> Result<String, ExtractError> {
        Ok(String::from_utf8_lossy(bytes).to_uppercase())
    }
}

// ========================================================================
// PlainTextExtractor Tests
// ========================================================================

#[test]
fn test_plain_text_utf8() {
    let text = PlainTextExtractor
        .extract("notes.txt", "Hello, 世界".as_bytes())
        .unwrap();
    assert_eq!(text, "Hello, 世界");
}

#[test]
fn test_plain_text_strips_bom() {
    let text = PlainTextExtractor
        .extract("notes.txt", b"\xEF\xBB\xBFhello")
        .unwrap();
    assert_eq!(text, "hello");
}

#[test]
fn test_plain_text_rejects_binary() {
    let err = PlainTextExtractor
        .extract("blob.txt", &[0xFF, 0xFE, 0x00])
        .unwrap_err();
    assert!(matches!(err, ExtractError::InvalidUtf8 { .. }));
    assert!(err.to_string().contains("blob.txt"));
}

// ========================================================================
// ExtractorRegistry Tests
// ========================================================================

#[test]
fn test_registry_new_is_empty() {
    let registry = ExtractorRegistry::new();
    assert_eq!(registry.extractor_count(), 0);
    assert!(!registry.supports("a.txt"));
}

#[test]
fn test_registry_defaults_cover_text_and_code() {
    let registry = ExtractorRegistry::with_defaults();
    for name in ["plan.txt", "README.md", "main.rs", "app.py", "Index.TSX"] {
        assert!(registry.supports(name), "Failed for {}", name);
    }
    assert!(!registry.supports("report.pdf"));
    assert!(!registry.supports("Makefile"));
}

#[test]
fn test_registry_unsupported_extension() {
    let registry = ExtractorRegistry::with_defaults();
    let err = registry.extract("report.pdf", b"%PDF").unwrap_err();
    assert!(matches!(err, ExtractError::UnsupportedExtension(ref ext) if ext == "pdf"));

    let text = registry.extract_or_empty("report.pdf", b"%PDF").unwrap();
    assert_eq!(text, "");
}

#[test]
fn test_registry_extract_or_empty_keeps_decode_errors() {
    let registry = ExtractorRegistry::with_defaults();
    assert!(registry.extract_or_empty("bad.txt", &[0xC3]).is_err());
}

#[test]
fn test_registry_register_overrides() {
    let mut registry = ExtractorRegistry::with_defaults();
    registry.register("TXT", UpperExtractor);

    let text = registry.extract("a.txt", b"shout").unwrap();
    assert_eq!(text, "SHOUT");
    assert!(registry.registered_extensions().contains(&"txt"));
}

// ========================================================================
// Language detection Tests
// ========================================================================

#[test]
fn test_detect_language() {
    let test_cases = vec![
        ("file.rs", Some("rust")),
        ("file.py", Some("python")),
        ("file.jsx", Some("javascript")),
        ("file.hpp", Some("cpp")),
        ("file.txt", Some("text")),
        ("file.unknown", None),
        ("Makefile", None),
    ];

    for (path, expected) in test_cases {
        assert_eq!(detect_language(Path::new(path)), expected, "Failed for {}", path);
    }
}

#[test]
fn test_extension_of() {
    assert_eq!(extension_of("dir/File.PY"), "py");
    assert_eq!(extension_of("noext"), "");
}
