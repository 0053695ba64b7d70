use super::{ExtractError, Extractor};

/// Extractor for plain text and source code: the bytes must be UTF-8
pub struct PlainTextExtractor;

impl Extractor for PlainTextExtractor {
    fn extract(&self, name: &str, bytes: &[u8]) -> Result<String, ExtractError> {
        let text = std::str::from_utf8(bytes).map_err(|source| ExtractError::InvalidUtf8 {
            name: name.to_string(),
            source,
        })?;

        // Editors on Windows like to prepend a BOM
        Ok(text.strip_prefix('\u{feff}').unwrap_or(text).to_string())
    }
}
