mod error;
mod language;
mod plain;
mod registry;

#[cfg(test)]
mod tests;

pub use error::ExtractError;
pub use language::detect_language;
pub use plain::PlainTextExtractor;
pub use registry::ExtractorRegistry;

/// Turns uploaded file bytes into text
pub trait Extractor: Send + Sync {
    /// Extract the text content of a file
    ///
    /// # Arguments
    /// * `name` - Uploaded file name (e.g., "requirements.txt")
    /// * `bytes` - Raw file contents
    fn extract(&self, name: &str, bytes: &[u8]) -> Result<String, ExtractError>;
}

/// Lower-cased extension of `name` without the dot, or "" when there is none
pub fn extension_of(name: &str) -> String {
    std::path::Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default()
}
