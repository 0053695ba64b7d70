use super::{ExtractError, Extractor, PlainTextExtractor, extension_of};
use std::collections::HashMap;
use std::sync::Arc;

/// Extensions read as UTF-8 text out of the box
const TEXT_EXTENSIONS: &[&str] = &[
    "txt", "md", "rs", "py", "js", "jsx", "mjs", "ts", "tsx", "go", "java", "c", "cpp", "cc",
    "cxx", "h", "hpp", "cs", "rb", "php", "swift", "kt", "kts", "scala", "json", "yaml", "yml",
    "toml", "sh", "bash", "html", "css", "sql",
];

/// Dispatch table from file extension to extractor.
///
/// Binary formats (PDF, DOCX) are not built in; register an extractor for them.
#[derive(Clone, Default)]
pub struct ExtractorRegistry {
    /// Extension -> Extractor mapping
    map: HashMap<String, Arc<dyn Extractor>>,
}

impl ExtractorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the plain-text extractor bound to text and source extensions
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        let plain: Arc<dyn Extractor> = Arc::new(PlainTextExtractor);
        for ext in TEXT_EXTENSIONS {
            registry.map.insert((*ext).to_string(), Arc::clone(&plain));
        }
        registry
    }

    /// Register an extractor for a file extension (without dot, e.g. "pdf")
    pub fn register(&mut self, extension: impl Into<String>, extractor: impl Extractor + 'static) {
        let extension: String = extension.into();
        self.map.insert(extension.to_lowercase(), Arc::new(extractor));
    }

    /// Select the extractor for a file name
    pub fn select(&self, name: &str) -> Option<&dyn Extractor> {
        self.map.get(&extension_of(name)).map(|e| &**e)
    }

    pub fn supports(&self, name: &str) -> bool {
        self.select(name).is_some()
    }

    /// Extract text, failing on unsupported extensions
    pub fn extract(&self, name: &str, bytes: &[u8]) -> Result<String, ExtractError> {
        let extractor = self
            .select(name)
            .ok_or_else(|| ExtractError::UnsupportedExtension(extension_of(name)))?;
        extractor.extract(name, bytes)
    }

    /// Extract text, treating unsupported extensions as empty documents
    pub fn extract_or_empty(&self, name: &str, bytes: &[u8]) -> Result<String, ExtractError> {
        match self.extract(name, bytes) {
            Err(ExtractError::UnsupportedExtension(ext)) => {
                tracing::warn!(file = name, extension = %ext, "Unsupported file type");
                Ok(String::new())
            }
            other => other,
        }
    }

    /// Get the number of registered extensions
    pub fn extractor_count(&self) -> usize {
        self.map.len()
    }

    /// List all registered extensions
    pub fn registered_extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.map.keys().map(|s| s.as_str()).collect();
        exts.sort_unstable();
        exts
    }
}
