use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::budget::sanitize_text;
use crate::extract::{ExtractError, ExtractorRegistry};

/// Extracted text of one uploaded file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// File name as uploaded (not a filesystem path)
    pub name: String,
    pub text: String,
}

impl Document {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Final path component of the name
    pub fn base_name(&self) -> &str {
        Path::new(&self.name)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.name)
    }
}

/// Sanitized text of every non-empty document, separated by blank lines
pub fn combined_text(documents: &[Document]) -> String {
    documents
        .iter()
        .map(|d| sanitize_text(&d.text))
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Directory names never descended into
const IGNORED_DIRS: &[&str] = &[
    "target",
    "node_modules",
    ".git",
    ".svn",
    ".hg",
    "build",
    "dist",
    "__pycache__",
    ".pytest_cache",
    ".mypy_cache",
    ".tox",
    "venv",
    ".venv",
    "vendor",
];

const IGNORED_FILES: &[&str] = &["Cargo.lock", "package-lock.json", "yarn.lock"];
const IGNORED_SUFFIXES: &[&str] = &[".min.js", ".min.css", ".map"];

/// Whether a directory with this name is skipped during a walk
pub fn is_ignored_dir(name: &str) -> bool {
    IGNORED_DIRS.contains(&name)
}

/// Check if a file should be ignored, given its path relative to the walk root
pub fn should_ignore(path: &Path) -> bool {
    let in_ignored_dir = path
        .parent()
        .into_iter()
        .flat_map(|p| p.components())
        .any(|c| c.as_os_str().to_str().is_some_and(is_ignored_dir));
    if in_ignored_dir {
        return true;
    }

    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    IGNORED_FILES.contains(&file_name) || IGNORED_SUFFIXES.iter().any(|s| file_name.ends_with(s))
}

/// Collect the files under `root` that `registry` can read, sorted by path.
///
/// A file path is returned as-is, even when the registry cannot read it, so the
/// caller gets a clear error instead of silently processing nothing.
pub fn collect_files(
    root: &Path,
    registry: &ExtractorRegistry,
) -> Result<Vec<PathBuf>, ExtractError> {
    let io_err = |source: std::io::Error| ExtractError::Io {
        name: root.display().to_string(),
        source,
    };

    let meta = fs::metadata(root).map_err(io_err)?;
    if meta.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0
                || !e.file_type().is_dir()
                || !is_ignored_dir(&e.file_name().to_string_lossy())
        });

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| io_err(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
        if should_ignore(rel) {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if registry.supports(&name) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

/// Read a file from disk and extract its text
pub fn load_document(path: &Path, registry: &ExtractorRegistry) -> Result<Document, ExtractError> {
    let name = path.display().to_string();
    let bytes = fs::read(path).map_err(|source| ExtractError::Io {
        name: name.clone(),
        source,
    })?;

    let text = registry.extract(&name, &bytes)?;
    Ok(Document { name, text })
}
