use std::path::Path;

/// Fence tag for each family of source extensions
const LANGUAGES: &[(&str, &[&str])] = &[
    ("rust", &["rs"]),
    ("python", &["py", "pyi"]),
    ("javascript", &["js", "jsx", "mjs", "cjs"]),
    ("typescript", &["ts", "tsx"]),
    ("go", &["go"]),
    ("java", &["java"]),
    ("kotlin", &["kt", "kts"]),
    ("c", &["c"]),
    ("cpp", &["cpp", "cc", "cxx", "h", "hpp"]),
    ("csharp", &["cs"]),
    ("ruby", &["rb"]),
    ("php", &["php"]),
    ("swift", &["swift"]),
    ("scala", &["scala"]),
    ("bash", &["sh", "bash"]),
    ("sql", &["sql"]),
    ("html", &["html", "htm"]),
    ("css", &["css"]),
    ("markdown", &["md"]),
    ("json", &["json"]),
    ("yaml", &["yaml", "yml"]),
    ("toml", &["toml"]),
    ("text", &["txt"]),
];

/// Language of a source file, judged by its extension.
///
/// Used to tag code sent for review; `None` for anything unrecognised.
pub fn detect_language(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();

    LANGUAGES
        .iter()
        .find(|(_, exts)| exts.contains(&ext.as_str()))
        .map(|(language, _)| *language)
}
