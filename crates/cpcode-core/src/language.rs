//! File extension to code fence language tag mapping.

use std::path::Path;

/// Known extensions and the fence tag rendered for them.
const LANGUAGE_TABLE: &[(&str, &str)] = &[
    ("sol", "solidity"),
    ("py", "python"),
    ("js", "javascript"),
    ("ts", "typescript"),
    ("tsx", "typescript"),
    ("jsx", "javascript"),
    ("go", "go"),
    ("rs", "rust"),
    ("md", "markdown"),
    ("json", "json"),
    ("yaml", "yaml"),
    ("yml", "yaml"),
    ("toml", "toml"),
    ("sh", "bash"),
    ("bash", "bash"),
    ("zsh", "bash"),
    ("css", "css"),
    ("scss", "scss"),
    ("html", "html"),
    ("vue", "vue"),
    ("java", "java"),
    ("c", "c"),
    ("cpp", "cpp"),
    ("h", "c"),
    ("hpp", "cpp"),
];

/// Return the fence language tag for a filename.
///
/// Unknown extensions are returned lowercased as-is; a file without an
/// extension yields an empty tag.
pub fn classify(filename: &str) -> String {
    let ext = Path::new(filename)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    LANGUAGE_TABLE
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, tag)| (*tag).to_string())
        .unwrap_or(ext)
}
