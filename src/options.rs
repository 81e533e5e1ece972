use crate::encoding::TextEncoding;
use crate::error::DirdocError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const STRUCTURE_FILENAME: &str = "folder_structure.txt";
pub const CONTENT_FILENAME: &str = "folder_structure_with_content.txt";
pub const DEFAULT_MAX_LINES: usize = 1_000_000_000;

/// Extensions (lowercase, with leading dot) treated as text. Bare names such as
/// `makefile` are matched against the whole lowercase file name, and `""`
/// stands for files without an extension.
pub const DEFAULT_TEXT_EXTENSIONS: &[&str] = &[
    // plain text and markup
    ".txt", ".md", ".markdown", ".rst", ".tex", ".rtf", ".text", ".log",
    // programming languages
    ".py", ".pyw", ".java", ".c", ".cpp", ".h", ".hpp", ".cs", ".js", ".mjs", ".cjs", ".ts",
    ".tsx", ".php", ".pl", ".pm", ".rb", ".swift", ".go", ".rs", ".lua", ".scala", ".kt", ".kts",
    ".dart", ".sh", ".bash", ".zsh", ".fish", ".ps1", ".bat", ".cmd", ".groovy", ".gvy", ".gy",
    ".gsh", ".r", ".jl", ".pas", ".f", ".f90", ".f95", ".for", ".asm", ".s", ".vb", ".vbs",
    ".clj", ".cljs", ".cljc", ".edn", ".erl", ".hrl", ".ex", ".exs", ".hs", ".lhs", ".lisp",
    ".lsp", ".scm", ".ml", ".mli", ".pde", ".sol", ".tcl", ".vala",
    // web
    ".html", ".htm", ".xhtml", ".css", ".scss", ".less", ".sass", ".json", ".xml", ".svg",
    ".yaml", ".yml", ".toml", ".ini", ".cfg", ".conf", ".properties", ".asp", ".aspx", ".jsp",
    ".ejs", ".hbs", ".mustache", ".pug", ".jade", ".htaccess", ".htpasswd",
    // data
    ".csv", ".tsv", ".jsonl", ".ndjson", ".sql", ".graphql", ".gql",
    // config and build
    ".dockerfile", "dockerfile", ".env", ".gitattributes", ".gitignore", ".gitmodules",
    ".editorconfig", "makefile", "makefile.in", "cmakelists.txt", "meson.build", ".pom",
    ".gradle", ".sbt", ".project", ".classpath", ".build", ".csproj", ".vbproj", ".sln", ".suo",
    ".yaml-tml",
    // docs and notes
    ".org", ".wiki", ".textile", ".adoc", ".asciidoc",
    // subtitles
    ".srt", ".sub", ".vtt",
    // misc
    ".patch", ".diff", ".desktop", ".service", ".rules", ".reg", ".plantuml", ".puml", ".pu",
    ".dot", ".gv", ".ipynb", ".pro", ".pri",
    "",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirdocOptions {
    pub root: PathBuf,
    pub text_extensions: BTreeSet<String>,
    pub encodings: Vec<TextEncoding>,
    pub max_lines: usize,
    pub structure_filename: String,
    pub content_filename: String,
    /// Append `[...content truncated...]` after a file cut at `max_lines`.
    pub mark_truncation: bool,
}
impl Default for DirdocOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            text_extensions: DEFAULT_TEXT_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            encodings: TextEncoding::DEFAULT_ORDER.to_vec(),
            max_lines: DEFAULT_MAX_LINES,
            structure_filename: STRUCTURE_FILENAME.to_string(),
            content_filename: CONTENT_FILENAME.to_string(),
            mark_truncation: false,
        }
    }
}
impl DirdocOptions {
    /// Loads options from a JSON file; absent fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DirdocError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| DirdocError::io(path, e))?;
        serde_json::from_str(&raw)
            .map_err(|e| DirdocError::Config(format!("{}: {}", path.display(), e)))
    }
    pub fn is_reserved_name(&self, name: &str) -> bool {
        name == self.structure_filename || name == self.content_filename
    }
    pub fn is_text_extension(&self, extension: &str) -> bool {
        self.text_extensions.contains(extension)
    }
}
#[derive(Debug, Default)]
pub struct DirdocBuilder {
    options: DirdocOptions,
}
impl DirdocBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            options: DirdocOptions {
                root: root.into(),
                ..Default::default()
            },
        }
    }
    /// Starts from existing options, e.g. ones loaded from a config file.
    pub fn from_options(options: DirdocOptions) -> Self {
        Self { options }
    }
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.options.root = root.into();
        self
    }
    pub fn text_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.text_extensions = extensions
            .into_iter()
            .map(|ext| ext.into().to_lowercase())
            .collect();
        self
    }
    pub fn add_text_extension(mut self, extension: impl Into<String>) -> Self {
        self.options
            .text_extensions
            .insert(extension.into().to_lowercase());
        self
    }
    pub fn encodings(mut self, encodings: Vec<TextEncoding>) -> Self {
        self.options.encodings = encodings;
        self
    }
    pub fn max_lines(mut self, max_lines: usize) -> Self {
        self.options.max_lines = max_lines;
        self
    }
    pub fn structure_filename(mut self, name: impl Into<String>) -> Self {
        self.options.structure_filename = name.into();
        self
    }
    pub fn content_filename(mut self, name: impl Into<String>) -> Self {
        self.options.content_filename = name.into();
        self
    }
    pub fn mark_truncation(mut self, yes: bool) -> Self {
        self.options.mark_truncation = yes;
        self
    }
    pub fn build(self) -> DirdocOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_common_files() {
        let options = DirdocOptions::default();
        for ext in [".py", ".md", ".rs", ".txt", "", "makefile"] {
            assert!(options.is_text_extension(ext), "missing {:?}", ext);
        }
        assert!(!options.is_text_extension(".bin"));
        assert_eq!(options.max_lines, DEFAULT_MAX_LINES);
        assert_eq!(options.encodings, TextEncoding::DEFAULT_ORDER.to_vec());
    }

    #[test]
    fn builder_lowercases_extensions() {
        let options = DirdocBuilder::new("/tmp")
            .text_extensions([".RS", ".Md"])
            .add_text_extension(".TOML")
            .build();
        let expected: BTreeSet<String> = [".md", ".rs", ".toml"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(options.text_extensions, expected);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dirdoc.json");
        fs::write(&path, r#"{"max_lines": 3, "encodings": ["utf-8", "latin1"]}"#).unwrap();
        let options = DirdocOptions::from_json_file(&path).unwrap();
        assert_eq!(options.max_lines, 3);
        assert_eq!(
            options.encodings,
            vec![TextEncoding::Utf8, TextEncoding::Latin1]
        );
        assert_eq!(options.structure_filename, STRUCTURE_FILENAME);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dirdoc.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            DirdocOptions::from_json_file(&path),
            Err(DirdocError::Config(_))
        ));
    }
}
