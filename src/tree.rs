//! Internal module that walks a directory and renders it as a text tree.
//!
//! Every entry is formatted into a line as soon as it is visited; the walk never
//! builds an in-memory tree. Per-entry failures are rendered inline as
//! placeholders so that one unreadable entry never stops the rest of the walk.

use crate::encoding::{self, DecodeOutcome};
use crate::options::DirdocOptions;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";
const BASE_INDENT: &str = "  ";
const CONTENT_MARKER: &str = "┆ ";

/// A rendered report: the text plus how many lines it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RenderedTree {
    pub text: String,
    pub lines: usize,
}

/// A directory child, named and located but not yet inspected.
struct Child {
    name: String,
    path: PathBuf,
}

/// A materialized directory listing. Entries the OS failed to enumerate are
/// kept as errors and rendered after the sorted children.
#[derive(Default)]
struct Listing {
    children: Vec<Child>,
    failures: Vec<io::Error>,
}

/// Renders the tree rooted at `options.root`.
///
/// The caller must already have checked that the root is an existing directory.
pub(crate) fn render_tree(options: &DirdocOptions, include_content: bool) -> RenderedTree {
    let mut walker = TreeWalker::new(options, include_content);
    walker.render_root(&options.root);
    RenderedTree {
        text: walker.out,
        lines: walker.lines,
    }
}

struct TreeWalker<'a> {
    options: &'a DirdocOptions,
    include_content: bool,
    out: String,
    lines: usize,
}

impl<'a> TreeWalker<'a> {
    fn new(options: &'a DirdocOptions, include_content: bool) -> Self {
        Self {
            options,
            include_content,
            out: String::with_capacity(1024),
            lines: 0,
        }
    }

    fn push_line(&mut self, prefix: &str, line: &str) {
        self.out.push_str(prefix);
        self.out.push_str(line);
        self.out.push('\n');
        self.lines += 1;
    }

    fn render_root(&mut self, root: &Path) {
        let name = root_name(root);
        #[cfg(feature = "logging")]
        tracing::debug!("Rendering tree for {}", root.display());
        match self.list(root, true) {
            Ok(listing) => {
                self.push_line("", &format!("{} (folder)", name));
                self.render_children(listing, BASE_INDENT);
            }
            Err(e) => self.push_line("", &format!("{} (folder) {}", name, placeholder(&e))),
        }
    }

    fn render_children(&mut self, listing: Listing, prefix: &str) {
        let count = listing.children.len() + listing.failures.len();
        for (i, child) in listing.children.iter().enumerate() {
            self.render_entry(child, prefix, i + 1 == count);
        }
        let offset = listing.children.len();
        for (i, err) in listing.failures.iter().enumerate() {
            let pointer = if offset + i + 1 == count {
                LAST_BRANCH
            } else {
                BRANCH
            };
            self.push_line(&format!("{}{}", prefix, pointer), &placeholder(err));
        }
    }

    fn render_entry(&mut self, child: &Child, prefix: &str, is_last: bool) {
        let pointer = if is_last { LAST_BRANCH } else { BRANCH };
        let child_prefix = format!("{}{}", prefix, if is_last { SPACE } else { PIPE });
        let line_prefix = format!("{}{}", prefix, pointer);
        let name = child.name.as_str();

        let metadata = match fs::metadata(&child.path) {
            Ok(m) => m,
            // a dangling symlink still has an entry of its own
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                if fs::symlink_metadata(&child.path).is_ok() {
                    self.push_line(&line_prefix, &format!("{} (other)", name));
                } else {
                    #[cfg(feature = "logging")]
                    tracing::debug!("Entry vanished during walk: {}", child.path.display());
                    self.push_line(&line_prefix, &format!("{} {}", name, placeholder(&e)));
                }
                return;
            }
            Err(e) => {
                self.push_line(&line_prefix, &format!("{} {}", name, placeholder(&e)));
                return;
            }
        };

        if metadata.is_dir() {
            match self.list(&child.path, false) {
                Ok(listing) => {
                    self.push_line(&line_prefix, &format!("{} (folder)", name));
                    self.render_children(listing, &child_prefix);
                }
                Err(e) => {
                    #[cfg(feature = "logging")]
                    tracing::debug!("Cannot list {}: {}", child.path.display(), e);
                    self.push_line(
                        &line_prefix,
                        &format!("{} (folder) {}", name, placeholder(&e)),
                    );
                }
            }
        } else if metadata.is_file() {
            self.push_line(&line_prefix, &format!("{} (file)", name));
            if self.include_content {
                let content_prefix = format!("{}{}", child_prefix, CONTENT_MARKER);
                self.embed_content(&child.path, name, &content_prefix);
            }
        } else {
            self.push_line(&line_prefix, &format!("{} (other)", name));
        }
    }

    /// Lists and sorts a directory. Reserved report names are dropped at the root.
    fn list(&self, dir: &Path, at_root: bool) -> io::Result<Listing> {
        let mut listing = Listing::default();
        for entry in fs::read_dir(dir)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    #[cfg(feature = "logging")]
                    tracing::debug!("Unreadable entry in {}: {}", dir.display(), e);
                    listing.failures.push(e);
                    continue;
                }
            };
            let child = Child {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.path(),
            };
            if !(at_root && self.options.is_reserved_name(&child.name)) {
                listing.children.push(child);
            }
        }
        sort_children(&mut listing.children);
        Ok(listing)
    }

    fn embed_content(&mut self, path: &Path, name: &str, prefix: &str) {
        if self.options.is_reserved_name(name) {
            self.push_line(
                prefix,
                &format!(
                    "[Content of {} intentionally not processed for this report]",
                    name
                ),
            );
            return;
        }

        let extension = extension_of(name);
        if !self.options.is_text_extension(&extension)
            && !self.options.is_text_extension(&name.to_lowercase())
        {
            self.push_line(
                prefix,
                &format!(
                    "[Non-text file or unrecognized extension ('{}') - Content not displayed]",
                    extension
                ),
            );
            return;
        }

        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.push_line(prefix, &placeholder(&e));
                return;
            }
        };

        match encoding::decode(&bytes, &self.options.encodings) {
            DecodeOutcome::Decoded { text, encoding } => {
                #[cfg(feature = "logging")]
                tracing::debug!("Decoded {} as {}", path.display(), encoding);
                let max_lines = self.options.max_lines;
                self.push_line(
                    prefix,
                    &format!(
                        "--- File Content (text, encoding: {}, up to {} lines) ---",
                        encoding, max_lines
                    ),
                );
                let mut lines = text.lines();
                for line in lines.by_ref().take(max_lines) {
                    self.push_line(prefix, line);
                }
                if self.options.mark_truncation && lines.next().is_some() {
                    self.push_line(prefix, "[...content truncated...]");
                }
                self.push_line(prefix, "--- File Content End ---");
            }
            DecodeOutcome::Failed => {
                #[cfg(feature = "logging")]
                tracing::debug!("No candidate encoding decoded {}", path.display());
                let tried: Vec<&str> = self.options.encodings.iter().map(|e| e.label()).collect();
                self.push_line(
                    prefix,
                    &format!(
                        "[Could not decode file using tried encodings ({}) - Content not displayed]",
                        tried.join(", ")
                    ),
                );
            }
        }
    }
}

/// Case-insensitive by name, exact byte order on ties.
fn sort_children(children: &mut [Child]) {
    children.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
}

fn root_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .or_else(|| canonical_name(root))
        .unwrap_or_else(|| root.display().to_string())
}

fn canonical_name(root: &Path) -> Option<String> {
    fs::canonicalize(root)
        .ok()?
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
}

/// Lowercase extension with its leading dot, or `""` when there is none.
///
/// A leading dot alone (`.gitignore`) does not make an extension.
fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

fn placeholder(err: &io::Error) -> String {
    match err.kind() {
        io::ErrorKind::PermissionDenied => "[Permission Denied]".to_string(),
        io::ErrorKind::NotFound => "[Not Found]".to_string(),
        _ => format!("[I/O error: {}]", err),
    }
}
