//! # Dirdoc
//!
//! `dirdoc` walks a directory tree and renders it as text, similar to the
//! `tree` command, optionally inlining the content of recognized text files.
//! The result is meant for project documentation or for giving a language
//! model the context of a whole project in one file.
//!
//! Two reports are written into the scanned directory: `folder_structure.txt`
//! always, and `folder_structure_with_content.txt` when content is requested.
//! Both are excluded from their own listing so repeated runs stay identical.
//!
//! # Features
//!
//! - `logging`: Enables debug logging via the `tracing` crate.
//!
//! # Example
//!
//! ```no_run
//! use dirdoc::{DirdocBuilder, dirdoc};
//!
//! let options = DirdocBuilder::new("./my-project")
//!     .max_lines(200)
//!     .build();
//!
//! let report = dirdoc(&options, true).expect("Failed to document directory");
//! for artifact in &report.artifacts {
//!     println!("Wrote {} ({} lines)", artifact.path.display(), artifact.lines);
//! }
//! ```

mod encoding;
mod engine;
mod error;
mod options;
mod tree;
mod types;

pub use encoding::{DecodeOutcome, TextEncoding, decode};
pub use engine::{dirdoc, render_structure, validate_root};
pub use error::DirdocError;
pub use options::{
    CONTENT_FILENAME, DEFAULT_MAX_LINES, DEFAULT_TEXT_EXTENSIONS, DirdocBuilder, DirdocOptions,
    STRUCTURE_FILENAME,
};
pub use types::{Artifact, ArtifactKind, DirdocReport};
