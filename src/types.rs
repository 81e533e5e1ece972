use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which of the two reports an output file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArtifactKind {
    /// Folder structure only.
    Structure,
    /// Folder structure with the content of recognized text files inlined.
    StructureWithContent,
}

/// A report written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    pub kind: ArtifactKind,
    /// Full path of the written file.
    pub path: PathBuf,
    /// Number of lines written.
    pub lines: usize,
}

/// The result of a complete dirdoc run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirdocReport {
    /// The directory that was scanned.
    pub root: PathBuf,
    /// Always present; the content report follows when it was requested.
    pub artifacts: Vec<Artifact>,
}

impl DirdocReport {
    pub fn artifact(&self, kind: ArtifactKind) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.kind == kind)
    }
}
