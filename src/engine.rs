use crate::error::DirdocError;
use crate::options::DirdocOptions;
use crate::tree::render_tree;
use crate::types::{Artifact, ArtifactKind, DirdocReport};
use std::fs;
use std::path::Path;

/// Checks that `root` exists and is a directory.
pub fn validate_root(root: &Path) -> Result<(), DirdocError> {
    let metadata = match fs::metadata(root) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(DirdocError::invalid_root(root, "does not exist"));
        }
        Err(e) => return Err(DirdocError::io(root, e)),
    };
    if !metadata.is_dir() {
        return Err(DirdocError::invalid_root(root, "is not a directory"));
    }
    Ok(())
}

/// Renders the report text for `options.root` without writing anything.
pub fn render_structure(
    options: &DirdocOptions,
    include_content: bool,
) -> Result<String, DirdocError> {
    validate_root(&options.root)?;
    Ok(render_tree(options, include_content).text)
}

/// Writes the structure report, and the content report when `include_content`
/// is set, into the scanned directory. Earlier reports are overwritten.
pub fn dirdoc(options: &DirdocOptions, include_content: bool) -> Result<DirdocReport, DirdocError> {
    #[cfg(feature = "logging")]
    tracing::debug!(
        "Starting dirdoc with root: {} (content: {})",
        options.root.display(),
        include_content
    );
    validate_root(&options.root)?;
    let mut artifacts = vec![write_artifact(options, ArtifactKind::Structure)?];
    if include_content {
        artifacts.push(write_artifact(options, ArtifactKind::StructureWithContent)?);
    }
    Ok(DirdocReport {
        root: options.root.clone(),
        artifacts,
    })
}

fn write_artifact(options: &DirdocOptions, kind: ArtifactKind) -> Result<Artifact, DirdocError> {
    let (filename, include_content) = match kind {
        ArtifactKind::Structure => (&options.structure_filename, false),
        ArtifactKind::StructureWithContent => (&options.content_filename, true),
    };
    let path = options.root.join(filename);
    let rendered = render_tree(options, include_content);
    fs::write(&path, rendered.text).map_err(|e| DirdocError::io(&path, e))?;
    #[cfg(feature = "logging")]
    tracing::debug!("Wrote {} lines to {}", rendered.lines, path.display());
    Ok(Artifact {
        kind,
        path,
        lines: rendered.lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::DirdocBuilder;
    use tempfile::tempdir;

    #[test]
    fn missing_root_is_invalid() {
        let dir = tempdir().unwrap();
        let options = DirdocBuilder::new(dir.path().join("nope")).build();
        let err = dirdoc(&options, true).unwrap_err();
        assert!(matches!(err, DirdocError::InvalidRoot { .. }));
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn file_root_is_invalid_and_writes_nothing() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, "x").unwrap();
        let options = DirdocBuilder::new(&file).build();
        let err = render_structure(&options, false).unwrap_err();
        assert!(err.to_string().contains("is not a directory"));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn content_report_only_on_request() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.md"), "# a\n").unwrap();
        let options = DirdocBuilder::new(dir.path()).build();

        let report = dirdoc(&options, false).unwrap();
        assert_eq!(report.artifacts.len(), 1);
        assert!(report.artifact(ArtifactKind::StructureWithContent).is_none());
        assert!(!dir.path().join(&options.content_filename).exists());

        let report = dirdoc(&options, true).unwrap();
        let content = report.artifact(ArtifactKind::StructureWithContent).unwrap();
        assert_eq!(content.lines, 5);
        let text = fs::read_to_string(&content.path).unwrap();
        assert!(text.contains("      ┆ # a\n"));
    }
}
