use dirdoc::{DirdocBuilder, TextEncoding, render_structure};
use std::fs;
use tempfile::tempdir;

fn content_lines(report: &str, marker_prefix: &str) -> Vec<String> {
    report
        .lines()
        .filter_map(|line| line.strip_prefix(marker_prefix))
        .filter(|line| !line.starts_with("--- File Content"))
        .map(str::to_string)
        .collect()
}

#[test]
fn test_unrecognized_extension_is_not_read() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("secret.bin"), "looks like text\n").unwrap();
    let options = DirdocBuilder::new(dir.path()).build();
    let report = render_structure(&options, true).unwrap();
    assert!(report.contains("└── secret.bin (file)\n"));
    assert!(report.contains(
        "      ┆ [Non-text file or unrecognized extension ('.bin') - Content not displayed]\n"
    ));
    assert!(!report.contains("looks like text"));
    assert!(!report.contains("--- File Content"));
}

#[test]
fn test_empty_file_has_header_and_footer_only() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("empty.txt"), "").unwrap();
    let options = DirdocBuilder::new(dir.path()).build();
    let report = render_structure(&options, true).unwrap();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[2],
        "      ┆ --- File Content (text, encoding: utf-8, up to 1000000000 lines) ---"
    );
    assert_eq!(lines[3], "      ┆ --- File Content End ---");
}

#[test]
fn test_embedded_content_matches_file_prefix() {
    let dir = tempdir().unwrap();
    let original = "first\r\n  indented  \r\n\r\nlast";
    fs::write(dir.path().join("notes.txt"), original).unwrap();
    for cap in [0, 2, 4, 10] {
        let options = DirdocBuilder::new(dir.path()).max_lines(cap).build();
        let report = render_structure(&options, true).unwrap();
        let expected: Vec<String> = original
            .lines()
            .take(cap)
            .map(str::to_string)
            .collect();
        assert_eq!(content_lines(&report, "      ┆ "), expected, "cap {}", cap);
    }
}

#[test]
fn test_legacy_encoding_fallback() {
    let dir = tempdir().unwrap();
    // "Привет" in windows-1251
    fs::write(dir.path().join("ru.txt"), [0xCF, 0xF0, 0xE8, 0xE2, 0xE5, 0xF2]).unwrap();
    let options = DirdocBuilder::new(dir.path()).build();
    let report = render_structure(&options, true).unwrap();
    assert!(report.contains("encoding: cp1251"));
    assert!(report.contains("┆ Привет\n"));

    let options = DirdocBuilder::new(dir.path())
        .encodings(vec![TextEncoding::Utf8, TextEncoding::Latin1])
        .build();
    let report = render_structure(&options, true).unwrap();
    assert!(report.contains("encoding: latin-1"));
}

#[test]
fn test_extensionless_and_dotfiles() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("LICENSE"), "MIT\n").unwrap();
    fs::write(dir.path().join(".gitignore"), "target/\n").unwrap();
    let options = DirdocBuilder::new(dir.path()).build();
    let report = render_structure(&options, true).unwrap();
    assert!(report.contains("┆ MIT\n"));
    assert!(report.contains("┆ target/\n"));
}
