//! Command-line interface for dirdoc.
//!
//! Values missing from the command line are asked for interactively, so the
//! tool can be run with no arguments at all.

use clap::Parser;
use dirdoc::{ArtifactKind, DirdocBuilder, DirdocError, DirdocOptions, dirdoc};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::exit;

const PATH_PROMPT: &str = "Enter path to the folder to analyze: ";
const CONTENT_PROMPT: &str = "Include text file content? (Uses a list of common text extensions and tries multiple encodings. This will create an additional file if 'yes') (yes/no) [no]: ";

/// dirdoc: document a folder structure, optionally with file contents
#[derive(Parser)]
#[command(name = "dirdoc", version, about, long_about = None)]
struct Cli {
    /// Folder to analyze (prompted for when omitted)
    root: Option<PathBuf>,

    /// Also write the report with text file content
    #[arg(short, long, conflicts_with = "no_content")]
    content: bool,

    /// Only write the structure report, without prompting
    #[arg(long)]
    no_content: bool,

    /// Maximum content lines per file
    #[arg(long)]
    max_lines: Option<usize>,

    /// Mark files cut at the line limit
    #[arg(long)]
    mark_truncation: bool,

    /// JSON file overriding the default configuration
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (needs the `logging` feature)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// `yes` or `y` in any case means yes; anything else, including nothing, means no.
fn parse_yes_no(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "yes" | "y")
}

fn prompt(input: &mut impl BufRead, output: &mut impl Write, question: &str) -> io::Result<String> {
    output.write_all(question.as_bytes())?;
    output.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().to_string())
}

#[cfg(feature = "logging")]
fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

#[cfg(not(feature = "logging"))]
fn init_logging(_verbose: u8) {}

impl Cli {
    fn into_options(
        self,
        input: &mut impl BufRead,
        output: &mut impl Write,
    ) -> Result<(DirdocOptions, bool), DirdocError> {
        let base = match &self.config {
            Some(path) => DirdocOptions::from_json_file(path)?,
            None => DirdocOptions::default(),
        };
        let root = match self.root {
            Some(root) => root,
            None => PathBuf::from(
                prompt(input, output, PATH_PROMPT).map_err(|e| DirdocError::io("<stdin>", e))?,
            ),
        };
        let include_content = if self.content {
            true
        } else if self.no_content {
            false
        } else {
            let answer =
                prompt(input, output, CONTENT_PROMPT).map_err(|e| DirdocError::io("<stdin>", e))?;
            parse_yes_no(&answer)
        };

        let mut builder = DirdocBuilder::from_options(base).root(root);
        if let Some(max_lines) = self.max_lines {
            builder = builder.max_lines(max_lines);
        }
        if self.mark_truncation {
            builder = builder.mark_truncation(true);
        }
        Ok((builder.build(), include_content))
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    let (options, include_content) = match cli.into_options(&mut input, &mut stdout) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    };

    println!("\nGenerating documentation for '{}'...", options.root.display());
    match dirdoc(&options, include_content) {
        Ok(report) => {
            for artifact in &report.artifacts {
                let label = match artifact.kind {
                    ArtifactKind::Structure => "structure-only",
                    ArtifactKind::StructureWithContent => "structure-with-text-content",
                };
                println!("Created {} file.", label);
                println!("Successfully saved to: {}", artifact.path.display());
            }
            println!("\nDocumentation generation finished.");
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yes_no_answers() {
        for yes in ["yes", "y", "Y", "YES", " yes\n"] {
            assert!(parse_yes_no(yes), "{:?}", yes);
        }
        for no in ["", "no", "n", "yep", "true"] {
            assert!(!parse_yes_no(no), "{:?}", no);
        }
    }

    #[test]
    fn prompts_fill_missing_values() {
        let cli = Cli::parse_from(["dirdoc"]);
        let mut input = io::Cursor::new("/tmp/project\ny\n");
        let mut output = Vec::new();
        let (options, include_content) = cli.into_options(&mut input, &mut output).unwrap();
        assert_eq!(options.root, PathBuf::from("/tmp/project"));
        assert!(include_content);
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.starts_with(PATH_PROMPT));
        assert!(shown.ends_with(CONTENT_PROMPT));
    }

    #[test]
    fn flags_skip_prompts() {
        let cli = Cli::parse_from(["dirdoc", "/srv/app", "--no-content", "--max-lines", "7"]);
        let mut input = io::Cursor::new("");
        let mut output = Vec::new();
        let (options, include_content) = cli.into_options(&mut input, &mut output).unwrap();
        assert_eq!(options.root, PathBuf::from("/srv/app"));
        assert_eq!(options.max_lines, 7);
        assert!(!include_content);
        assert!(output.is_empty());
    }
}
