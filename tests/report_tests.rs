use project_analyzer::error::AnalyzerError;
use project_analyzer::llm::{GeneratedSection, SectionKind};
use project_analyzer::report::{AnalysisReport, ListedFile, ReportWriter, SkippedNote};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn sample_sections() -> Vec<GeneratedSection> {
    SectionKind::ALL
        .iter()
        .map(|kind| GeneratedSection {
            kind: *kind,
            body: format!("Generated text for {}.", kind.title()),
        })
        .collect()
}

fn sample_report() -> AnalysisReport {
    AnalysisReport::new(
        "demo-project".to_string(),
        vec![
            ListedFile {
                path: PathBuf::from("src/main.rs"),
                size: 120,
            },
            ListedFile {
                path: PathBuf::from("src/lib.rs"),
                size: 64,
            },
        ],
        vec![],
        sample_sections(),
    )
}

#[test]
fn written_report_contains_all_five_section_headers() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let report = sample_report();

    let writer = ReportWriter::new(temp_dir.path().to_path_buf());
    let path = writer.write(&report).expect("Failed to write report");

    assert!(path.exists());
    let content = fs::read_to_string(&path).expect("Failed to read report back");

    assert!(content.contains("# Project Analysis: demo-project"));
    assert!(content.contains("## File Listing"));
    assert!(content.contains("## Function Analysis"));
    assert!(content.contains("## Dependency Relationships"));
    assert!(content.contains("## Structure Patterns"));
    assert!(content.contains("## Interpretation"));
    assert!(content.contains("`src/main.rs` (120 bytes)"));
}

#[test]
fn report_filename_embeds_the_generation_timestamp() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let report = sample_report();

    let writer = ReportWriter::new(temp_dir.path().to_path_buf());
    let path = writer.write(&report).expect("Failed to write report");

    let expected = format!(
        "project_analysis_{}.md",
        report.generated_at.format("%Y%m%d_%H%M%S")
    );
    assert_eq!(
        path.file_name().and_then(|n| n.to_str()),
        Some(expected.as_str())
    );
}

#[test]
fn back_to_back_writes_produce_distinct_files() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let report = sample_report();

    let writer = ReportWriter::new(temp_dir.path().to_path_buf());
    let first = writer.write(&report).expect("Failed to write first report");
    let second = writer.write(&report).expect("Failed to write second report");

    assert_ne!(first, second);
    assert!(first.exists());
    assert!(second.exists());
}

#[test]
fn skipped_files_appear_in_the_file_listing() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let report = AnalysisReport::new(
        "demo-project".to_string(),
        vec![],
        vec![SkippedNote {
            path: PathBuf::from("secret.rs"),
            reason: "could not read secret.rs: permission denied".to_string(),
        }],
        sample_sections(),
    );

    let writer = ReportWriter::new(temp_dir.path().to_path_buf());
    let path = writer.write(&report).expect("Failed to write report");
    let content = fs::read_to_string(&path).expect("Failed to read report back");

    assert!(content.contains("Skipped files:"));
    assert!(content.contains("`secret.rs`"));
    assert!(content.contains("No analyzable files were found."));
}

#[test]
fn unwritable_destination_fails_with_write_failed() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let blocking_file = temp_dir.path().join("not-a-directory");
    fs::write(&blocking_file, "occupied").expect("Failed to create blocking file");

    let writer = ReportWriter::new(blocking_file.clone());
    let result = writer.write(&sample_report());

    assert!(matches!(result, Err(AnalyzerError::WriteFailed { .. })));
}
