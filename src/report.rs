use crate::collector::CollectionOutcome;
use crate::error::AnalyzerError;
use crate::llm::GeneratedSection;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListedFile {
    pub path: PathBuf,
    pub size: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedNote {
    pub path: PathBuf,
    pub reason: String,
}

/// The markdown document produced by one run: a locally built file listing
/// followed by the model-generated sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Local>,
    pub project_name: String,
    pub file_listing: Vec<ListedFile>,
    pub skipped: Vec<SkippedNote>,
    pub sections: Vec<GeneratedSection>,
}

impl AnalysisReport {
    pub fn new(
        project_name: String,
        file_listing: Vec<ListedFile>,
        skipped: Vec<SkippedNote>,
        sections: Vec<GeneratedSection>,
    ) -> Self {
        Self {
            generated_at: Local::now(),
            project_name,
            file_listing,
            skipped,
            sections,
        }
    }

    /// Snapshot the listing out of a collection outcome before the entries are
    /// handed off to the requester.
    pub fn listing_from(outcome: &CollectionOutcome) -> (Vec<ListedFile>, Vec<SkippedNote>) {
        let file_listing = outcome
            .entries
            .iter()
            .map(|e| ListedFile {
                path: e.path.clone(),
                size: e.size,
            })
            .collect();
        let skipped = outcome
            .skipped
            .iter()
            .map(|s| SkippedNote {
                path: s.path.clone(),
                reason: s.reason.to_string(),
            })
            .collect();
        (file_listing, skipped)
    }

    pub fn render_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!("# Project Analysis: {}\n\n", self.project_name));
        md.push_str(&format!(
            "Generated: {}\n\n",
            self.generated_at.format("%Y-%m-%d %H:%M:%S")
        ));
        md.push_str(&format!(
            "Files analyzed: {} ({} skipped)\n\n",
            self.file_listing.len(),
            self.skipped.len()
        ));

        md.push_str("## File Listing\n\n");
        if self.file_listing.is_empty() {
            md.push_str("No analyzable files were found.\n");
        }
        for file in &self.file_listing {
            md.push_str(&format!(
                "- `{}` ({} bytes)\n",
                file.path.display(),
                file.size
            ));
        }
        if !self.skipped.is_empty() {
            md.push_str("\nSkipped files:\n\n");
            for skipped in &self.skipped {
                md.push_str(&format!(
                    "- `{}` — {}\n",
                    skipped.path.display(),
                    skipped.reason
                ));
            }
        }
        md.push('\n');

        for section in &self.sections {
            md.push_str(&format!("## {}\n\n", section.kind.title()));
            md.push_str(section.body.trim_end());
            md.push_str("\n\n");
        }

        md
    }
}

pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    /// Write the report to `project_analysis_<TIMESTAMP>.md` in the output
    /// directory. A filename that already exists gets a numeric suffix, so two
    /// runs within the same second still produce distinct files.
    pub fn write(&self, report: &AnalysisReport) -> crate::Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).map_err(|e| AnalyzerError::WriteFailed {
            path: self.output_dir.clone(),
            source: e,
        })?;

        let timestamp = report.generated_at.format("%Y%m%d_%H%M%S");
        let mut path = self.output_dir.join(format!("project_analysis_{timestamp}.md"));
        let mut counter = 2;
        while path.exists() {
            path = self
                .output_dir
                .join(format!("project_analysis_{timestamp}_{counter}.md"));
            counter += 1;
        }

        fs::write(&path, report.render_markdown()).map_err(|e| AnalyzerError::WriteFailed {
            path: path.clone(),
            source: e,
        })?;

        Ok(path)
    }
}
