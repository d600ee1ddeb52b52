use crate::collector::FileCollector;
use crate::config::Config;
use crate::error::AnalyzerError;
use crate::llm::{AnalysisRequest, LLMClient};
use crate::report::{AnalysisReport, ReportWriter};
use std::path::PathBuf;

/// Runs the linear pipeline: collect files, request the generated sections,
/// write the report. Any step failing aborts the remaining steps.
pub struct Analyzer {
    config: Config,
}

impl Analyzer {
    /// Fails with `MissingCredential` before any client is built or any
    /// network call is attempted.
    pub fn new(config: Config) -> crate::Result<Self> {
        if config
            .llm
            .api_key
            .as_deref()
            .map_or(true, |key| key.trim().is_empty())
        {
            return Err(AnalyzerError::MissingCredential);
        }

        Ok(Self { config })
    }

    pub async fn run(&self) -> crate::Result<RunSummary> {
        println!("🔍 Collecting files from {}...", self.config.target_directory.display());
        let collector = FileCollector::new(self.config.clone());
        let outcome = collector.collect()?;
        outcome.stats().print_summary();

        let files_collected = outcome.entries.len();
        let files_skipped = outcome.skipped.len();
        let project_name = self.project_name();
        let (file_listing, skipped) = AnalysisReport::listing_from(&outcome);

        println!("\n🤖 Requesting analysis from {}...", self.config.llm.model);
        let client = LLMClient::new(self.config.llm.clone());
        let request = AnalysisRequest {
            project_name: project_name.clone(),
            entries: outcome.entries,
        };
        let sections = client.request_report(&request).await?;

        println!("\n📝 Writing report...");
        let report = AnalysisReport::new(project_name, file_listing, skipped, sections);
        let writer = ReportWriter::new(self.config.output_directory.clone());
        let report_path = writer.write(&report)?;

        Ok(RunSummary {
            report_path,
            files_collected,
            files_skipped,
            sections: report.sections.len(),
        })
    }

    fn project_name(&self) -> String {
        self.config
            .target_directory
            .canonicalize()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "project".to_string())
    }
}

#[derive(Debug)]
pub struct RunSummary {
    pub report_path: PathBuf,
    pub files_collected: usize,
    pub files_skipped: usize,
    pub sections: usize,
}

impl RunSummary {
    pub fn print_summary(&self) {
        println!("\n📊 Run Summary");
        println!("==============");
        println!("  Files analyzed: {}", self.files_collected);
        if self.files_skipped > 0 {
            println!("  Files skipped: {}", self.files_skipped);
        }
        println!("  Report sections: {}", self.sections);
        println!("  Report: {}", self.report_path.display());
    }
}
