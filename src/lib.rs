pub mod analyzer;
pub mod collector;
pub mod config;
pub mod error;
pub mod llm;
pub mod report;

pub use analyzer::Analyzer;
pub use collector::FileCollector;
pub use config::Config;
pub use error::AnalyzerError;
pub use llm::LLMClient;
pub use report::ReportWriter;

pub type Result<T> = std::result::Result<T, AnalyzerError>;
