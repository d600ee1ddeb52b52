use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf};

use crate::error::AnalyzerError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub target_directory: PathBuf,
    pub output_directory: PathBuf,
    pub ignore_patterns: Vec<String>,
    pub file_extensions: Vec<String>,
    pub max_file_size: usize,
    pub llm: LLMConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_tokens: usize,
    pub temperature: f32,
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub retry_delay_seconds: u64,
    pub max_file_chars: usize,
    pub max_prompt_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_directory: PathBuf::from("."),
            output_directory: PathBuf::from("."),
            ignore_patterns: vec![
                "node_modules".to_string(),
                ".git".to_string(),
                "target".to_string(),
                "build".to_string(),
                "dist".to_string(),
                "venv".to_string(),
                "__pycache__".to_string(),
                ".idea".to_string(),
                ".vscode".to_string(),
                "vendor".to_string(),
                "*.log".to_string(),
                ".env".to_string(),
                ".env.*".to_string(),
                "*.min.js".to_string(),
                "*.map".to_string(),
            ],
            file_extensions: vec![
                "rs".to_string(),
                "py".to_string(),
                "js".to_string(),
                "jsx".to_string(),
                "ts".to_string(),
                "tsx".to_string(),
                "vue".to_string(),
                "java".to_string(),
                "go".to_string(),
                "rb".to_string(),
                "php".to_string(),
                "cs".to_string(),
                "cpp".to_string(),
                "c".to_string(),
                "h".to_string(),
                "hpp".to_string(),
                "sh".to_string(),
                "bash".to_string(),
                "sql".to_string(),
                "html".to_string(),
                "css".to_string(),
                "scss".to_string(),
                "less".to_string(),
                "md".to_string(),
                "json".to_string(),
                "yaml".to_string(),
                "yml".to_string(),
                "xml".to_string(),
                "toml".to_string(),
            ],
            max_file_size: 1024 * 1024, // 1MB
            llm: LLMConfig {
                api_key: None,
                base_url: "https://openrouter.ai/api/v1".to_string(),
                model: "anthropic/claude-3.5-sonnet".to_string(),
                max_tokens: 4000,
                temperature: 0.1,
                timeout_seconds: 300,
                max_retries: 5,
                retry_delay_seconds: 5,
                max_file_chars: 8000,
                max_prompt_chars: 48000,
            },
        }
    }
}

impl Config {
    /// Get the default config file path (~/.project-analyzer.toml)
    pub fn default_config_path() -> Option<PathBuf> {
        let home_dir = env::var("HOME").or_else(|_| env::var("USERPROFILE")).ok()?;
        Some(PathBuf::from(home_dir).join(".project-analyzer.toml"))
    }

    /// Load config from the default location, falling back to defaults if no file exists
    pub fn load() -> crate::Result<Self> {
        let Some(config_path) = Self::default_config_path() else {
            return Ok(Self::default());
        };

        if config_path.exists() {
            println!("📝 Loading configuration from: {}", config_path.display());
            Self::from_file(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific file path
    pub fn from_file(path: &PathBuf) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AnalyzerError::ConfigLoad {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        let config: Config = toml::from_str(&content).map_err(|e| AnalyzerError::ConfigLoad {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        Ok(config)
    }

    /// Save config to a file
    pub fn to_file(&self, path: &PathBuf) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AnalyzerError::WriteFailed {
                path: path.clone(),
                source: e,
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| AnalyzerError::ConfigLoad {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| AnalyzerError::WriteFailed {
            path: path.clone(),
            source: e,
        })?;
        Ok(())
    }

    /// Fill in the API key from `OPENROUTER_API_KEY` when the config file did
    /// not provide one. Called once at the process boundary.
    pub fn resolve_env_credential(&mut self) {
        if self.llm.api_key.is_none() {
            self.llm.api_key = env::var("OPENROUTER_API_KEY").ok();
        }
    }

    /// Create a config file with all available options documented
    pub fn create_documented_config() -> String {
        r#"# Project Analyzer Configuration File
# This file configures how project-analyzer collects and analyzes your codebase

# Target directory to analyze (defaults to current directory)
target_directory = "."

# Directory the markdown report is written to
output_directory = "."

# Patterns to ignore during file collection
ignore_patterns = [
    "node_modules",
    ".git",
    "target",
    "build",
    "dist",
    "venv",
    "__pycache__",
    ".idea",
    ".vscode",
    "vendor",
    "*.log",
    ".env",
    ".env.*",
    "*.min.js",
    "*.map"
]

# File extensions to include in the analysis
file_extensions = [
    "rs", "py", "js", "jsx", "ts", "tsx", "vue", "java", "go",
    "rb", "php", "cs", "cpp", "c", "h", "hpp", "sh", "bash",
    "sql", "html", "css", "scss", "less", "md", "json", "yaml",
    "yml", "xml", "toml"
]

# Maximum file size to collect (in bytes, default 1MB)
max_file_size = 1048576

[llm]
# API key for OpenRouter (or set the OPENROUTER_API_KEY environment variable)
# api_key = "your-api-key-here"

# Base URL of the chat-completions API
base_url = "https://openrouter.ai/api/v1"

# Model to use
model = "anthropic/claude-3.5-sonnet"

# Maximum tokens for model responses
max_tokens = 4000

# Temperature for model responses (0.0 = deterministic, 1.0 = creative)
temperature = 0.1

# Request timeout in seconds (default: 300 seconds / 5 minutes)
timeout_seconds = 300

# Maximum attempts per request (rate limits and transient failures are retried)
max_retries = 5

# Base delay between retries in seconds; grows linearly with each attempt
retry_delay_seconds = 5

# Per-file character cap; longer files keep their head and tail
max_file_chars = 8000

# Character budget per request; larger projects are split across requests
max_prompt_chars = 48000
"#
        .to_string()
    }
}
