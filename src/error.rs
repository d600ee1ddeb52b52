use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the analysis pipeline.
///
/// `PermissionDenied` is recorded per file during collection and never aborts
/// a run on its own; every other variant is fatal at the point it occurs.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("no API key configured; set OPENROUTER_API_KEY or add api_key to the config file")]
    MissingCredential,

    #[error("target directory {0} does not exist or is not a directory")]
    DirectoryNotFound(PathBuf),

    #[error("could not read {path}: {source}")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("request to the model provider failed after {attempts} attempt(s): {reason}")]
    RequestFailed { attempts: u32, reason: String },

    #[error("the model provider rejected the API credential: {reason}")]
    Unauthorized { reason: String },

    #[error("could not write report to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not load configuration from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },
}

impl AnalyzerError {
    pub fn request_failed(attempts: u32, reason: impl Into<String>) -> Self {
        Self::RequestFailed {
            attempts,
            reason: reason.into(),
        }
    }
}
