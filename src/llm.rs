use crate::collector::FileEntry;
use crate::config::LLMConfig;
use crate::error::AnalyzerError;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const TRUNCATION_MARKER: &str = "\n...(content truncated)...\n";

/// The generated sections of the report, requested in this order. The file
/// listing is built locally by the report writer and is not model-generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionKind {
    FunctionAnalysis,
    DependencyRelationships,
    StructurePatterns,
    Interpretation,
}

impl SectionKind {
    pub const ALL: [SectionKind; 4] = [
        SectionKind::FunctionAnalysis,
        SectionKind::DependencyRelationships,
        SectionKind::StructurePatterns,
        SectionKind::Interpretation,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            SectionKind::FunctionAnalysis => "Function Analysis",
            SectionKind::DependencyRelationships => "Dependency Relationships",
            SectionKind::StructurePatterns => "Structure Patterns",
            SectionKind::Interpretation => "Interpretation",
        }
    }

    fn system_prompt(&self) -> &'static str {
        match self {
            SectionKind::FunctionAnalysis => {
                "You are a senior software engineer documenting a codebase. \
                 Describe the significant functions in the provided files: what each one does, \
                 its inputs and outputs, and any notable implementation details or error handling. \
                 Group your description by file and respond in plain markdown prose."
            }
            SectionKind::DependencyRelationships => {
                "You are a dependency analysis expert. Describe how the provided files and \
                 modules depend on each other, which external libraries the project relies on, \
                 and any notable coupling between components. Respond in plain markdown prose."
            }
            SectionKind::StructurePatterns => {
                "You are a software architect. Identify the structural and architectural \
                 patterns visible in the provided files, such as layering, module organization, \
                 and recurring design conventions. Respond in plain markdown prose."
            }
            SectionKind::Interpretation => {
                "You are a senior software architect reviewing a codebase. Provide an overall \
                 interpretation of what this project does, how its parts work together, and \
                 what stands out about its design. Respond in plain markdown prose."
            }
        }
    }
}

/// Everything the requester needs for one run. Owns the collected entries;
/// they are dropped with the request once the sections come back.
#[derive(Debug)]
pub struct AnalysisRequest {
    pub project_name: String,
    pub entries: Vec<FileEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedSection {
    pub kind: SectionKind,
    pub body: String,
}

/// Outcome of classifying one HTTP response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Ok,
    Unauthorized,
    Retryable,
    Fatal,
}

/// 401/403 reject the credential outright; 429 and server errors are worth
/// retrying; everything else non-success fails the run immediately.
pub fn classify_status(status: StatusCode) -> StatusClass {
    if status.is_success() {
        StatusClass::Ok
    } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        StatusClass::Unauthorized
    } else if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
        StatusClass::Retryable
    } else {
        StatusClass::Fatal
    }
}

/// Extract the generated text from a chat-completions response body.
pub fn extract_content(response: &serde_json::Value) -> Option<&str> {
    response["choices"][0]["message"]["content"].as_str()
}

/// Truncate to at most `max_chars` characters, keeping the head and tail
/// halves around an elision marker.
pub fn truncate_content(content: &str, max_chars: usize) -> String {
    if content.chars().count() <= max_chars {
        return content.to_string();
    }

    let half = max_chars / 2;
    let head: String = content.chars().take(half).collect();
    let tail_start = content.chars().count() - half;
    let tail: String = content.chars().skip(tail_start).collect();

    format!("{head}{TRUNCATION_MARKER}{tail}")
}

fn render_entry(entry: &FileEntry, max_file_chars: usize) -> String {
    format!(
        "### File: {}\n```\n{}\n```\n",
        entry.path.display(),
        truncate_content(&entry.content, max_file_chars)
    )
}

/// Render entries as fenced blocks and greedily pack them into chunks of at
/// most `max_prompt_chars` characters, preserving entry order. A single
/// rendered block always lands in some chunk even if it alone exceeds the
/// budget (per-file truncation keeps that case rare).
pub fn chunk_entries(
    entries: &[FileEntry],
    max_file_chars: usize,
    max_prompt_chars: usize,
) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for entry in entries {
        let block = render_entry(entry, max_file_chars);
        if !current.is_empty() && current.chars().count() + block.chars().count() > max_prompt_chars
        {
            chunks.push(std::mem::take(&mut current));
        }
        current.push_str(&block);
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

enum ChatError {
    Retryable(String),
    Auth(String),
    Fatal(String),
}

pub struct LLMClient {
    config: LLMConfig,
    client: Client,
}

impl LLMClient {
    pub fn new(config: LLMConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Request every generated section for the collected files. Projects that
    /// exceed the prompt budget are split across sequential calls and the
    /// partial answers concatenated per section.
    pub async fn request_report(
        &self,
        request: &AnalysisRequest,
    ) -> crate::Result<Vec<GeneratedSection>> {
        let chunks = chunk_entries(
            &request.entries,
            self.config.max_file_chars,
            self.config.max_prompt_chars,
        );
        let chunks = if chunks.is_empty() {
            vec!["(no analyzable files were collected)".to_string()]
        } else {
            chunks
        };

        let total_calls = SectionKind::ALL.len() * chunks.len();
        println!(
            "  🔄 Running {} section(s) over {} chunk(s) ({} request(s))...",
            SectionKind::ALL.len(),
            chunks.len(),
            total_calls
        );

        let mut sections = Vec::new();
        for kind in SectionKind::ALL {
            let mut bodies = Vec::new();
            for (i, chunk) in chunks.iter().enumerate() {
                let user_prompt =
                    build_user_prompt(&request.project_name, chunk, i + 1, chunks.len());
                let body = self.chat(kind.system_prompt(), &user_prompt).await?;
                bodies.push(body);

                tokio::time::sleep(Duration::from_millis(100)).await;
            }
            println!("    ✅ {} completed", kind.title());
            sections.push(GeneratedSection {
                kind,
                body: bodies.join("\n\n"),
            });
        }

        Ok(sections)
    }

    /// One chat call with bounded retries. Rate limits, server errors, and
    /// transport failures back off linearly; credential rejections and other
    /// client errors fail immediately.
    async fn chat(&self, system_prompt: &str, user_prompt: &str) -> crate::Result<String> {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match self.send_once(system_prompt, user_prompt).await {
                Ok(text) => return Ok(text),
                Err(ChatError::Auth(reason)) => {
                    return Err(AnalyzerError::Unauthorized { reason });
                }
                Err(ChatError::Fatal(reason)) => {
                    return Err(AnalyzerError::request_failed(attempt, reason));
                }
                Err(ChatError::Retryable(reason)) => {
                    if attempt >= self.config.max_retries {
                        return Err(AnalyzerError::request_failed(attempt, reason));
                    }
                    let delay =
                        Duration::from_secs(self.config.retry_delay_seconds * u64::from(attempt));
                    println!(
                        "  ⏳ Attempt {attempt} failed ({reason}), retrying in {}s...",
                        delay.as_secs()
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    async fn send_once(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, ChatError> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| ChatError::Auth("no API key was provided".to_string()))?;

        let payload = serde_json::json!({
            "model": self.config.model,
            "messages": [
                {
                    "role": "system",
                    "content": system_prompt
                },
                {
                    "role": "user",
                    "content": user_prompt
                }
            ],
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature
        });

        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let response = self
            .client
            .post(&url)
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .header("HTTP-Referer", "https://github.com/codyaverett/project-analyzer")
            .json(&payload)
            .send()
            .await
            .map_err(|e| ChatError::Retryable(e.to_string()))?;

        let status = response.status();
        match classify_status(status) {
            StatusClass::Ok => {
                let body: serde_json::Value = response
                    .json()
                    .await
                    .map_err(|e| ChatError::Retryable(format!("invalid response body: {e}")))?;
                extract_content(&body)
                    .map(str::to_string)
                    .ok_or_else(|| {
                        ChatError::Fatal("response is missing choices[0].message.content".to_string())
                    })
            }
            StatusClass::Unauthorized => {
                let body = response.text().await.unwrap_or_default();
                Err(ChatError::Auth(format!("HTTP {status}: {body}")))
            }
            StatusClass::Retryable => Err(ChatError::Retryable(format!("HTTP {status}"))),
            StatusClass::Fatal => {
                let body = response.text().await.unwrap_or_default();
                Err(ChatError::Fatal(format!("HTTP {status}: {body}")))
            }
        }
    }
}

fn build_user_prompt(project_name: &str, chunk: &str, part: usize, total: usize) -> String {
    let mut prompt = format!("Analyze the following files from the project \"{project_name}\".\n\n");

    if total > 1 {
        prompt.push_str(&format!(
            "The project is split across {total} parts; this is part {part}. \
             Analyze what is shown here.\n\n"
        ));
    }

    prompt.push_str(chunk);
    prompt.push_str("\nBase every observation on the file contents above.");
    prompt
}
