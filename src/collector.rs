use crate::config::Config;
use crate::error::AnalyzerError;
use ignore::WalkBuilder;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One collected file: its path relative to the collection root and its
/// content, read lossily as UTF-8.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: PathBuf,
    pub content: String,
    pub size: u64,
}

/// A file that matched the collection filters but could not be read.
/// Recorded and reported; never aborts the run.
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: AnalyzerError,
}

#[derive(Debug, Default)]
pub struct CollectionOutcome {
    pub entries: Vec<FileEntry>,
    pub skipped: Vec<SkippedFile>,
}

impl CollectionOutcome {
    pub fn stats(&self) -> CollectionStats {
        CollectionStats {
            total_files: self.entries.len(),
            total_bytes: self.entries.iter().map(|e| e.size).sum(),
            skipped_files: self.skipped.len(),
        }
    }
}

pub struct FileCollector {
    config: Config,
}

impl FileCollector {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Walk the target directory and read every matching regular file.
    ///
    /// Fails up front when the root is missing. Unreadable files are recorded
    /// in the outcome's `skipped` list and collection continues.
    pub fn collect(&self) -> crate::Result<CollectionOutcome> {
        let root = &self.config.target_directory;
        if !root.is_dir() {
            return Err(AnalyzerError::DirectoryNotFound(root.clone()));
        }

        let mut outcome = CollectionOutcome::default();

        let mut walker_builder = WalkBuilder::new(root);
        walker_builder
            .standard_filters(true)
            .hidden(false)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true);

        for result in walker_builder.build() {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    eprintln!("  ⚠️  walk error: {e}");
                    continue;
                }
            };
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            if self.should_ignore_file(path) {
                continue;
            }

            if !self.matches_extension(path) {
                continue;
            }

            let rel_path = path.strip_prefix(root).unwrap_or(path).to_path_buf();

            match fs::metadata(path) {
                Ok(metadata) if metadata.len() > self.config.max_file_size as u64 => continue,
                Ok(metadata) => match fs::read(path) {
                    Ok(bytes) => {
                        outcome.entries.push(FileEntry {
                            path: rel_path,
                            content: String::from_utf8_lossy(&bytes).into_owned(),
                            size: metadata.len(),
                        });
                    }
                    Err(e) => {
                        eprintln!("  ⚠️  could not read {}: {e}", rel_path.display());
                        outcome.skipped.push(SkippedFile {
                            path: rel_path.clone(),
                            reason: AnalyzerError::PermissionDenied {
                                path: rel_path,
                                source: e,
                            },
                        });
                    }
                },
                Err(e) => {
                    eprintln!("  ⚠️  could not stat {}: {e}", rel_path.display());
                    outcome.skipped.push(SkippedFile {
                        path: rel_path.clone(),
                        reason: AnalyzerError::PermissionDenied {
                            path: rel_path,
                            source: e,
                        },
                    });
                }
            }
        }

        outcome.entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(outcome)
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .is_some_and(|ext| self.config.file_extensions.contains(&ext))
    }

    fn should_ignore_file(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        for pattern in &self.config.ignore_patterns {
            // Handle simple glob patterns (*.ext)
            if let Some(suffix) = pattern.strip_prefix("*.") {
                if let Some(filename) = path.file_name() {
                    if filename
                        .to_string_lossy()
                        .ends_with(&format!(".{suffix}"))
                    {
                        return true;
                    }
                }
            } else if pattern.contains('*') {
                // Handle other wildcard patterns by converting to simple regex
                let regex_pattern = pattern.replace('.', "\\.").replace('*', ".*");
                if let Ok(re) = regex::Regex::new(&regex_pattern) {
                    if re.is_match(&path_str) {
                        return true;
                    }
                    if let Some(filename) = path.file_name() {
                        if re.is_match(&filename.to_string_lossy()) {
                            return true;
                        }
                    }
                }
            } else {
                // Exact matches against any path component
                for component in path.components() {
                    if component.as_os_str().to_string_lossy() == *pattern {
                        return true;
                    }
                }
            }
        }

        false
    }
}

#[derive(Debug, Default)]
pub struct CollectionStats {
    pub total_files: usize,
    pub total_bytes: u64,
    pub skipped_files: usize,
}

impl CollectionStats {
    pub fn print_summary(&self) {
        println!("File Collection Summary:");
        println!("  Collected files: {}", self.total_files);
        println!(
            "  Total size: {:.2} MB",
            self.total_bytes as f64 / (1024.0 * 1024.0)
        );
        if self.skipped_files > 0 {
            println!("  Unreadable files skipped: {}", self.skipped_files);
        }
    }
}
