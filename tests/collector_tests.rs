use project_analyzer::collector::FileCollector;
use project_analyzer::config::Config;
use project_analyzer::error::AnalyzerError;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn config_for(root: &Path) -> Config {
    let mut config = Config::default();
    config.target_directory = root.to_path_buf();
    config
}

fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }
    fs::write(&path, content).expect("Failed to write fixture file");
}

#[test]
fn collects_exactly_the_reachable_matching_files() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let root = temp_dir.path();

    write_file(root, "src/main.rs", "fn main() {}");
    write_file(root, "src/lib.rs", "pub fn lib() {}");
    write_file(root, "docs/readme.md", "# readme");
    write_file(root, "nested/deep/module.py", "def f(): pass");
    // Filtered out: ignored directory, ignored component, unlisted extension
    write_file(root, "node_modules/pkg/index.js", "module.exports = {}");
    write_file(root, ".git/config", "[core]");
    write_file(root, "image.png", "not really a png");

    let outcome = FileCollector::new(config_for(root))
        .collect()
        .expect("Collection failed");

    let mut paths: Vec<PathBuf> = outcome.entries.iter().map(|e| e.path.clone()).collect();
    paths.sort();

    let expected: Vec<PathBuf> = vec![
        PathBuf::from("docs/readme.md"),
        PathBuf::from("nested/deep/module.py"),
        PathBuf::from("src/lib.rs"),
        PathBuf::from("src/main.rs"),
    ];
    assert_eq!(paths, expected);
    assert!(outcome.skipped.is_empty());
}

#[test]
fn entries_carry_relative_paths_and_content() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let root = temp_dir.path();

    write_file(root, "src/main.rs", "fn main() { println!(\"hi\"); }");

    let outcome = FileCollector::new(config_for(root))
        .collect()
        .expect("Collection failed");

    assert_eq!(outcome.entries.len(), 1);
    let entry = &outcome.entries[0];
    assert!(entry.path.is_relative());
    assert_eq!(entry.path, PathBuf::from("src/main.rs"));
    assert!(entry.content.contains("println!"));
    assert_eq!(entry.size, entry.content.len() as u64);
}

#[test]
fn missing_root_fails_with_directory_not_found() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let missing = temp_dir.path().join("does-not-exist");

    let result = FileCollector::new(config_for(&missing)).collect();

    match result {
        Err(AnalyzerError::DirectoryNotFound(path)) => assert_eq!(path, missing),
        other => panic!("Expected DirectoryNotFound, got {other:?}"),
    }
}

#[test]
fn glob_ignore_patterns_exclude_matching_files() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let root = temp_dir.path();

    write_file(root, "app.js", "console.log(1)");
    write_file(root, "app.min.js", "console.log(1)");
    write_file(root, "debug.log", "noise");

    let mut config = config_for(root);
    config.file_extensions.push("log".to_string());

    let outcome = FileCollector::new(config).collect().expect("Collection failed");

    let paths: Vec<&Path> = outcome.entries.iter().map(|e| e.path.as_path()).collect();
    assert_eq!(paths, vec![Path::new("app.js")]);
}

#[test]
fn files_over_the_size_cap_are_excluded() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let root = temp_dir.path();

    write_file(root, "small.rs", "fn small() {}");
    write_file(root, "large.rs", &"x".repeat(4096));

    let mut config = config_for(root);
    config.max_file_size = 1024;

    let outcome = FileCollector::new(config).collect().expect("Collection failed");

    let paths: Vec<&Path> = outcome.entries.iter().map(|e| e.path.as_path()).collect();
    assert_eq!(paths, vec![Path::new("small.rs")]);
}

#[cfg(unix)]
#[test]
fn unreadable_file_is_recorded_and_collection_continues() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let root = temp_dir.path();

    write_file(root, "readable.rs", "fn ok() {}");
    write_file(root, "locked.rs", "fn hidden() {}");

    let locked = root.join("locked.rs");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000))
        .expect("Failed to change permissions");

    // Running as root makes every file readable; nothing to verify then.
    if fs::read(&locked).is_ok() {
        return;
    }

    let outcome = FileCollector::new(config_for(root))
        .collect()
        .expect("Collection failed");

    let paths: Vec<&Path> = outcome.entries.iter().map(|e| e.path.as_path()).collect();
    assert_eq!(paths, vec![Path::new("readable.rs")]);

    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].path, PathBuf::from("locked.rs"));
    assert!(matches!(
        outcome.skipped[0].reason,
        AnalyzerError::PermissionDenied { .. }
    ));

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644))
        .expect("Failed to restore permissions");
}

#[test]
fn stats_reflect_collected_and_skipped_counts() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let root = temp_dir.path();

    write_file(root, "a.rs", "fn a() {}");
    write_file(root, "b.rs", "fn b() {}");

    let outcome = FileCollector::new(config_for(root))
        .collect()
        .expect("Collection failed");
    let stats = outcome.stats();

    assert_eq!(stats.total_files, 2);
    assert_eq!(
        stats.total_bytes,
        outcome.entries.iter().map(|e| e.size).sum::<u64>()
    );
    assert_eq!(stats.skipped_files, 0);
}
