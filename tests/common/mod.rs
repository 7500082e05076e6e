/*!
 * Common test utilities for the subalign test suite
 */

#![allow(dead_code)]

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub mod fake_models;

/// Sample transcript with three well-formed blocks
pub const SAMPLE_TRANSCRIPT: &str = "1
00:00:01,000 --> 00:00:04,000
This is a test subtitle. It has two sentences.

2
00:00:05,000 --> 00:00:09,000
It contains multiple entries.

3
00:00:10,000 --> 00:00:14,000
For testing purposes!
";

/// Route `log` output through the test harness, once per process
pub fn init_test_logging() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample transcript file for testing
pub fn create_test_transcript(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, SAMPLE_TRANSCRIPT)
}

/// Creates "<name>.mp3" and "<name>_merged.srt" in a language directory
pub fn create_test_article(language_dir: &Path, name: &str, transcript: &str) -> Result<()> {
    fs::create_dir_all(language_dir)?;
    create_test_file(language_dir, &format!("{}.mp3", name), "ID3")?;
    create_test_file(language_dir, &format!("{}_merged.srt", name), transcript)?;
    Ok(())
}

/// Helper to get the absolute path to a test resource
pub fn test_resource_path(relative_path: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("resources");
    path.push(relative_path);
    path
}

/// Assert two floats are equal within a tolerance
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {} to be close to {}",
        actual,
        expected
    );
}
