use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tempfile::TempDir;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use chunkfetch::progress::{ProgressBarOpts, StyleOptions};
use chunkfetch::{DownloadJob, DownloaderBuilder, HttpClientConfig};
use tracing_subscriber::EnvFilter;

// Common test constants
pub const TEST_DOMAIN: &str = "http://domain.com/file.zip";
pub const TEST_USER_AGENT: &str = "chunkfetch-test-agent";
pub const MB: usize = 1_000_000;

static TRACING: Once = Once::new();

/// Installs a tracing subscriber once per test binary.
///
/// Output is captured by the test harness; use `RUST_LOG=chunkfetch=debug`
/// to see it for failing tests.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Creates a temporary file with the given content
pub fn create_temp_file(dir: &Path, filename: &str, content: &[u8]) -> PathBuf {
    let file_path = dir.join(filename);
    fs::write(&file_path, content).expect("Failed to write temporary file");
    file_path
}

/// Creates a test URL for download testing
pub fn create_test_url(filename: &str) -> String {
    format!("https://example.com/{}", filename)
}

/// Creates test file content of specified size
pub fn create_test_content(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 251) as u8).collect()
}

/// Asserts that a file exists at the given path
pub fn assert_file_exists(path: &Path) {
    assert!(path.exists(), "File should exist at path: {:?}", path);
}

/// Asserts that no file exists at the given path
pub fn assert_file_absent(path: &Path) {
    assert!(!path.exists(), "File should not exist at path: {:?}", path);
}

/// Asserts that a file holds exactly `expected`
pub fn assert_file_content(path: &Path, expected: &[u8]) {
    let content = fs::read(path).expect("Failed to read file");
    assert_eq!(content.len(), expected.len(), "File size mismatch at path: {:?}", path);
    assert!(content == expected, "File content mismatch at path: {:?}", path);
}

/// Asserts that a directory holds no leftover part files
pub fn assert_no_parts(dir: &Path) {
    let leftovers: Vec<_> = fs::read_dir(dir)
        .expect("Failed to read directory")
        .flatten()
        .filter(|e| e.file_name().to_string_lossy().ends_with(".part"))
        .collect();
    assert!(leftovers.is_empty(), "Leftover part files: {:?}", leftovers);
}

// === Download Creation Helpers ===

/// Creates a test job from the common test domain
pub fn create_test_job() -> DownloadJob {
    DownloadJob::try_from(TEST_DOMAIN).expect("Failed to create test job")
}

// === HTTP Configuration Helpers ===

/// Creates test headers with common user agent
pub fn create_test_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(TEST_USER_AGENT));
    headers
}

/// Creates a test HTTP client configuration
pub fn create_test_http_config() -> HttpClientConfig {
    HttpClientConfig {
        proxy: None,
        headers: Some(create_test_headers()),
    }
}

// === Progress Bar Helpers ===

/// Creates default test progress bar options
pub fn create_test_progress_opts() -> ProgressBarOpts {
    ProgressBarOpts::new(None, None, true, false)
}

/// Creates custom progress bar options with template and chars
pub fn create_custom_progress_opts(template: &str, chars: &str) -> ProgressBarOpts {
    ProgressBarOpts::new(
        Some(template.to_string()),
        Some(chars.to_string()),
        true,
        false,
    )
}

/// Creates default test style options
pub fn create_test_style_options() -> StyleOptions {
    StyleOptions::new(create_test_progress_opts(), ProgressBarOpts::with_bytes_style())
}

/// Creates disabled style options for testing
pub fn create_disabled_style_options() -> StyleOptions {
    StyleOptions::new(ProgressBarOpts::hidden(), ProgressBarOpts::hidden())
}

// === Downloader Builder Helpers ===

/// Creates a hidden downloader builder writing into `dir`, with part files
/// kept next to the outputs so tests can check they are cleaned up.
pub fn create_test_downloader_builder(dir: &Path) -> DownloaderBuilder {
    init_tracing();
    DownloaderBuilder::hidden()
        .directory(dir.to_path_buf())
        .temp_dir(dir.to_path_buf())
        .headers(create_test_headers())
}

// === Assertion Helpers ===

/// Asserts that progress bar options build a bar of the requested length
pub fn assert_progress_opts_build(opts: &ProgressBarOpts) {
    let pb = opts.clone().to_progress_bar(100);
    assert_eq!(pb.length(), Some(100), "Progress bar length mismatch");
}

/// Asserts that progress bar options are disabled
pub fn assert_progress_opts_disabled(opts: &ProgressBarOpts) {
    let pb = opts.clone().to_progress_bar(100);
    assert!(pb.is_hidden(), "Progress bar should be disabled");
}
