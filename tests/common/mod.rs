//! Shared test fixtures and utilities for integration tests.
//!
//! # Available Fixtures
//!
//! - `config_dir`: an empty [`TempWorkspace`] for writing settings files
//! - `default_tokenizer`: a tokenizer with the stock boost table
//!
//! Helpers that unwrap a [`FieldValue`] into fragments or words keep the
//! assertions in the test files short.

use rstest::fixture;
use search_processors::{BoostTokenizer, FieldValue, ScoredFragment};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory that is removed when dropped.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempWorkspace {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempWorkspace {
    /// Creates a new empty temporary workspace.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    /// Returns the root path of this workspace.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Writes a file within this workspace and returns its full path.
    ///
    /// # Panics
    /// Panics if file creation fails.
    pub fn create_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("Failed to create parent directory for '{}': {}", path, e)
            });
        }
        std::fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Failed to write file '{}': {}", path, e));
        full_path
    }
}

#[allow(dead_code)]
#[fixture]
pub fn config_dir() -> TempWorkspace {
    TempWorkspace::new()
}

#[allow(dead_code)]
#[fixture]
pub fn default_tokenizer() -> BoostTokenizer {
    BoostTokenizer::default()
}

/// Fragments of a tokenized value.
///
/// # Panics
/// Panics if the value is plain text.
#[allow(dead_code)]
pub fn fragments(value: FieldValue) -> Vec<ScoredFragment> {
    match value {
        FieldValue::Tokens(tokens) => tokens,
        FieldValue::Text(text) => panic!("Expected fragments, got text {:?}", text),
    }
}

/// Whitespace-separated words of a value, ignoring scores.
#[allow(dead_code)]
pub fn words(value: &FieldValue) -> Vec<String> {
    value
        .plain_text()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

#[allow(dead_code)]
pub fn frag(text: &str, score: f64) -> ScoredFragment {
    ScoredFragment::new(text, score)
}
