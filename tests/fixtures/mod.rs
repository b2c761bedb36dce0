//! Test fixtures for corpus assertions
//!
//! The merge corpus lists JSON class inputs with the merged string each one
//! must produce, optionally under config overrides.

use std::path::{Path, PathBuf};

/// Path to the merge corpus fixture
pub fn merge_corpus_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/merge_corpus/corpus.json")
}

/// One merge case from corpus.json
#[derive(Debug, Clone, serde::Deserialize)]
pub struct MergeTestCase {
    pub id: String,
    pub description: String,
    /// Each element is converted with `ClassInput::from(&Value)`
    pub inputs: Vec<serde_json::Value>,
    pub expected: String,
    /// CLI-style override layer (`prefix`, `separator`)
    #[serde(default)]
    pub config: Option<serde_json::Value>,
}

/// Full merge corpus
#[derive(Debug, Clone, serde::Deserialize)]
pub struct MergeCorpus {
    pub schema_version: u32,
    pub description: String,
    pub test_cases: Vec<MergeTestCase>,
}

impl MergeCorpus {
    /// Load corpus from the fixture file
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(merge_corpus_path())?;
        Ok(serde_json::from_str(&content)?)
    }
}
