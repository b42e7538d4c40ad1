use std::path::{Path, PathBuf};

use crate::models::PoliticianName;

/// File name of the per-person speech collection inside the raw-data directory
pub const SPEECH_COLLECTION_FILE: &str = "speech_collection.txt";

/// Where every pipeline stage reads and writes its files
///
/// ```text
/// <root>/bundestag/resource_links.txt
/// <root>/raw_data/<alias>/                     tagged talk-show transcripts
/// <root>/raw_data/<alias>/speech_collection.txt
/// <root>/training_files/<alias>.txt            staging file
/// <root>/input_data/<alias>/training_data.txt
/// <root>/input_data/<alias>/validation_data.txt
/// <root>/input_data/<alias>/manifest.json
/// ```
#[derive(Debug, Clone)]
pub struct DataLayout {
    root: PathBuf,
}

impl DataLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Link list written by the link collector
    pub fn links_file(&self) -> PathBuf {
        self.root.join("bundestag").join("resource_links.txt")
    }

    /// Directory holding a politician's raw inputs
    pub fn raw_dir(&self, politician: &PoliticianName) -> PathBuf {
        self.root.join("raw_data").join(politician.alias())
    }

    pub fn speech_collection(&self, politician: &PoliticianName) -> PathBuf {
        self.raw_dir(politician).join(SPEECH_COLLECTION_FILE)
    }

    /// All assembled samples before shuffling, one per line
    pub fn staging_file(&self, politician: &PoliticianName) -> PathBuf {
        self.root
            .join("training_files")
            .join(format!("{}.txt", politician.alias()))
    }

    pub fn corpus_dir(&self, politician: &PoliticianName) -> PathBuf {
        self.root.join("input_data").join(politician.alias())
    }

    pub fn training_file(&self, politician: &PoliticianName) -> PathBuf {
        self.corpus_dir(politician).join("training_data.txt")
    }

    pub fn validation_file(&self, politician: &PoliticianName) -> PathBuf {
        self.corpus_dir(politician).join("validation_data.txt")
    }

    pub fn manifest_file(&self, politician: &PoliticianName) -> PathBuf {
        self.corpus_dir(politician).join("manifest.json")
    }
}

impl Default for DataLayout {
    fn default() -> Self {
        Self::new("data")
    }
}
