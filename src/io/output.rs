use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::models::{SpecialTokens, TrainingSample};

/// Append each line plus a newline to `path`, creating the file and its
/// parent directories when missing
pub fn append_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<()> {
    ensure_parent(path)?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open file for appending: {:?}", path))?;

    for line in lines {
        writeln!(file, "{}", line.as_ref())
            .with_context(|| format!("Failed to append to {:?}", path))?;
    }
    Ok(())
}

/// Overwrite `path` with the samples joined by single newlines
///
/// No newline follows the final sample.
pub fn write_joined(path: &Path, samples: &[TrainingSample]) -> Result<()> {
    ensure_parent(path)?;

    let content = samples
        .iter()
        .map(TrainingSample::as_str)
        .collect::<Vec<_>>()
        .join("\n");

    std::fs::write(path, content).with_context(|| format!("Failed to write file: {:?}", path))
}

/// Overwrite `path` with one sample per line
pub fn write_lines(path: &Path, samples: &[TrainingSample]) -> Result<()> {
    ensure_parent(path)?;

    let mut content = String::new();
    for sample in samples {
        content.push_str(sample.as_str());
        content.push('\n');
    }

    std::fs::write(path, content).with_context(|| format!("Failed to write file: {:?}", path))
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }
    Ok(())
}

/// Description of one assembled corpus, written next to the training files
#[derive(Debug, Clone, Serialize)]
pub struct CorpusManifest {
    pub run_id: String,
    /// RFC 3339 timestamp, UTC
    pub created_at: String,
    pub politician: String,
    pub talk_show_samples: usize,
    pub speech_samples: usize,
    pub train_samples: usize,
    pub validation_samples: usize,
    pub max_chars_per_sample: usize,
    pub train_split: f64,
    pub seed: Option<u64>,
    pub special_tokens: SpecialTokens,
}

impl CorpusManifest {
    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        ensure_parent(path)?;
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, self).context("Failed to write JSON")?;
        Ok(())
    }
}
