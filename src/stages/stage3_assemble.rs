use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::io::{
    CorpusManifest, DataLayout, SPEECH_COLLECTION_FILE, list_files, read_records, write_joined,
    write_lines,
};
use crate::models::{PoliticianName, SpecialTokens, TrainingSample};
use crate::text::{DEFAULT_MAX_CHARS, Language, SentenceSplitter, chunk_speech, extract_utterances};

/// Configuration for corpus assembly
#[derive(Debug, Clone)]
pub struct AssembleConfig {
    /// Character limit for speech-derived samples
    pub max_chars_per_sample: usize,
    /// Fraction of shuffled samples that go to the training file
    pub train_split: f64,
    /// Shuffle seed; `None` uses the thread RNG
    pub seed: Option<u64>,
    /// Sentence splitting conventions for speeches
    pub language: Language,
}

impl Default for AssembleConfig {
    fn default() -> Self {
        Self {
            max_chars_per_sample: DEFAULT_MAX_CHARS,
            train_split: 0.8,
            seed: None,
            language: Language::default(),
        }
    }
}

/// Result of corpus assembly
#[derive(Debug, Clone)]
pub struct AssembleResult {
    pub talk_show_samples: usize,
    pub speech_samples: usize,
    /// Utterances still open at the end of a talk-show file
    pub dropped_utterances: usize,
    pub train_samples: usize,
    pub validation_samples: usize,
    pub training_path: PathBuf,
    pub validation_path: PathBuf,
    pub manifest_path: PathBuf,
}

/// Disjoint training and validation partitions of a shuffled sample set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusSplit {
    pub train: Vec<TrainingSample>,
    pub validation: Vec<TrainingSample>,
}

/// Shuffle `samples` and cut them at `floor(train_split * len)`
pub fn split_corpus<R: Rng + ?Sized>(
    mut samples: Vec<TrainingSample>,
    train_split: f64,
    rng: &mut R,
) -> CorpusSplit {
    samples.shuffle(rng);

    let cutoff = ((samples.len() as f64 * train_split).floor() as usize).min(samples.len());
    let validation = samples.split_off(cutoff);

    CorpusSplit {
        train: samples,
        validation,
    }
}

/// Talk-show samples from every transcript in `dir`, in file-name order
///
/// The speech collection, which lives in the same directory, is skipped.
/// Returns the samples and the number of utterances dropped at end of file.
pub fn collect_talk_show_samples(
    dir: &Path,
    politician: &PoliticianName,
) -> Result<(Vec<TrainingSample>, usize)> {
    let mut samples = Vec::new();
    let mut dropped = 0;

    for path in list_files(dir)? {
        if path.file_name().is_some_and(|name| name == SPEECH_COLLECTION_FILE) {
            continue;
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path))?;
        let extraction = extract_utterances(&content, politician);

        debug!("{:?}: {} utterances", path, extraction.samples.len());
        if extraction.dropped_at_eof.is_some() {
            warn!("{:?}: utterance without closing blank line dropped", path);
            dropped += 1;
        }
        samples.extend(extraction.samples);
    }

    Ok((samples, dropped))
}

/// Speech samples from a speech collection, one speech per line
pub fn collect_speech_samples(
    path: &Path,
    splitter: &SentenceSplitter,
    max_chars: usize,
) -> Result<Vec<TrainingSample>> {
    let speeches = read_records(path).context("Failed to read speech collection")?;

    Ok(speeches
        .iter()
        .flat_map(|speech| chunk_speech(speech, splitter, max_chars))
        .collect())
}

/// Build the training and validation files for one politician
pub fn execute_assembly(
    politician: &PoliticianName,
    layout: &DataLayout,
    config: &AssembleConfig,
) -> Result<AssembleResult> {
    if !(0.0..=1.0).contains(&config.train_split) {
        anyhow::bail!(
            "train split must be between 0 and 1, got {}",
            config.train_split
        );
    }

    let raw_dir = layout.raw_dir(politician);
    info!("Reading talk-show transcripts from {:?}", raw_dir);
    let (talk_show, dropped_utterances) = collect_talk_show_samples(&raw_dir, politician)?;

    let splitter = SentenceSplitter::new(config.language);
    let speeches = collect_speech_samples(
        &layout.speech_collection(politician),
        &splitter,
        config.max_chars_per_sample,
    )?;

    info!(
        "{} talk-show samples, {} speech samples",
        talk_show.len(),
        speeches.len()
    );

    let talk_show_samples = talk_show.len();
    let speech_samples = speeches.len();
    let mut samples = talk_show;
    samples.extend(speeches);

    write_lines(&layout.staging_file(politician), &samples)?;

    let split = match config.seed {
        Some(seed) => split_corpus(samples, config.train_split, &mut StdRng::seed_from_u64(seed)),
        None => split_corpus(samples, config.train_split, &mut rand::rng()),
    };

    let training_path = layout.training_file(politician);
    let validation_path = layout.validation_file(politician);
    let manifest_path = layout.manifest_file(politician);

    write_joined(&training_path, &split.train)?;
    write_joined(&validation_path, &split.validation)?;

    let manifest = CorpusManifest {
        run_id: uuid::Uuid::new_v4().to_string(),
        created_at: chrono::Utc::now().to_rfc3339(),
        politician: politician.full_name(),
        talk_show_samples,
        speech_samples,
        train_samples: split.train.len(),
        validation_samples: split.validation.len(),
        max_chars_per_sample: config.max_chars_per_sample,
        train_split: config.train_split,
        seed: config.seed,
        special_tokens: SpecialTokens::default(),
    };
    manifest.write_json(&manifest_path)?;

    info!(
        "Wrote {} training and {} validation samples",
        split.train.len(),
        split.validation.len()
    );

    Ok(AssembleResult {
        talk_show_samples,
        speech_samples,
        dropped_utterances,
        train_samples: split.train.len(),
        validation_samples: split.validation.len(),
        training_path,
        validation_path,
        manifest_path,
    })
}
