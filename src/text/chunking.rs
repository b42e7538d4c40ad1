use crate::models::{SampleBuilder, TrainingSample};

use super::SentenceSplitter;

/// Default upper bound on the characters of one speech-derived sample
pub const DEFAULT_MAX_CHARS: usize = 250;

/// Greedily pack sentences into samples of at most `max_chars` characters
///
/// A sentence that would push the open buffer past `max_chars` closes it and
/// starts the next one. A buffer always takes at least one sentence, so a
/// single sentence longer than the limit becomes a sample of its own. The
/// final, possibly short, buffer is always emitted.
pub fn pack_sentences<I, S>(sentences: I, max_chars: usize) -> Vec<TrainingSample>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut samples = Vec::new();
    let mut buffer = SampleBuilder::new();

    for sentence in sentences {
        let sentence = sentence.as_ref();
        let added = sentence.chars().count() + 1;

        if !buffer.is_empty() && buffer.char_len() + added > max_chars {
            samples.push(std::mem::take(&mut buffer).finish());
        }
        buffer.push(sentence);
    }

    if !buffer.is_empty() {
        samples.push(buffer.finish());
    }

    samples
}

/// Split one speech into sentences and pack them into samples
pub fn chunk_speech(
    speech: &str,
    splitter: &SentenceSplitter,
    max_chars: usize,
) -> Vec<TrainingSample> {
    pack_sentences(splitter.split(speech), max_chars)
}
