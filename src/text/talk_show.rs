use tracing::debug;

use crate::models::{PoliticianName, SampleBuilder, TrainingSample};

/// Whether the extractor is inside one of the target's utterances
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UtteranceState {
    Idle,
    Recording(SampleBuilder),
}

/// Result of scanning one tagged talk-show transcript
#[derive(Debug, Clone, Default)]
pub struct TalkShowExtraction {
    /// Completed utterances, in transcript order
    pub samples: Vec<TrainingSample>,
    /// An utterance still open at end of input; it is not part of `samples`
    pub dropped_at_eof: Option<String>,
}

/// Line-driven state machine extracting one politician's utterances
///
/// A line equal to `[First Last]` (after trimming) starts recording; each
/// following non-blank line is added to the utterance; a blank line closes
/// it. A repeated marker while recording is ignored.
#[derive(Debug)]
pub struct UtteranceExtractor {
    marker: String,
    state: UtteranceState,
    samples: Vec<TrainingSample>,
}

impl UtteranceExtractor {
    pub fn new(politician: &PoliticianName) -> Self {
        Self {
            marker: politician.speaker_marker(),
            state: UtteranceState::Idle,
            samples: Vec::new(),
        }
    }

    pub fn state(&self) -> &UtteranceState {
        &self.state
    }

    pub fn feed(&mut self, line: &str) {
        let line = line.trim();
        let state = std::mem::replace(&mut self.state, UtteranceState::Idle);

        self.state = match state {
            UtteranceState::Idle if line == self.marker => {
                UtteranceState::Recording(SampleBuilder::new())
            }
            UtteranceState::Idle => UtteranceState::Idle,
            UtteranceState::Recording(buffer) if line.is_empty() => {
                self.samples.push(buffer.finish());
                UtteranceState::Idle
            }
            UtteranceState::Recording(buffer) if line == self.marker => {
                UtteranceState::Recording(buffer)
            }
            UtteranceState::Recording(mut buffer) => {
                buffer.push(line);
                UtteranceState::Recording(buffer)
            }
        };
    }

    /// End of input. An utterance without a closing blank line is dropped.
    pub fn finish(self) -> TalkShowExtraction {
        let dropped_at_eof = match self.state {
            UtteranceState::Idle => None,
            UtteranceState::Recording(buffer) => {
                let unterminated = buffer.finish().into_string();
                debug!("Dropping unterminated utterance: {}", unterminated);
                Some(unterminated)
            }
        };

        TalkShowExtraction {
            samples: self.samples,
            dropped_at_eof,
        }
    }
}

/// Extract every closed utterance of `politician` from a tagged transcript
pub fn extract_utterances(content: &str, politician: &PoliticianName) -> TalkShowExtraction {
    let mut extractor = UtteranceExtractor::new(politician);
    for line in content.lines() {
        extractor.feed(line);
    }
    extractor.finish()
}
