use std::fmt;

use serde::{Deserialize, Serialize};

/// Begin-of-sequence sentinel
pub const BOS: &str = "<BOS>";
/// End-of-sequence sentinel
pub const EOS: &str = "<EOS>";
/// Padding token registered with the tokenizer
pub const PAD: &str = "<PAD>";
/// End-of-question marker registered with the tokenizer
pub const EOQ: &str = "<EOQ>";

/// A single sentinel-wrapped training sample, e.g. `<BOS> Hello there <EOS>`
///
/// Samples never contain newlines; one sample is one line in the corpus files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrainingSample(String);

impl TrainingSample {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TrainingSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TrainingSample {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Accumulates fragments into a sample that is open until `finish` is called
///
/// The buffer starts with `"<BOS> "`; every fragment is followed by a single
/// space, and `finish` appends `"<EOS>"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBuilder {
    buffer: String,
    chars: usize,
    fragments: usize,
}

impl SampleBuilder {
    pub fn new() -> Self {
        let buffer = format!("{BOS} ");
        let chars = buffer.chars().count();
        Self {
            buffer,
            chars,
            fragments: 0,
        }
    }

    pub fn push(&mut self, fragment: &str) {
        self.buffer.push_str(fragment);
        self.buffer.push(' ');
        self.chars += fragment.chars().count() + 1;
        self.fragments += 1;
    }

    /// Current length in characters, begin sentinel included
    pub fn char_len(&self) -> usize {
        self.chars
    }

    pub fn fragment_count(&self) -> usize {
        self.fragments
    }

    pub fn is_empty(&self) -> bool {
        self.fragments == 0
    }

    pub fn finish(mut self) -> TrainingSample {
        self.buffer.push_str(EOS);
        TrainingSample(self.buffer)
    }
}

impl Default for SampleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Special-token vocabulary the fine-tuning run registers with its tokenizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialTokens {
    pub bos_token: String,
    pub eos_token: String,
    pub pad_token: String,
    pub additional_special_tokens: Vec<String>,
}

impl Default for SpecialTokens {
    fn default() -> Self {
        Self {
            bos_token: BOS.to_string(),
            eos_token: EOS.to_string(),
            pad_token: PAD.to_string(),
            additional_special_tokens: vec![EOQ.to_string()],
        }
    }
}
