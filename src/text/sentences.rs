use std::collections::HashSet;

use clap::ValueEnum;
use unicode_segmentation::UnicodeSegmentation;

/// Language whose abbreviation conventions guide sentence splitting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Language {
    #[default]
    German,
    English,
}

const GERMAN_ABBREVIATIONS: &[&str] = &[
    "abs.", "art.", "bzw.", "ca.", "d.h.", "dr.", "ebd.", "etc.", "evtl.", "frau.", "ggf.",
    "hr.", "inkl.", "nr.", "prof.", "s.", "sog.", "str.", "u.a.", "usw.", "vgl.", "z.b.",
    "z.t.",
];

const ENGLISH_ABBREVIATIONS: &[&str] = &[
    "dr.", "e.g.", "etc.", "i.e.", "jr.", "mr.", "mrs.", "ms.", "no.", "prof.", "sr.", "st.",
    "vs.",
];

/// Splits running text into sentences
///
/// Boundaries come from the Unicode sentence rules (UAX #29). Those rules break
/// after any period followed by an upper-case word, so pieces ending in a known
/// abbreviation or a day ordinal (`3.`) are joined back onto the next one.
#[derive(Debug, Clone)]
pub struct SentenceSplitter {
    abbreviations: HashSet<&'static str>,
}

impl SentenceSplitter {
    pub fn new(language: Language) -> Self {
        let list = match language {
            Language::German => GERMAN_ABBREVIATIONS,
            Language::English => ENGLISH_ABBREVIATIONS,
        };
        Self {
            abbreviations: list.iter().copied().collect(),
        }
    }

    pub fn split(&self, text: &str) -> Vec<String> {
        let mut sentences: Vec<String> = Vec::new();

        for piece in text.unicode_sentences() {
            let piece = piece.trim();
            if piece.is_empty() {
                continue;
            }

            let joins_previous = sentences
                .last()
                .is_some_and(|previous| self.ends_without_boundary(previous));

            match sentences.last_mut() {
                Some(previous) if joins_previous => {
                    previous.push(' ');
                    previous.push_str(piece);
                }
                _ => sentences.push(piece.to_string()),
            }
        }

        sentences
    }

    fn ends_without_boundary(&self, sentence: &str) -> bool {
        let Some(last_word) = sentence.split_whitespace().last() else {
            return false;
        };
        let last_word = last_word.trim_start_matches(['(', '"', '„', '\'']);

        if self.abbreviations.contains(last_word.to_lowercase().as_str()) {
            return true;
        }

        // Day ordinals such as "3. Oktober"
        match last_word.strip_suffix('.') {
            Some(number) => {
                !number.is_empty()
                    && number.len() <= 2
                    && number.chars().all(|c| c.is_ascii_digit())
            }
            None => false,
        }
    }
}

impl Default for SentenceSplitter {
    fn default() -> Self {
        Self::new(Language::default())
    }
}
