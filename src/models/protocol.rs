use serde::{Deserialize, Serialize};

use super::PoliticianName;

/// A plenary protocol: the ordered agenda items of one parliamentary session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Protocol {
    pub agenda_items: Vec<AgendaItem>,
}

/// One agenda item (`tagesordnungspunkt`) and the speeches held under it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgendaItem {
    /// Value of the `top-id` attribute, if present
    pub id: Option<String>,
    pub speeches: Vec<Speech>,
}

/// One speech (`rede`) attributed to a single speaker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Speech {
    /// Value of the `id` attribute, if present
    pub id: Option<String>,
    pub speaker: Speaker,
    pub paragraphs: Vec<Paragraph>,
}

/// Name fields of the speaker a speech is attributed to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speaker {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// A text paragraph inside a speech
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub kind: ParagraphKind,
    /// Text content; `None` when the paragraph is empty or contains nested markup
    pub text: Option<String>,
}

/// Paragraph class, taken from the `klasse` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParagraphKind {
    /// klasse `O`
    Normal,
    /// klasse `J`
    Interjection,
    /// Any other class (speaker line, numbered paragraphs, headings)
    Other,
}

impl ParagraphKind {
    pub fn from_class(class: &str) -> Self {
        match class {
            "O" => Self::Normal,
            "J" => Self::Interjection,
            _ => Self::Other,
        }
    }

    /// Whether paragraphs of this kind contribute to the collected speech text
    pub fn is_speech_text(self) -> bool {
        matches!(self, Self::Normal | Self::Interjection)
    }
}

impl Speaker {
    /// Attribution requires both name fields to be present and equal
    pub fn is(&self, politician: &PoliticianName) -> bool {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => politician.matches(first, last),
            _ => false,
        }
    }
}

impl Speech {
    /// Text fragments of this speech in document order, skipping absent ones
    pub fn fragments(&self) -> impl Iterator<Item = &str> {
        self.paragraphs
            .iter()
            .filter(|p| p.kind.is_speech_text())
            .filter_map(|p| p.text.as_deref())
    }
}

impl Protocol {
    /// All speeches in the protocol, in document order
    pub fn speeches(&self) -> impl Iterator<Item = &Speech> {
        self.agenda_items.iter().flat_map(|item| item.speeches.iter())
    }

    /// Speeches attributed to the given politician
    pub fn speeches_by<'a>(
        &'a self,
        politician: &'a PoliticianName,
    ) -> impl Iterator<Item = &'a Speech> + 'a {
        self.speeches().filter(move |s| s.speaker.is(politician))
    }

    /// Concatenate every fragment of every speech by `politician` into one line
    ///
    /// Returns `None` when the politician did not speak (or said nothing that
    /// survived fragment filtering).
    pub fn collect_speech(&self, politician: &PoliticianName) -> Option<String> {
        let fragments: Vec<&str> = self
            .speeches_by(politician)
            .flat_map(|s| s.fragments())
            .collect();

        if fragments.is_empty() {
            return None;
        }

        Some(fragments.join(" "))
    }
}
