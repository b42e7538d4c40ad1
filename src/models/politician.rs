use std::fmt;
use std::str::FromStr;

use crate::error::NameError;

/// A politician identified by exactly one first and one last name
///
/// Speech attribution compares both fields by exact, case-sensitive equality,
/// so the tokens are normalized once here: the first character of each is
/// upper-cased, the rest is kept as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoliticianName {
    first_name: String,
    last_name: String,
}

impl PoliticianName {
    /// Parse a full name such as `"Angela Merkel"`
    pub fn parse(input: &str) -> Result<Self, NameError> {
        let tokens: Vec<&str> = input.split_whitespace().collect();

        match tokens.as_slice() {
            [first, last] => Ok(Self {
                first_name: capitalize(first),
                last_name: capitalize(last),
            }),
            _ => Err(NameError::TokenCount {
                input: input.to_string(),
                count: tokens.len(),
            }),
        }
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// First and last name separated by a single space
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// The line that opens one of this politician's utterances in a tagged transcript
    pub fn speaker_marker(&self) -> String {
        format!("[{}]", self.full_name())
    }

    /// Lower-cased last name, used to name per-person directories and files
    pub fn alias(&self) -> String {
        self.last_name.to_lowercase()
    }

    /// Whether a speaker's name fields attribute a speech to this politician
    pub fn matches(&self, first_name: &str, last_name: &str) -> bool {
        first_name == self.first_name && last_name == self.last_name
    }
}

impl FromStr for PoliticianName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PoliticianName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
