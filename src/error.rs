use thiserror::Error;

/// Errors raised while parsing a politician's name from user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    /// Names must consist of exactly a first and a last name.
    #[error("expected exactly a first and a last name, got {count} token(s) in {input:?}")]
    TokenCount {
        /// The raw input.
        input: String,
        /// Number of whitespace-separated tokens found.
        count: usize,
    },
}

/// Errors raised while reading a plenary protocol document.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The document is not well-formed XML.
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// An element carries an attribute that cannot be decoded.
    #[error("malformed XML attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// The document has no `sitzungsverlauf` element.
    #[error("document has no session body (sitzungsverlauf)")]
    MissingSessionBody,

    /// A speech has no speaker paragraph, `redner` or `name` element.
    #[error("speech {speech} in agenda item {agenda_item} has no speaker attribution")]
    MissingSpeaker {
        /// Zero-based agenda item position.
        agenda_item: usize,
        /// Zero-based speech position within the agenda item.
        speech: usize,
    },
}
