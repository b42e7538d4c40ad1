use std::sync::LazyLock;

use regex::Regex;

static TIMESTAMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d\d:\d\d:\d\d").expect("timestamp pattern"));

/// Whether a line starts with an `HH:MM:SS` timestamp
pub fn is_timestamp_line(line: &str) -> bool {
    TIMESTAMP.is_match(line)
}

/// Remove every timestamp line, keeping all other lines and their line
/// endings byte for byte. Returns the cleaned text and the number of lines
/// removed.
pub fn strip_timestamps(content: &str) -> (String, usize) {
    let mut cleaned = String::with_capacity(content.len());
    let mut removed = 0;

    for line in content.split_inclusive('\n') {
        if is_timestamp_line(line) {
            removed += 1;
        } else {
            cleaned.push_str(line);
        }
    }

    (cleaned, removed)
}
