//! Minimal delimited-text parser for survey exports.
//!
//! Parses raw CSV text into ordered header-to-value row mappings. The
//! format handled here is deliberately simple: quoted fields containing the
//! separator or embedded newlines are NOT supported. The survey exports
//! this pipeline ingests never use quoting, and a stricter reader would
//! reject rows the reference data contains (ragged trailing fields).

use crate::core::domain::RawRow;

/// Default field separator.
pub const DEFAULT_SEPARATOR: char = ',';

/// Parse delimited text into ordered row mappings using the default
/// separator.
///
/// See [`parse_csv_with_separator`] for the full contract.
pub fn parse_csv(text: &str) -> Vec<RawRow> {
    parse_csv_with_separator(text, DEFAULT_SEPARATOR)
}

/// Parse delimited text into ordered row mappings.
///
/// Line endings `\r\n` and `\r` are normalized to `\n` and empty lines are
/// dropped. The first non-empty line is the header row; every subsequent
/// line is split positionally and zipped against the headers by index. A
/// row with fewer fields than headers yields empty strings for the missing
/// trailing fields; a row with more fields ignores the extras. Headers and
/// values are trimmed. Duplicate header names keep the last occurrence's
/// value at the first occurrence's position.
pub fn parse_csv_with_separator(text: &str, separator: char) -> Vec<RawRow> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut lines = normalized.split('\n').filter(|line| !line.is_empty());

    let header: Vec<String> = match lines.next() {
        Some(line) => line
            .split(separator)
            .map(|field| field.trim().to_string())
            .collect(),
        None => return Vec::new(),
    };

    lines
        .map(|line| {
            let fields: Vec<&str> = line.split(separator).collect();
            header
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let value = fields.get(i).map_or("", |f| f.trim());
                    (name.clone(), value.to_string())
                })
                .collect()
        })
        .collect()
}
